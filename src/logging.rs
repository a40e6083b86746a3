//! stderr logging via tracing-subscriber

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DESKCTL_LOG";

/// Level picked from the number of `-v` flags
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `DESKCTL_LOG` takes precedence over `-v`.
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = level_for(verbose);
        EnvFilter::new(format!(
            "warn,deskctl={0},deskctl_hook={0},deskctl_core={0}",
            level
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
