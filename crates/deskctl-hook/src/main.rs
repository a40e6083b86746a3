//! deskctl-hook - desktop automation plus global input hooks
//!
//! Same command groups as `deskctl`, except that `screen capture` writes a
//! PNG file and a `hook` group waits for or streams keyboard and mouse events.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use deskctl_core::cli::clipboard::{self, ClipboardCommand};
use deskctl_core::cli::hook::{self, HookCommand, HookContext};
use deskctl_core::cli::keyboard::{self, KeyboardCommand};
use deskctl_core::cli::mouse::{self, MouseCommand};
use deskctl_core::cli::process::{self, ProcessCommand};
use deskctl_core::cli::screen::{self, FileScreenCommand};
use deskctl_core::cli::window::{self, WindowCommand};
use deskctl_core::hook::EventHook;
use deskctl_core::logging;
use deskctl_core::prelude::*;

#[derive(Parser)]
#[command(name = "deskctl-hook")]
#[command(about = "Control mouse, keyboard, screen, windows and clipboard, and listen for input events")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mouse control commands
    #[command(subcommand)]
    Mouse(MouseCommand),
    /// Keyboard control commands
    #[command(subcommand)]
    Keyboard(KeyboardCommand),
    /// Screen related commands
    #[command(subcommand)]
    Screen(FileScreenCommand),
    /// Window management commands
    #[command(subcommand)]
    Window(WindowCommand),
    /// Clipboard commands
    #[command(subcommand)]
    Clipboard(ClipboardCommand),
    /// Process management commands
    #[command(subcommand)]
    Process(ProcessCommand),
    /// Global keyboard and mouse event hooks
    #[command(subcommand)]
    Hook(HookCommand),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let config = match Config::load(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(cli.global.format(&Config::default()), e.into()),
    };
    let format = cli.global.format(&config);
    let mut out = Reporter::stdout(format);

    let mut desk = Desktop::new(&config);

    if let Err(e) = dispatch(cli.command, &config, &mut desk, &mut out) {
        fail(format, e.into());
    }
}

fn dispatch<W: Write>(
    command: Commands,
    config: &Config,
    desk: &mut dyn Automation,
    out: &mut Reporter<W>,
) -> Result<()> {
    match command {
        Commands::Mouse(cmd) => mouse::run(cmd, desk, out)?,
        Commands::Keyboard(cmd) => keyboard::run(cmd, desk, out)?,
        Commands::Screen(cmd) => screen::run_file(cmd, &config.capture_path, desk, out)?,
        Commands::Window(cmd) => window::run(cmd, desk, out)?,
        Commands::Clipboard(cmd) => clipboard::run(cmd, desk, out)?,
        Commands::Process(cmd) => process::run(cmd, desk, out)?,
        Commands::Hook(cmd) => run_hook(cmd, config, out)?,
    }
    Ok(())
}

fn run_hook<W: Write>(cmd: HookCommand, config: &Config, out: &mut Reporter<W>) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    // Only `listen` winds down on Ctrl+C; the waits keep the default handler
    if matches!(cmd, HookCommand::Listen { .. }) {
        let s = stop.clone();
        ctrlc::set_handler(move || {
            s.store(true, Ordering::SeqCst);
        })?;
    }

    let events = EventHook::start()?;
    let ctx = HookContext {
        events: events.receiver(),
        stop: &stop,
        default_timeout_ms: config.hook_timeout_ms,
    };
    hook::run(cmd, &ctx, out)?;
    Ok(())
}

fn fail(format: OutputFormat, err: Error) -> ! {
    match format {
        OutputFormat::Json => {
            let _ = Reporter::stdout(format).failure(&err);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", err);
            for hint in &err.suggestions {
                eprintln!("  hint: {}", hint);
            }
        }
    }
    std::process::exit(1);
}
