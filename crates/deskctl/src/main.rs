//! deskctl - desktop automation from the command line
//!
//! Mouse, keyboard, screen, window, clipboard and process commands. Screen
//! captures are printed as Base64-encoded PNG.

use anyhow::Result;
use clap::{Parser, Subcommand};

use deskctl_core::cli::clipboard::{self, ClipboardCommand};
use deskctl_core::cli::keyboard::{self, KeyboardCommand};
use deskctl_core::cli::mouse::{self, MouseCommand};
use deskctl_core::cli::process::{self, ProcessCommand};
use deskctl_core::cli::screen::{self, ScreenCommand};
use deskctl_core::cli::window::{self, WindowCommand};
use deskctl_core::logging;
use deskctl_core::prelude::*;

#[derive(Parser)]
#[command(name = "deskctl")]
#[command(about = "Control mouse, keyboard, screen, windows and clipboard")]
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
    Screen(ScreenCommand),
    /// Window management commands
    #[command(subcommand)]
    Window(WindowCommand),
    /// Clipboard commands
    #[command(subcommand)]
    Clipboard(ClipboardCommand),
    /// Process management commands
    #[command(subcommand)]
    Process(ProcessCommand),
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

    if let Err(e) = dispatch(cli.command, &mut desk, &mut out) {
        fail(format, e.into());
    }
}

fn dispatch<W: std::io::Write>(command: Commands, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    match command {
        Commands::Mouse(cmd) => mouse::run(cmd, desk, out)?,
        Commands::Keyboard(cmd) => keyboard::run(cmd, desk, out)?,
        Commands::Screen(cmd) => screen::run(cmd, desk, out)?,
        Commands::Window(cmd) => window::run(cmd, desk, out)?,
        Commands::Clipboard(cmd) => clipboard::run(cmd, desk, out)?,
        Commands::Process(cmd) => process::run(cmd, desk, out)?,
    }
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
