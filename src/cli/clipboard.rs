//! `clipboard` command group

use super::Reporter;
use crate::automation::Automation;
use crate::error::{Error, Result};
use clap::Subcommand;
use serde_json::json;
use std::io::Write;

#[derive(Subcommand, Debug, Clone)]
pub enum ClipboardCommand {
    /// Read text from the clipboard
    Read,
    /// Write text to the clipboard
    Write {
        /// Text to write to clipboard
        #[arg(long)]
        text: String,
    },
}

pub fn run<W: Write>(cmd: ClipboardCommand, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    match cmd {
        ClipboardCommand::Read => {
            let text = desk.clipboard_read()?;
            out.emit(format!("Clipboard contents: {}", text), json!({"text": text}))
        }
        ClipboardCommand::Write { text } => {
            if text.is_empty() {
                return Err(Error::invalid_argument(
                    "Please provide text to write to the clipboard",
                ));
            }
            desk.clipboard_write(&text)?;
            out.emit("Text written to clipboard", json!({"written": text.chars().count()}))
        }
    }
}
