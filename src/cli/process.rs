//! `process` command group

use super::Reporter;
use crate::automation::Automation;
use crate::error::Result;
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug, Clone)]
pub enum ProcessCommand {
    /// List processes (PID and Name)
    List,
}

pub fn run<W: Write>(cmd: ProcessCommand, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    match cmd {
        ProcessCommand::List => {
            let processes = desk.processes()?;
            let lines = std::iter::once("Processes:".to_string()).chain(
                processes
                    .iter()
                    .map(|p| format!("PID: {}, Name: {}", p.pid, p.name)),
            );
            out.emit_lines(lines, &processes)
        }
    }
}
