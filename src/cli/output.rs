//! Result printing: plain text lines or a JSON envelope

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
pub struct Output<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

impl<T: Serialize> Output<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn err(e: Error) -> Output<()> {
        Output { success: false, data: None, error: Some(e) }
    }
}

pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl Reporter<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print `text` in text mode or `data` wrapped in a success envelope
    pub fn emit<T: Serialize>(&mut self, text: impl Display, data: T) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", text)?,
            OutputFormat::Json => self.write_json(&Output::ok(data))?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Print several text lines, or `data` once in JSON mode
    pub fn emit_lines<T: Serialize, I>(&mut self, lines: I, data: T) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        match self.format {
            OutputFormat::Text => {
                for line in lines {
                    writeln!(self.out, "{}", line)?;
                }
            }
            OutputFormat::Json => self.write_json(&Output::ok(data))?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// One compact JSON object per line, used for event streams
    pub fn emit_record<T: Serialize>(&mut self, text: impl Display, record: &T) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", text)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, record)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Failure envelope; text mode leaves reporting to the caller's stderr
    pub fn failure(&mut self, err: &Error) -> Result<()> {
        if self.format == OutputFormat::Json {
            self.write_json(&Output::<()>::err(err.clone()))?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize>(&mut self, output: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, output)?;
        writeln!(self.out)?;
        Ok(())
    }
}
