//! Output abstraction for commands
//!
//! Commands never print directly; they go through [`UI`] so that tests can
//! capture what a command would have shown.

use crate::error::Result;
use std::io::{self, Write};

#[cfg(test)]
pub mod test_ui;

/// Where command output goes
pub trait UI {
    /// Output a line for the user
    fn output(&mut self, message: &str) -> Result<()>;

    /// Output an error line
    fn error(&mut self, message: &str) -> Result<()>;

    /// Output a warning line
    fn warning(&mut self, message: &str) -> Result<()>;
}

/// Command-line UI: results on stdout, diagnostics on stderr
pub struct CliUI {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl CliUI {
    pub fn new() -> Self {
        CliUI {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Creates a UI writing to arbitrary sinks.
    pub fn with_writers(stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        CliUI { stdout, stderr }
    }
}

impl Default for CliUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI for CliUI {
    fn output(&mut self, message: &str) -> Result<()> {
        writeln!(self.stdout, "{}", message)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.stderr, "Error: {}", message)?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        writeln!(self.stderr, "Warning: {}", message)?;
        Ok(())
    }
}
