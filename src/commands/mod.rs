//! Command system for trxr
//!
//! Every command reads one or more TRX files (or directories of them) and
//! reports on the normalized results.

use crate::error::Result;
use crate::ui::UI;

pub mod failing;
pub mod read;
pub mod slowest;
pub mod stats;
mod utils;

pub use failing::FailingCommand;
pub use read::ReadCommand;
pub use slowest::SlowestCommand;
pub use stats::StatsCommand;

/// Trait that all commands must implement
pub trait Command {
    /// Execute the command, returning the process exit code
    fn execute(&self, ui: &mut dyn UI) -> Result<i32>;

    /// Get the command name
    fn name(&self) -> &str;

    /// Get command help text
    fn help(&self) -> &str;
}
