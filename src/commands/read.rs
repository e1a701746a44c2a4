//! Print every result read from TRX files

use crate::commands::utils::{collect_results, filter_results, format_duration};
use crate::commands::Command;
use crate::config::ReaderConfig;
use crate::error::Result;
use crate::ui::UI;
use std::path::PathBuf;

pub struct ReadCommand {
    paths: Vec<PathBuf>,
    config: ReaderConfig,
    filter: Option<String>,
}

impl ReadCommand {
    pub fn new(paths: Vec<PathBuf>, config: ReaderConfig) -> Self {
        ReadCommand {
            paths,
            config,
            filter: None,
        }
    }

    /// Only show results whose name matches the regex
    pub fn with_filter(
        paths: Vec<PathBuf>,
        config: ReaderConfig,
        filter: Option<String>,
    ) -> Self {
        ReadCommand {
            paths,
            config,
            filter,
        }
    }
}

impl Command for ReadCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let results = collect_results(&self.paths, &self.config, ui)?;
        let results = filter_results(results, self.filter.as_deref())?;

        let mut failures = 0;
        for result in &results {
            let mut line = format!("{:<7} {}", result.status, result.display_name());
            if let Some(duration) = result.duration {
                line.push_str(&format!(" ({})", format_duration(duration)));
            }
            ui.output(&line)?;

            if result.status.is_failure() {
                failures += 1;
                if let Some(ref message) = result.message {
                    for message_line in message.lines() {
                        ui.output(&format!("    {}", message_line))?;
                    }
                }
            }
        }

        ui.output(&format!("{} result(s), {} failed", results.len(), failures))?;

        Ok(if failures > 0 { 1 } else { 0 })
    }

    fn name(&self) -> &str {
        "read"
    }

    fn help(&self) -> &str {
        "Print every test result found in TRX files"
    }
}
