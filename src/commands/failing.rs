//! Show failing tests

use crate::commands::utils::collect_results;
use crate::commands::Command;
use crate::config::ReaderConfig;
use crate::error::Result;
use crate::ui::UI;
use std::path::PathBuf;

pub struct FailingCommand {
    paths: Vec<PathBuf>,
    config: ReaderConfig,
    list_only: bool,
}

impl FailingCommand {
    pub fn new(paths: Vec<PathBuf>, config: ReaderConfig) -> Self {
        FailingCommand {
            paths,
            config,
            list_only: false,
        }
    }

    pub fn with_list_only(paths: Vec<PathBuf>, config: ReaderConfig) -> Self {
        FailingCommand {
            paths,
            config,
            list_only: true,
        }
    }
}

impl Command for FailingCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let results = collect_results(&self.paths, &self.config, ui)?;
        let failing: Vec<_> = results.iter().filter(|r| r.status.is_failure()).collect();

        if failing.is_empty() {
            if !self.list_only {
                ui.output("No failing tests")?;
            }
            return Ok(0);
        }

        if self.list_only {
            for result in failing {
                ui.output(result.display_name())?;
            }
        } else {
            ui.output(&format!("{} failing test(s):", failing.len()))?;
            for result in failing {
                ui.output(&format!("  {}", result.display_name()))?;
                for text in [&result.message, &result.trace].into_iter().flatten() {
                    for line in text.lines() {
                        ui.output(&format!("    {}", line))?;
                    }
                }
            }
        }
        Ok(1)
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn help(&self) -> &str {
        "Show tests that failed, with their messages and stack traces"
    }
}
