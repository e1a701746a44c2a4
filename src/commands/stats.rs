//! Summarize results read from TRX files

use crate::commands::utils::{collect_results, format_duration};
use crate::commands::Command;
use crate::config::ReaderConfig;
use crate::error::Result;
use crate::result::TestStatus;
use crate::ui::UI;
use std::path::PathBuf;

pub struct StatsCommand {
    paths: Vec<PathBuf>,
    config: ReaderConfig,
}

impl StatsCommand {
    pub fn new(paths: Vec<PathBuf>, config: ReaderConfig) -> Self {
        StatsCommand { paths, config }
    }
}

impl Command for StatsCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let results = collect_results(&self.paths, &self.config, ui)?;

        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();
        let total_duration: i64 = results.iter().filter_map(|r| r.duration).sum();

        ui.output("Result Statistics:")?;
        ui.output(&format!("  Total results: {}", results.len()))?;
        ui.output(&format!("  Passed: {}", count(TestStatus::Passed)))?;
        ui.output(&format!("  Failed: {}", count(TestStatus::Failed)))?;
        ui.output(&format!("  Unknown: {}", count(TestStatus::Unknown)))?;
        ui.output(&format!(
            "  Total duration: {}",
            format_duration(total_duration)
        ))?;

        Ok(0)
    }

    fn name(&self) -> &str {
        "stats"
    }

    fn help(&self) -> &str {
        "Show result statistics"
    }
}
