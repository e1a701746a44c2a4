//! Show the slowest tests

use crate::commands::utils::{collect_results, format_duration};
use crate::commands::Command;
use crate::config::ReaderConfig;
use crate::error::Result;
use crate::ui::UI;
use std::path::PathBuf;

pub struct SlowestCommand {
    paths: Vec<PathBuf>,
    config: ReaderConfig,
    count: usize,
}

impl SlowestCommand {
    pub fn new(paths: Vec<PathBuf>, config: ReaderConfig) -> Self {
        SlowestCommand {
            paths,
            config,
            count: 10,
        }
    }

    pub fn with_count(paths: Vec<PathBuf>, config: ReaderConfig, count: usize) -> Self {
        SlowestCommand {
            paths,
            config,
            count,
        }
    }
}

impl Command for SlowestCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let results = collect_results(&self.paths, &self.config, ui)?;

        let mut timed: Vec<_> = results
            .iter()
            .filter_map(|result| result.duration.map(|dur| (result.display_name(), dur)))
            .collect();

        if timed.is_empty() {
            ui.output("No timing information available")?;
            return Ok(0);
        }

        // Stable sort keeps document order among equal durations
        timed.sort_by(|a, b| b.1.cmp(&a.1));

        let total: i64 = timed.iter().map(|(_, dur)| *dur).sum();

        let display_count = self.count.min(timed.len());
        ui.output(&format!(
            "Slowest {} test(s) (total time: {}):",
            display_count,
            format_duration(total)
        ))?;

        for (name, duration) in timed.iter().take(display_count) {
            let percentage = if total > 0 {
                (*duration as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            ui.output(&format!(
                "  {:>6} ({:5.1}%) - {}",
                format_duration(*duration),
                percentage,
                name
            ))?;
        }

        Ok(0)
    }

    fn name(&self) -> &str {
        "slowest"
    }

    fn help(&self) -> &str {
        "Show the slowest tests"
    }
}
