//! Utility functions for command implementation

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::reader::{read_results_dir, ResultsReader};
use crate::result::TestResult;
use crate::trx::TrxReader;
use crate::ui::UI;
use regex::Regex;
use std::path::PathBuf;

/// Read every TRX result reachable from `paths`, in the order given.
///
/// Directories are scanned (recursively if configured). Files that fail to
/// parse are logged by the reader and contribute nothing.
pub fn collect_results(
    paths: &[PathBuf],
    config: &ReaderConfig,
    ui: &mut dyn UI,
) -> Result<Vec<TestResult>> {
    let reader = TrxReader::with_extensions(config.extensions.clone());
    let mut results: Vec<TestResult> = Vec::new();

    for path in paths {
        if path.is_dir() {
            read_results_dir(path, config.recursive, &[&reader], &mut results)?;
        } else if path.is_file() {
            if !reader.accepts(path) {
                ui.warning(&format!(
                    "Skipping {}: extension is not one of {}",
                    path.display(),
                    config.extensions.join(", ")
                ))?;
                continue;
            }
            reader.read_result_file(&mut results, path);
        } else {
            return Err(Error::Other(format!(
                "No such file or directory: {}",
                path.display()
            )));
        }
    }

    Ok(results)
}

/// Keep only results whose name matches `pattern`.
pub fn filter_results(results: Vec<TestResult>, pattern: Option<&str>) -> Result<Vec<TestResult>> {
    let Some(pattern) = pattern else {
        return Ok(results);
    };
    let re = Regex::new(pattern)
        .map_err(|e| Error::Other(format!("Invalid filter regex {:?}: {}", pattern, e)))?;
    Ok(results
        .into_iter()
        .filter(|result| re.is_match(result.display_name()))
        .collect())
}

/// Format a duration in seconds the way every command shows it
pub fn format_duration(seconds: i64) -> String {
    format!("{}s", seconds)
}
