//! Reader and visitor abstractions
//!
//! A [`ResultsReader`] understands one report format. It is handed candidate
//! files and pushes every normalized [`TestResult`] it finds into a
//! [`ResultsVisitor`]. Readers decide on their own whether a file is theirs,
//! so the same file can be offered to several readers.

use crate::error::Result;
use crate::result::TestResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sink for normalized results, called once per result in emission order
pub trait ResultsVisitor {
    fn visit_test_result(&mut self, result: TestResult);
}

impl ResultsVisitor for Vec<TestResult> {
    fn visit_test_result(&mut self, result: TestResult) {
        self.push(result);
    }
}

/// A reader for one report format
///
/// # Examples
///
/// ```
/// use trx_reader::reader::ResultsReader;
/// use trx_reader::result::TestResult;
/// use trx_reader::trx::TrxReader;
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// let path = temp.path().join("run.trx");
/// std::fs::write(
///     &path,
///     r#"<TestRun><Results><UnitTestResult testName="T1" outcome="Passed"/></Results></TestRun>"#,
/// )
/// .unwrap();
///
/// let mut results: Vec<TestResult> = Vec::new();
/// TrxReader::new().read_result_file(&mut results, &path);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].name.as_deref(), Some("T1"));
/// ```
pub trait ResultsReader {
    /// Read a single file, emitting any results found.
    ///
    /// Files that are not in this reader's format are ignored. Failures are
    /// logged and swallowed so the caller can move on to the next file.
    fn read_result_file(&self, visitor: &mut dyn ResultsVisitor, file: &Path);
}

/// Returns true if the file name ends in `.<extension>`, ignoring ASCII case.
pub fn has_extension(file: &Path, extension: &str) -> bool {
    file.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// List the regular files under a results directory, sorted by path.
pub fn list_result_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(dir, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if recursive {
                collect_files(&path, recursive, files)?;
            }
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// Offer every file in a results directory to every reader.
///
/// Returns the number of files offered.
pub fn read_results_dir(
    dir: &Path,
    recursive: bool,
    readers: &[&dyn ResultsReader],
    visitor: &mut dyn ResultsVisitor,
) -> Result<usize> {
    let files = list_result_files(dir, recursive)?;
    debug!("Found {} file(s) in {}", files.len(), dir.display());
    for file in &files {
        for reader in readers {
            reader.read_result_file(visitor, file);
        }
    }
    Ok(files.len())
}
