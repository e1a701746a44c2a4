//! Normalized test result data structures
//!
//! Every format reader produces these, so consumers never need to know
//! which report format a result came from (other than through its
//! [`LabelName::ResultFormat`] label).

use std::collections::HashMap;
use std::fmt;

/// Normalized status of a test execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TestStatus {
    /// Test passed.
    Passed,
    /// Test failed.
    Failed,
    /// The report did not say, or used a status we do not map.
    #[default]
    Unknown,
}

impl TestStatus {
    /// Returns true if this status represents a failure condition.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Failed)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Unknown => "unknown",
        })
    }
}

/// Well-known label names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelName {
    /// Identifies the report format a result was read from.
    ResultFormat,
}

impl LabelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelName::ResultFormat => "resultFormat",
        }
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name/value pair attached to a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Label {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result of a single test execution, independent of the source format.
///
/// `start` and `stop` are epoch seconds. `duration` is only set when both
/// are known and is never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResult {
    /// Display name of the test.
    pub name: Option<String>,
    /// Execution status.
    pub status: TestStatus,
    /// Start of execution, in seconds since the epoch.
    pub start: Option<i64>,
    /// End of execution, in seconds since the epoch.
    pub stop: Option<i64>,
    /// Execution time in seconds.
    pub duration: Option<i64>,
    /// Failure message.
    pub message: Option<String>,
    /// Failure stack trace.
    pub trace: Option<String>,
    /// Test parameters.
    pub parameters: HashMap<String, String>,
    /// Free-text description of the test.
    pub description: Option<String>,
    /// Labels attached to this result.
    pub labels: Vec<Label>,
}

impl TestResult {
    /// Create an empty result for the named test
    pub fn new(name: Option<String>, status: TestStatus) -> Self {
        TestResult {
            name,
            status,
            ..Default::default()
        }
    }

    /// Set the start and stop instants, deriving the duration when both are known.
    pub fn with_times(mut self, start: Option<i64>, stop: Option<i64>) -> Self {
        self.start = start;
        self.stop = stop;
        self.duration = match (start, stop) {
            (Some(start), Some(stop)) => Some((stop - start).max(0)),
            _ => None,
        };
        self
    }

    /// Set the failure message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the stack trace
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Add a label unless one with the same name is already present.
    pub fn add_label_if_not_exists(&mut self, name: LabelName, value: impl Into<String>) {
        if self.label(name).is_none() {
            self.labels.push(Label::new(name.as_str(), value));
        }
    }

    /// Returns the value of the first label with the given name.
    pub fn label(&self, name: LabelName) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.name == name.as_str())
            .map(|label| label.value.as_str())
    }

    /// Returns the name for display, or a placeholder when the report had none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}
