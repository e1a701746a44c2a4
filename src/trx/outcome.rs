//! Outcome classification

use crate::result::TestStatus;

/// Map a TRX `outcome` attribute to a normalized status.
///
/// Matching ignores case. Only `passed` and `failed` are recognized; every
/// other outcome (`NotExecuted`, `Timeout`, `Inconclusive`, ...) is unknown.
pub fn parse_status(outcome: Option<&str>) -> TestStatus {
    match outcome.map(str::to_lowercase).as_deref() {
        Some("passed") => TestStatus::Passed,
        Some("failed") => TestStatus::Failed,
        _ => TestStatus::Unknown,
    }
}
