//! trx-reader - Read .NET TRX test reports into normalized test results
//!
//! TRX is the XML report format written by `vstest` and `dotnet test`. This
//! crate parses it and emits one format-independent [`result::TestResult`]
//! per recorded execution, ready for whatever reporting pipeline consumes it.
//!
//! # Architecture
//!
//! - [`xml`]: Owned XML element tree that format readers navigate
//! - [`trx`]: The TRX reader: definitions, results and the join between them
//! - [`result`]: Normalized result entity shared by all formats
//! - [`reader`]: Reader and visitor traits plus results-directory dispatch
//! - [`config`]: .trxr.conf configuration file parsing
//! - [`commands`]: User-facing commands (read, failing, slowest, stats)
//! - [`ui`]: User interface abstraction for output
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```
//! use trx_reader::result::{TestResult, TestStatus};
//! use trx_reader::trx::{parse_document, ParseOutcome};
//! use trx_reader::xml::XmlElement;
//!
//! # fn main() -> trx_reader::error::Result<()> {
//! let document = XmlElement::parse_str(
//!     r#"<TestRun>
//!          <TestDefinitions>
//!            <UnitTest name="T1"><Execution id="E1"/></UnitTest>
//!          </TestDefinitions>
//!          <Results>
//!            <UnitTestResult executionId="E1" testName="T1" outcome="Passed"
//!                startTime="2024-01-01T00:00:00Z" endTime="2024-01-01T00:00:05Z"/>
//!          </Results>
//!        </TestRun>"#,
//! )?;
//!
//! let mut results: Vec<TestResult> = Vec::new();
//! let outcome = parse_document(&document, &mut results);
//!
//! assert_eq!(outcome, ParseOutcome::Parsed { results: 1 });
//! assert_eq!(results[0].status, TestStatus::Passed);
//! assert_eq!(results[0].duration, Some(5));
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod reader;
pub mod result;
pub mod trx;
pub mod ui;
pub mod xml;

pub use error::{Error, Result};
