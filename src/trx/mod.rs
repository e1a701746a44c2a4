//! TRX report reader
//!
//! TRX is the XML report written by `vstest`/`dotnet test`. A `<TestRun>`
//! holds a `<TestDefinitions>` section declaring every test and a
//! `<Results>` section with one `<UnitTestResult>` per execution. The two
//! are joined by execution id:
//!
//! ```xml
//! <TestRun>
//!   <TestDefinitions>
//!     <UnitTest name="T1"><Execution id="E1"/></UnitTest>
//!   </TestDefinitions>
//!   <Results>
//!     <UnitTestResult executionId="E1" testName="T1" outcome="Passed"
//!         startTime="2024-01-01T00:00:00Z" endTime="2024-01-01T00:00:05Z"/>
//!   </Results>
//! </TestRun>
//! ```
//!
//! Every `<UnitTestResult>` produces exactly one [`TestResult`], in document
//! order, however sparse it is.

use crate::error::Result;
use crate::reader::{has_extension, ResultsReader, ResultsVisitor};
use crate::result::{LabelName, TestResult};
use crate::xml::XmlElement;
use std::path::Path;
use tracing::{debug, error, info};

pub mod definitions;
pub mod outcome;
pub mod time;

pub use definitions::{TrxUnitTest, UnitTests};
pub use outcome::parse_status;
pub use time::parse_time;

/// Value of the `resultFormat` label on every result read from a TRX file
pub const TRX_RESULTS_FORMAT: &str = "trx";
/// Default file extension handled by [`TrxReader`]
pub const TRX_EXTENSION: &str = "trx";

pub const TEST_RUN_ELEMENT: &str = "TestRun";
pub const TEST_DEFINITIONS_ELEMENT: &str = "TestDefinitions";
pub const UNIT_TEST_ELEMENT: &str = "UnitTest";
pub const NAME_ATTRIBUTE: &str = "name";
pub const DESCRIPTION_ELEMENT: &str = "Description";
pub const EXECUTION_ELEMENT: &str = "Execution";
pub const ID_ATTRIBUTE: &str = "id";
pub const PROPERTIES_ELEMENT: &str = "Properties";
pub const PROPERTY_ELEMENT: &str = "Property";
pub const KEY_ELEMENT: &str = "Key";
pub const VALUE_ELEMENT: &str = "Value";

pub const RESULTS_ELEMENT: &str = "Results";
pub const UNIT_TEST_RESULT_ELEMENT: &str = "UnitTestResult";
pub const EXECUTION_ID_ATTRIBUTE: &str = "executionId";
pub const TEST_NAME_ATTRIBUTE: &str = "testName";
pub const START_TIME_ATTRIBUTE: &str = "startTime";
pub const END_TIME_ATTRIBUTE: &str = "endTime";
pub const OUTCOME_ATTRIBUTE: &str = "outcome";
pub const OUTPUT_ELEMENT: &str = "Output";
pub const ERROR_INFO_ELEMENT: &str = "ErrorInfo";
pub const MESSAGE_ELEMENT: &str = "Message";
pub const STACK_TRACE_ELEMENT: &str = "StackTrace";

/// What happened to a document handed to the TRX parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The document was a test run; this many results were emitted.
    Parsed { results: usize },
    /// The root element was something else, so nothing was emitted.
    NotTrx { root: String },
}

/// Reader for `.trx` files
#[derive(Debug, Clone)]
pub struct TrxReader {
    extensions: Vec<String>,
}

impl TrxReader {
    /// Creates a reader that accepts files ending in `.trx`.
    pub fn new() -> Self {
        TrxReader {
            extensions: vec![TRX_EXTENSION.to_string()],
        }
    }

    /// Creates a reader that accepts any of the given extensions.
    pub fn with_extensions(extensions: Vec<String>) -> Self {
        TrxReader { extensions }
    }

    /// Returns true if this reader should look at the file at all.
    pub fn accepts(&self, file: &Path) -> bool {
        self.extensions.iter().any(|ext| has_extension(file, ext))
    }

    /// Parse a file, reporting structural failures to the caller.
    ///
    /// [`ResultsReader::read_result_file`] is the forgiving variant: it
    /// checks the extension first and only logs errors.
    pub fn parse_test_run(
        &self,
        visitor: &mut dyn ResultsVisitor,
        file: &Path,
    ) -> Result<ParseOutcome> {
        debug!("Parsing file {}", file.display());
        let document = XmlElement::parse_file(file)?;
        let outcome = parse_document(&document, visitor);
        if let ParseOutcome::NotTrx { root } = &outcome {
            info!(
                "{} is not a valid TRX file. Unknown root element {}",
                file.display(),
                root
            );
        }
        Ok(outcome)
    }
}

impl Default for TrxReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsReader for TrxReader {
    fn read_result_file(&self, visitor: &mut dyn ResultsVisitor, file: &Path) {
        if !self.accepts(file) {
            debug!("Skipping {}: not a TRX file", file.display());
            return;
        }
        if let Err(e) = self.parse_test_run(visitor, file) {
            error!("Could not parse file {}: {}", file.display(), e);
        }
    }
}

/// Emit a result for every `<UnitTestResult>` in an already parsed document.
pub fn parse_document(test_run: &XmlElement, visitor: &mut dyn ResultsVisitor) -> ParseOutcome {
    if test_run.name() != TEST_RUN_ELEMENT {
        return ParseOutcome::NotTrx {
            root: test_run.name().to_string(),
        };
    }

    // The join is a full lookup, so every definition must be known up front
    let tests = test_run
        .first(TEST_DEFINITIONS_ELEMENT)
        .map(definitions::parse_test_definitions)
        .unwrap_or_default();

    let results = test_run
        .first(RESULTS_ELEMENT)
        .map(|results| parse_results(results, &tests, visitor))
        .unwrap_or(0);

    ParseOutcome::Parsed { results }
}

/// Returns the number of results emitted.
fn parse_results(
    results: &XmlElement,
    tests: &UnitTests,
    visitor: &mut dyn ResultsVisitor,
) -> usize {
    let mut count = 0;
    for unit_test_result in results.children(UNIT_TEST_RESULT_ELEMENT) {
        visitor.visit_test_result(parse_unit_test_result(unit_test_result, tests));
        count += 1;
    }
    count
}

/// Build the normalized result for one `<UnitTestResult>`.
pub fn parse_unit_test_result(unit_test_result: &XmlElement, tests: &UnitTests) -> TestResult {
    let execution_id = unit_test_result.attribute(EXECUTION_ID_ATTRIBUTE);
    let test_name = unit_test_result.attribute(TEST_NAME_ATTRIBUTE);
    let start_time = unit_test_result.attribute(START_TIME_ATTRIBUTE);
    let end_time = unit_test_result.attribute(END_TIME_ATTRIBUTE);
    let outcome = unit_test_result.attribute(OUTCOME_ATTRIBUTE);

    let mut result = TestResult::new(test_name.map(str::to_string), parse_status(outcome))
        .with_times(parse_time(start_time), parse_time(end_time));

    let error_info = unit_test_result
        .first(OUTPUT_ELEMENT)
        .and_then(|output| output.first(ERROR_INFO_ELEMENT));
    if let Some(error_info) = error_info {
        if let Some(message) = error_info.first(MESSAGE_ELEMENT) {
            result = result.with_message(message.value());
        }
        if let Some(trace) = error_info.first(STACK_TRACE_ELEMENT) {
            result = result.with_trace(trace.value());
        }
    }

    // A result without an executionId joins the id-less definition, if any
    if let Some(unit_test) = tests.get(&execution_id.map(str::to_string)) {
        result.parameters = unit_test.parameters.clone();
        result.description = unit_test.description.clone();
    }

    result.add_label_if_not_exists(LabelName::ResultFormat, TRX_RESULTS_FORMAT);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_results_dir;
    use crate::result::TestStatus;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn parse(xml: &str) -> (ParseOutcome, Vec<TestResult>) {
        let document = XmlElement::parse_str(xml).unwrap();
        let mut results: Vec<TestResult> = Vec::new();
        let outcome = parse_document(&document, &mut results);
        (outcome, results)
    }

    #[test]
    fn test_single_joined_result() {
        let (outcome, results) = parse(
            r#"<TestRun><TestDefinitions><UnitTest name="T1"><Execution id="E1"/></UnitTest></TestDefinitions><Results><UnitTestResult executionId="E1" testName="T1" outcome="Passed" startTime="2024-01-01T00:00:00Z" endTime="2024-01-01T00:00:05Z"/></Results></TestRun>"#,
        );

        assert_eq!(outcome, ParseOutcome::Parsed { results: 1 });
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.name.as_deref(), Some("T1"));
        assert_eq!(result.status, TestStatus::Passed);
        assert_eq!(result.start, Some(1704067200));
        assert_eq!(result.stop, Some(1704067205));
        assert_eq!(result.duration, Some(5));
        assert!(result.parameters.is_empty());
        assert_eq!(result.description, None);
        assert_eq!(result.message, None);
        assert_eq!(result.trace, None);
        assert_eq!(result.label(LabelName::ResultFormat), Some("trx"));
    }

    #[test]
    fn test_wrong_root_emits_nothing() {
        let (outcome, results) = parse(
            r#"<testsuites><Results><UnitTestResult testName="T1"/></Results></testsuites>"#,
        );
        assert_eq!(
            outcome,
            ParseOutcome::NotTrx {
                root: "testsuites".to_string()
            }
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_definitions_copied_on_match() {
        let (_, results) = parse(
            r#"<TestRun>
                 <TestDefinitions>
                   <UnitTest name="T1">
                     <Description>Checks things</Description>
                     <Execution id="E1"/>
                     <Properties><Property><Key>Owner</Key><Value>bob</Value></Property></Properties>
                   </UnitTest>
                 </TestDefinitions>
                 <Results>
                   <UnitTestResult executionId="E1" testName="T1" outcome="Passed"/>
                   <UnitTestResult executionId="E2" testName="T2" outcome="Passed"/>
                 </Results>
               </TestRun>"#,
        );

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].description.as_deref(), Some("Checks things"));
        assert_eq!(results[0].parameters.len(), 1);
        assert_eq!(results[0].parameters["Owner"], "bob");
        assert_eq!(results[1].description, None);
        assert!(results[1].parameters.is_empty());
    }

    #[test]
    fn test_results_without_definitions() {
        let (outcome, results) = parse(
            r#"<TestRun><Results>
                 <UnitTestResult testName="a" outcome="Passed"/>
                 <UnitTestResult testName="b" outcome="Failed"/>
                 <UnitTestResult testName="c" outcome="NotExecuted"/>
               </Results></TestRun>"#,
        );
        assert_eq!(outcome, ParseOutcome::Parsed { results: 3 });
        let summary: Vec<_> = results
            .iter()
            .map(|r| (r.display_name(), r.status))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", TestStatus::Passed),
                ("b", TestStatus::Failed),
                ("c", TestStatus::Unknown),
            ]
        );
    }

    #[test]
    fn test_no_results_section() {
        let (outcome, results) = parse(
            r#"<TestRun><TestDefinitions><UnitTest name="T1"><Execution id="E1"/></UnitTest></TestDefinitions></TestRun>"#,
        );
        assert_eq!(outcome, ParseOutcome::Parsed { results: 0 });
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_result_entry_is_still_emitted() {
        let (_, results) = parse("<TestRun><Results><UnitTestResult/></Results></TestRun>");
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.name, None);
        assert_eq!(result.status, TestStatus::Unknown);
        assert_eq!(result.start, None);
        assert_eq!(result.stop, None);
        assert_eq!(result.duration, None);
        assert_eq!(result.label(LabelName::ResultFormat), Some("trx"));
    }

    #[test]
    fn test_failure_diagnostics() {
        let (_, results) = parse(
            r#"<TestRun><Results>
                 <UnitTestResult testName="Broken" outcome="Failed">
                   <Output>
                     <ErrorInfo>
                       <Message>Assert.AreEqual failed. Expected:&lt;1&gt;. Actual:&lt;2&gt;.</Message>
                       <StackTrace>   at Ns.Tests.Broken() in Tests.cs:line 12</StackTrace>
                     </ErrorInfo>
                   </Output>
                 </UnitTestResult>
               </Results></TestRun>"#,
        );
        let result = &results[0];
        assert_eq!(result.status, TestStatus::Failed);
        assert_eq!(
            result.message.as_deref(),
            Some("Assert.AreEqual failed. Expected:<1>. Actual:<2>.")
        );
        assert_eq!(
            result.trace.as_deref(),
            Some("   at Ns.Tests.Broken() in Tests.cs:line 12")
        );
    }

    #[test]
    fn test_partial_diagnostic_path() {
        let (_, results) = parse(
            r#"<TestRun><Results>
                 <UnitTestResult testName="a"><Output><StdOut>hello</StdOut></Output></UnitTestResult>
                 <UnitTestResult testName="b"><Output><ErrorInfo><Message>boom</Message></ErrorInfo></Output></UnitTestResult>
                 <UnitTestResult testName="c"><ErrorInfo><Message>misplaced</Message></ErrorInfo></UnitTestResult>
               </Results></TestRun>"#,
        );
        assert_eq!(results[0].message, None);
        assert_eq!(results[0].trace, None);
        assert_eq!(results[1].message.as_deref(), Some("boom"));
        assert_eq!(results[1].trace, None);
        assert_eq!(results[2].message, None);
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let (_, results) = parse(
            r#"<TestRun><Results><UnitTestResult testName="a" startTime="2024-01-01T00:00:10Z" endTime="2024-01-01T00:00:05Z"/></Results></TestRun>"#,
        );
        assert_eq!(results[0].start, Some(1704067210));
        assert_eq!(results[0].stop, Some(1704067205));
        assert_eq!(results[0].duration, Some(0));
    }

    #[test]
    fn test_bad_timestamp_degrades_to_absent() {
        let (_, results) = parse(
            r#"<TestRun><Results><UnitTestResult testName="a" outcome="passed" startTime="garbage" endTime="2024-01-01T00:00:05Z"/></Results></TestRun>"#,
        );
        let result = &results[0];
        assert_eq!(result.start, None);
        assert_eq!(result.stop, Some(1704067205));
        assert_eq!(result.duration, None);
        assert_eq!(result.status, TestStatus::Passed);
    }

    #[test]
    fn test_repeated_executions_share_a_definition() {
        let (_, results) = parse(
            r#"<TestRun>
                 <TestDefinitions>
                   <UnitTest name="Flaky"><Description>retried</Description><Execution id="E1"/></UnitTest>
                 </TestDefinitions>
                 <Results>
                   <UnitTestResult executionId="E1" testName="Flaky" outcome="Failed"/>
                   <UnitTestResult executionId="E1" testName="Flaky" outcome="Passed"/>
                 </Results>
               </TestRun>"#,
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, TestStatus::Failed);
        assert_eq!(results[1].status, TestStatus::Passed);
        assert!(results
            .iter()
            .all(|r| r.description.as_deref() == Some("retried")));
    }

    #[test]
    fn test_missing_execution_id_joins_id_less_definition() {
        // Known edge case: the `None` key is shared on both sides of the join
        let (_, results) = parse(
            r#"<TestRun>
                 <TestDefinitions>
                   <UnitTest name="first"><Description>overwritten</Description></UnitTest>
                   <UnitTest name="second"><Description>survivor</Description></UnitTest>
                 </TestDefinitions>
                 <Results>
                   <UnitTestResult testName="anonymous"/>
                   <UnitTestResult executionId="E9" testName="unmatched"/>
                 </Results>
               </TestRun>"#,
        );
        assert_eq!(results[0].description.as_deref(), Some("survivor"));
        assert_eq!(results[1].description, None);
    }

    #[test]
    fn test_reader_skips_other_extensions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.xml");
        std::fs::write(
            &path,
            r#"<TestRun><Results><UnitTestResult testName="a"/></Results></TestRun>"#,
        )
        .unwrap();

        let mut results: Vec<TestResult> = Vec::new();
        TrxReader::new().read_result_file(&mut results, &path);
        assert!(results.is_empty());

        TrxReader::with_extensions(vec!["xml".to_string()]).read_result_file(&mut results, &path);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_reader_swallows_malformed_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.trx");
        std::fs::write(&path, "<TestRun><Results><UnitTestResult testName=\"a\"/>").unwrap();

        let reader = TrxReader::new();
        let mut results: Vec<TestResult> = Vec::new();
        reader.read_result_file(&mut results, &path);
        assert!(results.is_empty());

        assert!(reader.parse_test_run(&mut results, &path).is_err());
        assert!(results.is_empty());
    }

    #[test]
    fn test_reader_swallows_missing_files() {
        let temp = TempDir::new().unwrap();
        let mut results: Vec<TestResult> = Vec::new();
        TrxReader::new().read_result_file(&mut results, &temp.path().join("gone.trx"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_reader_reads_utf16_report() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.trx");
        let xml = r#"<?xml version="1.0" encoding="utf-16"?><TestRun><Results><UnitTestResult testName="T1" outcome="Passed"/></Results></TestRun>"#;
        let mut bytes = vec![0xFF, 0xFE];
        for unit in xml.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();

        let mut results: Vec<TestResult> = Vec::new();
        TrxReader::new().read_result_file(&mut results, &path);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("T1"));
        assert_eq!(results[0].status, TestStatus::Passed);
    }

    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with debug logging captured, returning what was logged
    fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || LogBuffer(writer.clone()))
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_directory_dispatch_skips_other_files_with_debug_log() {
        let temp = TempDir::new().unwrap();
        let run = r#"<TestRun><Results><UnitTestResult testName="a"/></Results></TestRun>"#;
        std::fs::write(temp.path().join("run.trx"), run).unwrap();
        std::fs::write(temp.path().join("notes.txt"), run).unwrap();

        let reader = TrxReader::new();
        let mut results: Vec<TestResult> = Vec::new();
        let logs = capture_logs(|| {
            let offered = read_results_dir(temp.path(), false, &[&reader], &mut results).unwrap();
            assert_eq!(offered, 2);
        });

        assert_eq!(results.len(), 1);
        assert!(logs.contains("notes.txt: not a TRX file"), "{}", logs);
        assert!(!logs.contains("run.trx: not a TRX file"), "{}", logs);
    }
}
