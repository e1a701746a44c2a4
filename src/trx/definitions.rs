//! The `TestDefinitions` section
//!
//! Each `<UnitTest>` declares a test once; results refer back to it through
//! the execution id found on its `<Execution>` child.

use super::{
    DESCRIPTION_ELEMENT, EXECUTION_ELEMENT, ID_ATTRIBUTE, KEY_ELEMENT, NAME_ATTRIBUTE,
    PROPERTIES_ELEMENT, PROPERTY_ELEMENT, UNIT_TEST_ELEMENT, VALUE_ELEMENT,
};
use crate::xml::XmlElement;
use std::collections::HashMap;

/// A declared test, as found in `<TestDefinitions>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrxUnitTest {
    pub name: Option<String>,
    pub execution_id: Option<String>,
    pub description: Option<String>,
    pub parameters: HashMap<String, String>,
}

/// Declared tests keyed by execution id.
///
/// Definitions without an execution id all share the `None` key, so only the
/// last of them survives.
pub type UnitTests = HashMap<Option<String>, TrxUnitTest>;

/// Parse every `<UnitTest>` under `<TestDefinitions>`; later ids replace earlier ones.
pub fn parse_test_definitions(definitions: &XmlElement) -> UnitTests {
    let mut tests = UnitTests::new();
    for unit_test_element in definitions.children(UNIT_TEST_ELEMENT) {
        let unit_test = parse_unit_test(unit_test_element);
        tests.insert(unit_test.execution_id.clone(), unit_test);
    }
    tests
}

pub fn parse_unit_test(unit_test_element: &XmlElement) -> TrxUnitTest {
    let name = unit_test_element.attribute(NAME_ATTRIBUTE).map(str::to_string);
    let description = unit_test_element
        .first(DESCRIPTION_ELEMENT)
        .map(XmlElement::value);
    let execution_id = unit_test_element
        .first(EXECUTION_ELEMENT)
        .and_then(|execution| execution.attribute(ID_ATTRIBUTE))
        .map(str::to_string);

    TrxUnitTest {
        name,
        execution_id,
        description,
        parameters: parse_properties(unit_test_element),
    }
}

/// Collect `<Properties><Property><Key/><Value/></Property></Properties>`.
///
/// A property lacking either its key or its value is skipped.
pub fn parse_properties(unit_test_element: &XmlElement) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    let Some(properties_element) = unit_test_element.first(PROPERTIES_ELEMENT) else {
        return properties;
    };

    for property_element in properties_element.children(PROPERTY_ELEMENT) {
        let key = property_element.first(KEY_ELEMENT).map(XmlElement::value);
        let value = property_element.first(VALUE_ELEMENT).map(XmlElement::value);
        if let (Some(key), Some(value)) = (key, value) {
            properties.insert(key, value);
        }
    }
    properties
}
