//! Owned XML element tree
//!
//! Format readers navigate documents through [`XmlElement`] rather than
//! through `quick-xml` events, so the TRX logic only ever sees element
//! names, attributes, children and text.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8};
use quick_xml::encoding::{decode, detect_encoding};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// A child of an element: either a nested element or a run of text
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(XmlElement),
    Text(String),
}

/// A parsed XML element with its attributes and children
///
/// Names are local names: a namespace prefix such as `t:` in `<t:TestRun>`
/// is dropped, and namespace declarations are not reported as attributes.
///
/// # Examples
///
/// ```
/// use trx_reader::xml::XmlElement;
///
/// # fn main() -> trx_reader::error::Result<()> {
/// let root = XmlElement::parse_str(
///     r#"<Results><UnitTestResult testName="a"/><UnitTestResult testName="b"/></Results>"#,
/// )?;
/// assert_eq!(root.name(), "Results");
///
/// let names: Vec<_> = root
///     .children("UnitTestResult")
///     .filter_map(|r| r.attribute("testName"))
///     .collect();
/// assert_eq!(names, vec!["a", "b"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    nodes: Vec<Node>,
}

impl XmlElement {
    /// Parse a complete document held in memory, returning its root element.
    ///
    /// A leading byte-order mark is ignored. Malformed markup, unbalanced
    /// tags, a missing root or more than one root element are errors.
    pub fn parse_str(xml: &str) -> Result<XmlElement> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(Error::Parse(format!(
                            "unexpected second root element at position {}",
                            reader.buffer_position()
                        )));
                    }
                    stack.push(Self::from_start(&reader, &start)?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&reader, &start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        Error::Parse(format!(
                            "unexpected closing tag at position {}",
                            reader.buffer_position()
                        ))
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    match stack.last_mut() {
                        Some(parent) => parent.nodes.push(Node::Text(text.into_owned())),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(Error::Parse(
                                "text content outside of the root element".to_string(),
                            ))
                        }
                    }
                }
                Event::CData(cdata) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                        parent.nodes.push(Node::Text(text));
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::Parse(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| Error::Parse("document has no root element".to_string()))
    }

    /// Read and parse a document from disk.
    ///
    /// The bytes are decoded according to a byte-order mark, or else the
    /// `encoding` named in the XML declaration, falling back to UTF-8.
    pub fn parse_file(path: &Path) -> Result<XmlElement> {
        let bytes = fs::read(path)?;
        Self::parse_str(&decode_document(&bytes)?)
    }

    fn from_start(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<XmlElement> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let raw_key = attr.key.as_ref();
            if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.decode_and_unescape_value(reader)?.into_owned();
            attributes.push((key, value));
        }

        Ok(XmlElement {
            name,
            attributes,
            nodes: Vec::new(),
        })
    }

    /// Returns the local name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child element with the given name, if any.
    pub fn first(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Iterate over all child elements with the given name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// Iterate over all child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Returns the text content of this element and all of its descendants.
    pub fn value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Turn the raw bytes of a document into text
fn decode_document(bytes: &[u8]) -> Result<String> {
    let (encoding, bom_len) = match detect_encoding(bytes) {
        Some((encoding, bom_len)) if encoding != UTF_8 => (encoding, bom_len),
        Some((_, bom_len)) => (
            declared_encoding(&bytes[bom_len..]).unwrap_or(UTF_8),
            bom_len,
        ),
        None => (UTF_8, 0),
    };
    Ok(decode(&bytes[bom_len..], encoding)?.into_owned())
}

/// The encoding named by `<?xml ... encoding="..."?>`, if it is one we can
/// apply to an ASCII-compatible byte stream
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let mut reader = Reader::from_reader(bytes);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => decl
            .encoder()
            .filter(|encoding| encoding.is_ascii_compatible()),
        _ => None,
    }
}

/// Hand a completed element to its parent, or make it the document root
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.nodes.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::Parse(format!(
            "unexpected second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}
