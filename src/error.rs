//! Error types for trx-reader

use std::io;
use thiserror::Error;

/// Result type alias for trx-reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for trx-reader
///
/// Only structural problems are errors. Missing attributes, missing
/// elements and malformed timestamps degrade to absent values instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is well-formed at the token level but not as a tree.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Other error with custom message.
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
