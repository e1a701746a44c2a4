//! Configuration file (.trxr.conf) parsing and handling
//!
//! The .trxr.conf file uses INI format with a [DEFAULT] section:
//!
//! ```ini
//! [DEFAULT]
//! extensions=trx,xml
//! recursive=true
//! ```

use crate::error::{Error, Result};
use crate::trx::TRX_EXTENSION;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".trxr.conf";

/// Configuration loaded from .trxr.conf
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// File extensions handed to the TRX reader
    pub extensions: Vec<String>,

    /// Descend into subdirectories of results directories
    pub recursive: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            extensions: vec![TRX_EXTENSION.to_string()],
            recursive: false,
        }
    }
}

impl ReaderConfig {
    /// Load configuration from a .trxr.conf file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::parse(&contents)
    }

    /// Load `path` if given, else `.trxr.conf` in `dir` if present, else defaults
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        let default_path = dir.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            Self::load_from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let ini: HashMap<String, HashMap<String, String>> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

        let default = ini.get("DEFAULT").ok_or_else(|| {
            Error::Config(format!("No [DEFAULT] section in {}", CONFIG_FILE_NAME))
        })?;

        let mut config = ReaderConfig::default();

        if let Some(extensions) = default.get("extensions") {
            config.extensions = extensions
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect();
            if config.extensions.is_empty() {
                return Err(Error::Config("extensions cannot be empty".to_string()));
            }
        }

        if let Some(recursive) = default.get("recursive") {
            config.recursive = parse_bool(recursive).ok_or_else(|| {
                Error::Config(format!("recursive must be a boolean, got {:?}", recursive))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
