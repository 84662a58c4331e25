//! Fixture loading
//!
//! A fixture is a JSON array of [`ValidationRecord`]s. It is read once and
//! handed back as an owned `Vec`; nothing is cached globally.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One fixture entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Host or URI to check
    #[serde(default)]
    pub host: String,
    /// Whether the URI check demands an http/https scheme
    #[serde(default)]
    pub required_scheme: bool,
    /// Bare path to check
    #[serde(default)]
    pub path: String,
    /// Base64 certificate body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    /// Base64 private key body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkey: Option<String>,
}

/// Errors raised while loading a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The file could not be read
    #[error("failed to read fixture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of records
    #[error("failed to decode fixture {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode records from a JSON string
pub fn parse_records(json: &str) -> Result<Vec<ValidationRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and decode the fixture at `path`
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ValidationRecord>, FixtureError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&json).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
