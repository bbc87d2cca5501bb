//! # Record Model
//!
//! The typed view of one authorization or price-feed JSON document.
//!
//! Only the three checked fields are modeled. Everything else in the
//! document is ignored, so registry entries may carry extra metadata
//! without tripping the linter. A field that is present with the wrong JSON
//! type (a numeric `name`, an `address` that is a list) makes the whole
//! document uninterpretable and surfaces as [`RecordError::Parse`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Failure to turn a file into a [`Record`].
#[derive(Error, Debug)]
pub enum RecordError {
    /// The file could not be read.
    #[error("cannot read file: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not have the record shape.
    #[error("invalid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl RecordError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// One registry document.
///
/// Absent and `null` fields both deserialize to `None`. A top-level key
/// repeated in the document is a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `(network, address)` pairs in document order. A network repeated
    /// inside `address` keeps its first position and its last value.
    #[serde(default, deserialize_with = "network_addresses")]
    pub address: Option<Vec<(String, String)>>,
}

/// Read the `address` object without losing the order networks appear in.
fn network_addresses<'de, D>(deserializer: D) -> Result<Option<Vec<(String, String)>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(map) = Option::<serde_json::Map<String, Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    map.into_iter()
        .map(|(network, value)| match value {
            Value::String(address) => Ok((network, address)),
            other => Err(<D::Error as serde::de::Error>::custom(format!(
                "address.{network}: expected a string, found {other}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

impl Record {
    /// Read and parse the record stored at `path`.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RecordError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The record name, or the empty string when absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Address entries in document order. Empty when `address` is absent.
    pub fn addresses(&self) -> impl Iterator<Item = (&str, &str)> {
        self.address
            .iter()
            .flatten()
            .map(|(network, address)| (network.as_str(), address.as_str()))
    }
}

/// Length of `s` in characters, the unit all field bounds are expressed in.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
