//! Layer identifiers
//!
//! ID Format: `l-{7-char-hash}` (e.g., `l-7f2b4c1`)
//!
//! Hash is derived from the creation timestamp plus a process-wide
//! sequence number, so ids minted in the same instant still differ.
//! Ids only identify layers while editing; they never reach generated CSS.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid layer ID format: expected 'l-{{7-char-hash}}', got '{0}'")]
    InvalidLayerId(String),
}

/// Generates a 7-character hash from a timestamp and sequence number
fn generate_hash(timestamp: DateTime<Utc>, sequence: u64) -> String {
    let input = format!("{}:{}", timestamp.timestamp_nanos_opt().unwrap_or(0), sequence);
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Layer ID in the format `l-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LayerId {
    hash: String,
}

impl LayerId {
    /// Creates a fresh, unique layer ID
    pub fn generate() -> Self {
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self::new(Utc::now(), sequence)
    }

    /// Creates a layer ID from a timestamp and sequence number
    pub fn new(timestamp: DateTime<Utc>, sequence: u64) -> Self {
        Self {
            hash: generate_hash(timestamp, sequence),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l-{}", self.hash)
    }
}

impl FromStr for LayerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hash = s
            .strip_prefix("l-")
            .ok_or_else(|| IdError::InvalidLayerId(s.to_string()))?;

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidLayerId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_ascii_lowercase(),
        })
    }
}

impl TryFrom<String> for LayerId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LayerId> for String {
    fn from(id: LayerId) -> Self {
        id.to_string()
    }
}
