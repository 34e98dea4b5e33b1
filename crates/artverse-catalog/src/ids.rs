//! Asset identifiers.
//!
//! An asset is addressed by its contract and token, joined as
//! `"<contract_address>:<token_id>"`. The newtype keeps that string from being
//! mixed up with names or other free text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one NFT within a catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Create an ID from an already joined string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Join a contract address and token id.
    pub fn from_parts(contract_address: &str, token_id: &str) -> Self {
        Self(format!("{}:{}", contract_address, token_id))
    }

    /// The contract address part (everything before the first `:`).
    pub fn contract_address(&self) -> &str {
        self.0.split_once(':').map(|(c, _)| c).unwrap_or(&self.0)
    }

    /// The token id part (everything after the first `:`).
    pub fn token_id(&self) -> &str {
        self.0.split_once(':').map(|(_, t)| t).unwrap_or("")
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring test used by the token-id filter.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
