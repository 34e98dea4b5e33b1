//! Catalog error types.

use thiserror::Error;

/// Errors a catalog source can report.
///
/// Record shape variance is never an error: the normalizer absorbs it. Only
/// getting the payload in the first place can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog could not be reached or answered with a failure status.
    #[error("Catalog fetch failed: {0}")]
    Fetch(String),

    /// The catalog answered but the body was not a JSON array.
    #[error("Catalog payload could not be decoded: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}
