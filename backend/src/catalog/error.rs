//! Error types for catalog fetches.

use super::source::CacheKey;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A failed catalog fetch.
///
/// `Clone` so one failure can be replayed to every caller that shares the
/// cached fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The document could not be read.
    #[error("Failed to read {key} catalog: {message}")]
    Io { key: CacheKey, message: String },

    /// The document was read but is not a list of lectures.
    #[error("Failed to decode {key} catalog: {message}")]
    Decode { key: CacheKey, message: String },

    /// The source has no document for this key.
    #[error("No {key} catalog available: {message}")]
    Unavailable { key: CacheKey, message: String },
}

impl CatalogError {
    pub fn key(&self) -> CacheKey {
        match self {
            CatalogError::Io { key, .. }
            | CatalogError::Decode { key, .. }
            | CatalogError::Unavailable { key, .. } => *key,
        }
    }
}
