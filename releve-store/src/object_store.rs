//! The opaque key/value blob-store capability the pipeline writes through.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },
    #[error("access to {bucket}/{key} denied")]
    Unauthorized { bucket: String, key: String },
    #[error("malformed content in {bucket}/{key}: {reason}")]
    Malformed {
        bucket: String,
        key: String,
        reason: String,
    },
    #[error("store I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("store transport: {0}")]
    Transport(String),
}

/// Minimal object-store surface: everything the import pipeline needs.
///
/// `head` reports absence as `Ok(false)` — a missing object is the
/// legitimate first-write state, never an error. `get` on a missing object
/// is `Err(NotFound)`. Authorization failures surface as `Unauthorized`
/// rather than being logged and swallowed.
pub trait ObjectStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
    fn head(&self, bucket: &str, key: &str) -> Result<bool, StoreError>;
    fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}
