//! Errors shared between Skyboard crates.
//!
//! Config plumbing uses `anyhow`; the weather client and dashboard keep their
//! own error enums next to the code that raises them.

use thiserror::Error;

/// Local persistence errors (favorites).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {key}: {message}")]
    ReadFailed { key: String, message: String },

    #[error("Failed to write {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("Stored value for {key} is corrupt: {message}")]
    Corrupt { key: String, message: String },
}
