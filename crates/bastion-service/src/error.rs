//! Error types for bastion-service
//!
//! Business-rule rejections are not errors here: operations report them as
//! `Ok(None)`. These variants are hard failures of storage or input.

use thiserror::Error;

/// Result type for bastion-service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bastion-service
#[derive(Debug, Error)]
pub enum Error {
    /// Storage error
    #[error("storage error: {0}")]
    Store(#[from] bastion_db::Error),

    /// Core error surfaced directly, e.g. bad dice notation
    #[error("core error: {0}")]
    Core(#[from] bastion_core::Error),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid RON
    #[error("config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Backup document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
