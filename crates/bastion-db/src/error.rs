//! Store errors.
//!
//! Every variant is a hard failure: nothing here reflects a bastion rule.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// native_db failed to open, read or commit.
    #[error("bastion store unavailable: {0}")]
    Database(String),

    /// The stored bytes are not a bastion document, or a document could not
    /// be encoded.
    #[error("bastion document could not be encoded or decoded: {0}")]
    Serialization(String),

    /// A save was attempted from a copy loaded before the last save.
    #[error("bastion was saved elsewhere: loaded version {expected}, stored version {found}")]
    VersionConflict { expected: u64, found: u64 },

    /// The database directory could not be created.
    #[error("bastion store I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
