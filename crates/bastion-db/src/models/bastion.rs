//! Bastion document model for database storage.

use crate::error::{Error, Result};
use bastion_core::Bastion;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Primary key of the single bastion row.
pub const BASTION_KEY: &str = "bastion";

/// Stored bastion document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredBastion {
    /// Always "bastion" - single row.
    #[primary_key]
    pub id: String,
    /// Version token of the serialized document.
    pub version: u64,
    /// Last save, in milliseconds since the Unix epoch.
    pub updated_at_ms: i64,
    /// Serialized aggregate.
    pub data: Vec<u8>,
}

impl StoredBastion {
    /// Create from a bastion.
    pub fn from_bastion(bastion: &Bastion) -> Result<Self> {
        let data =
            bincode::serialize(bastion).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(Self {
            id: BASTION_KEY.to_string(),
            version: bastion.version,
            updated_at_ms: bastion.updated_at.timestamp_millis(),
            data,
        })
    }

    /// Convert to a bastion.
    pub fn to_bastion(&self) -> Result<Bastion> {
        bincode::deserialize(&self.data).map_err(|e| Error::Serialization(e.to_string()))
    }
}
