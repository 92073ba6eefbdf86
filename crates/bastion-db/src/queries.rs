//! Read-only queries over the stored document.

use crate::error::Result;
use crate::models::*;
use crate::store::Store;
use chrono::{DateTime, Utc};

impl Store {
    /// Version token of the stored document, without decoding it.
    pub fn bastion_version(&self) -> Result<Option<u64>> {
        Ok(self.stored_bastion()?.map(|s| s.version))
    }

    /// When the stored document was last saved.
    pub fn last_saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .stored_bastion()?
            .and_then(|s| DateTime::<Utc>::from_timestamp_millis(s.updated_at_ms)))
    }

    /// Whether a loaded copy is behind the stored document.
    pub fn is_stale(&self, version: u64) -> Result<bool> {
        Ok(self.bastion_version()?.unwrap_or(0) != version)
    }

    fn stored_bastion(&self) -> Result<Option<StoredBastion>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredBastion> = r.get().primary(BASTION_KEY.to_string())?;
        Ok(stored)
    }
}
