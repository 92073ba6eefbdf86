//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use bastion_core::Bastion;
use chrono::{DateTime, Utc};
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredBastion>().unwrap();
    models
});

/// Database store for the bastion document.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Builder::new()
            .create(&MODELS, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        debug!(path = %path.display(), "opened bastion database");
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Load the bastion document, if one has been saved.
    pub fn load_bastion(&self) -> Result<Option<Bastion>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredBastion> = r.get().primary(BASTION_KEY.to_string())?;
        stored.map(|s| s.to_bastion()).transpose()
    }

    /// Save the whole bastion document.
    ///
    /// The caller's `version` must match the stored one (0 when nothing is
    /// stored yet). On success the caller's copy gets the new version and
    /// `updated_at`, so it stays equal to what was written.
    pub fn save_bastion(&self, bastion: &mut Bastion) -> Result<()> {
        self.save_bastion_at(bastion, Utc::now())
    }

    pub(crate) fn save_bastion_at(&self, bastion: &mut Bastion, now: DateTime<Utc>) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredBastion> = rw.get().primary(BASTION_KEY.to_string())?;
        let found = stored.map(|s| s.version).unwrap_or(0);
        if found != bastion.version {
            warn!(
                expected = bastion.version,
                found, "refusing to overwrite a newer bastion document"
            );
            return Err(Error::VersionConflict {
                expected: bastion.version,
                found,
            });
        }

        let mut next = bastion.clone();
        next.version = found + 1;
        next.updated_at = now;
        rw.upsert(StoredBastion::from_bastion(&next)?)?;
        rw.commit()?;

        debug!(version = next.version, "saved bastion document");
        *bastion = next;
        Ok(())
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
