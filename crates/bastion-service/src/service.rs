//! The bastion service
//!
//! Every mutation is a read-modify-write of the whole document: load (or
//! create) the bastion, apply one domain operation, save with the version
//! check. A business-rule rejection leaves the stored document untouched and
//! is reported as `Ok(None)`.

use crate::config::BastionConfig;
use crate::error::Result;
use bastion_core::{
    facilities_available_at, Bastion, BastionStats, DiceExpr, DiceRoll, FacilityDefinition,
    GameRng, OwnerId,
};
use bastion_db::Store;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Repository and operations for the singleton bastion
pub struct BastionService {
    store: Store,
    config: BastionConfig,
    rng: GameRng,
}

impl BastionService {
    /// Build a service over an existing store
    pub fn new(store: Store, config: BastionConfig) -> Self {
        let rng = config
            .rng_seed
            .map(GameRng::new)
            .unwrap_or_else(GameRng::from_entropy);
        Self { store, config, rng }
    }

    /// Open the store named by the configuration
    ///
    /// Without a `database_path` the store lives in memory.
    pub fn open(config: BastionConfig) -> Result<Self> {
        let store = match &config.database_path {
            Some(path) => Store::open(path)?,
            None => Store::in_memory()?,
        };
        Ok(Self::new(store, config))
    }

    /// In-memory service, whatever the configured path
    pub fn in_memory(config: BastionConfig) -> Result<Self> {
        Ok(Self::new(Store::in_memory()?, config))
    }

    pub fn config(&self) -> &BastionConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // =========================================================================
    // Repository
    // =========================================================================

    /// Load the stored bastion, creating and saving an empty one on first use
    pub fn get_or_create_bastion(&self) -> Result<Bastion> {
        if let Some(bastion) = self.store.load_bastion()? {
            debug!(version = bastion.version, "loaded bastion");
            return Ok(bastion);
        }

        let mut bastion = Bastion::new(self.config.default_name.clone(), Utc::now());
        self.store.save_bastion(&mut bastion)?;
        info!(name = %bastion.name, "created bastion");
        Ok(bastion)
    }

    /// Save a whole document
    ///
    /// Fails with a version conflict if `bastion` was loaded before the last
    /// save. On success its version and `updated_at` match the stored copy.
    pub fn save_bastion(&self, bastion: &mut Bastion) -> Result<()> {
        self.store.save_bastion(bastion)?;
        Ok(())
    }

    /// When the stored bastion was last saved; `None` before the first save
    pub fn last_saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.store.last_saved_at()?)
    }

    /// Whether `bastion` was loaded before the latest save
    ///
    /// Saving a stale copy fails with a version conflict.
    pub fn is_stale(&self, bastion: &Bastion) -> Result<bool> {
        Ok(self.store.is_stale(bastion.version)?)
    }

    /// Apply a rule-checked operation and save the result
    pub(crate) fn apply<T>(
        &mut self,
        action: &'static str,
        op: impl FnOnce(&mut Bastion, &mut GameRng, DateTime<Utc>) -> bastion_core::Result<T>,
    ) -> Result<Option<T>> {
        let mut bastion = self.get_or_create_bastion()?;
        match op(&mut bastion, &mut self.rng, Utc::now()) {
            Ok(value) => {
                self.store.save_bastion(&mut bastion)?;
                info!(action, version = bastion.version, "bastion updated");
                Ok(Some(value))
            }
            Err(rejection) => {
                warn!(action, %rejection, "bastion operation rejected");
                Ok(None)
            }
        }
    }

    /// Apply an operation that always succeeds and save the result
    pub(crate) fn update<T>(
        &mut self,
        action: &'static str,
        op: impl FnOnce(&mut Bastion, &mut GameRng, DateTime<Utc>) -> T,
    ) -> Result<T> {
        let mut bastion = self.get_or_create_bastion()?;
        let value = op(&mut bastion, &mut self.rng, Utc::now());
        self.store.save_bastion(&mut bastion)?;
        info!(action, version = bastion.version, "bastion updated");
        Ok(value)
    }

    // =========================================================================
    // Details
    // =========================================================================

    /// Rename and/or relocate the bastion
    pub fn update_details(
        &mut self,
        name: Option<String>,
        location: Option<String>,
    ) -> Result<Bastion> {
        self.update("update_details", |b, _, _| {
            b.update_details(name, location);
        })?;
        self.get_or_create_bastion()
    }

    pub fn update_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        let notes = notes.into();
        self.update("update_notes", |b, _, _| b.set_notes(notes))
    }

    // =========================================================================
    // Read side
    // =========================================================================

    pub fn get_bastion_stats(&self) -> Result<BastionStats> {
        Ok(self.get_or_create_bastion()?.stats())
    }

    /// Catalog entries an owner's level qualifies for
    ///
    /// `None` if the owner is unknown. Free slots are not considered.
    pub fn available_facilities(
        &self,
        owner_id: OwnerId,
    ) -> Result<Option<Vec<FacilityDefinition>>> {
        let bastion = self.get_or_create_bastion()?;
        Ok(bastion
            .owners
            .get(&owner_id)
            .map(|owner| facilities_available_at(owner.level)))
    }

    /// Roll a dice expression such as `2d6+1`
    ///
    /// Bad notation is a caller error, not a rule rejection, so it is
    /// returned as `Err`.
    pub fn roll_dice(&mut self, notation: &str) -> Result<DiceRoll> {
        let expr: DiceExpr = notation.parse()?;
        let roll = expr.roll(&mut self.rng);
        debug!(%expr, total = roll.total, min = expr.min(), max = expr.max(), "rolled dice");
        Ok(roll)
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Serialize the stored bastion as pretty JSON
    pub fn export_json(&self) -> Result<String> {
        let bastion = self.get_or_create_bastion()?;
        Ok(serde_json::to_string_pretty(&bastion)?)
    }

    /// Replace the stored bastion with a JSON backup
    ///
    /// The backup's own version is ignored; it is saved on top of whatever
    /// is stored now.
    pub fn import_json(&mut self, json: &str) -> Result<Bastion> {
        let mut bastion: Bastion = serde_json::from_str(json)?;
        bastion.version = self.store.bastion_version()?.unwrap_or(0);
        self.store.save_bastion(&mut bastion)?;
        info!(name = %bastion.name, version = bastion.version, "imported bastion");
        Ok(bastion)
    }
}
