//! Service configuration
//!
//! Loaded from a RON file or string. Every field has a default, so an empty
//! `()` document is a valid configuration.
//!
//! ```ron
//! (
//!     database_path: Some("data/bastion.db"),
//!     default_name: "Greyhawk Keep",
//!     completion_clock: TurnCount,
//!     rng_seed: Some(42),
//! )
//! ```

use crate::error::Result;
use bastion_core::{CompletionClock, DEFAULT_CASUALTY_DICE, DEFAULT_TURN_LENGTH_DAYS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for [`BastionService`](crate::BastionService)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BastionConfig {
    /// Database file; `None` keeps everything in memory
    pub database_path: Option<PathBuf>,
    /// Name given to a bastion created on first access
    pub default_name: String,
    /// Real-time length of one turn, used for `completes_at`
    pub turn_length_days: u32,
    /// Which clock decides that an order is due when a turn advances
    pub completion_clock: CompletionClock,
    /// Dice rolled by a casualty check when the caller gives no count
    pub casualty_dice: u32,
    /// Fixed seed for reproducible rolls
    ///
    /// When absent the generator is seeded from the wall clock.
    pub rng_seed: Option<u64>,
}

impl Default for BastionConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            default_name: "My Bastion".to_string(),
            turn_length_days: DEFAULT_TURN_LENGTH_DAYS,
            completion_clock: CompletionClock::default(),
            casualty_dice: DEFAULT_CASUALTY_DICE,
            rng_seed: None,
        }
    }
}

impl BastionConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Read and parse a RON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Same configuration with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Same configuration with a database file
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }
}
