//! Records embedded in the bastion document

use crate::catalog::{max_facilities_for_level, FacilitySize, FacilityType, GuildType};
use crate::identity::{DefenderId, FacilityId, HirelingId, OwnerId, TransactionId, TrophyId};
use crate::order::Order;
use crate::turn::Turn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display colors handed out to owners, in order
pub const OWNER_COLORS: [&str; 8] = [
    "#c0392b", "#2980b9", "#27ae60", "#8e44ad", "#d35400", "#16a085", "#f1c40f", "#7f8c8d",
];

/// A player character holding facility slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub level: u8,
    pub class: Option<String>,
    /// Derived from `level`
    pub max_facilities: usize,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Owner {
    /// Change the owner's level, keeping the slot cap in step
    pub fn set_level(&mut self, level: u8) {
        self.level = level;
        self.max_facilities = max_facilities_for_level(level);
    }
}

/// Partial update applied by `update_owner`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnerUpdate {
    pub name: Option<String>,
    pub level: Option<u8>,
    pub class: Option<String>,
}

/// A building slot owned by exactly one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub owner_id: OwnerId,
    pub facility_type: FacilityType,
    pub custom_name: Option<String>,
    pub size: FacilitySize,
    /// Only set on a guildhall
    pub guild: Option<GuildType>,
    pub current_order: Option<Order>,
    /// Completed orders, oldest first
    pub order_history: Vec<Order>,
    pub built_turn: Turn,
    pub built_at: DateTime<Utc>,
}

impl Facility {
    /// Custom name if set, catalog name otherwise
    pub fn display_name(&self) -> &str {
        self.custom_name
            .as_deref()
            .unwrap_or_else(|| self.facility_type.name())
    }

    /// Whether an order currently occupies the slot
    pub fn is_busy(&self) -> bool {
        self.current_order
            .as_ref()
            .is_some_and(|order| order.is_in_progress())
    }
}

/// Staff attached to a facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hireling {
    pub id: HirelingId,
    pub facility_id: FacilityId,
    pub name: String,
    pub role: String,
    pub salary: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderType {
    Hired,
    Mercenary,
}

/// Where a defender came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderSource {
    Barracks,
    Guest,
    Hired,
    Other,
}

/// A garrison unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defender {
    pub id: DefenderId,
    pub name: String,
    pub defender_type: DefenderType,
    pub source: DefenderSource,
    pub hired_at: DateTime<Utc>,
    pub monthly_cost: Option<i64>,
    pub notes: Option<String>,
    /// Leaves the bastion when temporary defenders are dismissed
    pub temporary: bool,
}

/// Fields supplied when adding a defender by hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDefender {
    pub name: String,
    pub defender_type: DefenderType,
    pub source: DefenderSource,
    pub monthly_cost: Option<i64>,
    pub notes: Option<String>,
    pub temporary: bool,
}

impl NewDefender {
    /// A permanent hired defender with no upkeep recorded
    pub fn hired(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defender_type: DefenderType::Hired,
            source: DefenderSource::Hired,
            monthly_cost: None,
            notes: None,
            temporary: false,
        }
    }
}

/// A named collectible kept in the bastion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trophy {
    pub id: TrophyId,
    pub name: String,
    pub description: Option<String>,
    pub source: Option<String>,
    pub acquired_at: DateTime<Utc>,
    pub estimated_value: Option<i64>,
}

/// Fields supplied when adding a trophy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTrophy {
    pub name: String,
    pub description: Option<String>,
    pub source: Option<String>,
    pub estimated_value: Option<i64>,
}

/// Immutable gold ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldTransaction {
    pub id: TransactionId,
    /// Positive for income, negative for spending
    pub amount: i64,
    pub reason: String,
    pub turn: Turn,
    pub balance_after: i64,
    pub recorded_at: DateTime<Utc>,
}
