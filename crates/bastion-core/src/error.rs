//! Error types for bastion-core
//!
//! These are business-rule rejections: the aggregate is left untouched
//! whenever one of them is returned.

use crate::catalog::FacilityType;
use crate::identity::{DefenderId, EventId, FacilityId, HirelingId, OwnerId, TrophyId};
use crate::order::OrderType;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Owner not found: {0}")]
    OwnerNotFound(OwnerId),

    #[error("Facility not found: {0}")]
    FacilityNotFound(FacilityId),

    #[error("Hireling not found: {0}")]
    HirelingNotFound(HirelingId),

    #[error("Defender not found: {0}")]
    DefenderNotFound(DefenderId),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Trophy not found: {0}")]
    TrophyNotFound(TrophyId),

    #[error("Facility limit reached: owner already has {max} facilities")]
    FacilityLimitReached { max: usize },

    #[error("{facility} requires level {required}, owner is level {actual}")]
    LevelTooLow {
        facility: FacilityType,
        required: u8,
        actual: u8,
    },

    #[error("Level {level} allows {max} facilities, owner holds {held}")]
    LevelBelowHoldings { level: u8, max: usize, held: usize },

    #[error("A guildhall needs a guild type")]
    GuildRequired,

    #[error("Facility {0} already has an order in progress")]
    OrderInProgress(FacilityId),

    #[error("Facility {0} has no active order")]
    NoActiveOrder(FacilityId),

    #[error("Order type mismatch: facility takes {expected} orders, got {got}")]
    OrderTypeMismatch { expected: OrderType, got: OrderType },

    #[error("Insufficient gold: cost {cost}, available {available}")]
    InsufficientGold { cost: i64, available: i64 },

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Gold overflow: balance {balance} cannot move by {amount}")]
    GoldOverflow { balance: i64, amount: i64 },

    #[error("Unknown facility: {0}")]
    UnknownFacility(String),

    #[error("Invalid dice notation: {0}")]
    InvalidDice(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
