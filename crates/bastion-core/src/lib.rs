//! Bastion Core - Domain model for a tabletop stronghold
//!
//! This crate provides the pure, storage-free parts of bastion tracking:
//! - Record identities and the `Bastion` aggregate with its invariants
//! - Facility catalog (sizes, level requirements, order options)
//! - Weighted event table with sub-tables
//! - Order lifecycle, turn advancement and recruit side effects
//! - Gold ledger, garrison casualty rolls and a stats projection
//! - Dice notation and a small RNG for flavor rolls
//!
//! Every mutating operation takes the current time explicitly and, when it
//! rolls dice, a [`GameRng`], so callers control both.

mod bastion;
pub mod catalog;
mod dice;
mod error;
pub mod events;
mod garrison;
mod identity;
mod ledger;
pub mod order;
mod records;
mod rng;
mod schedule;
mod stats;
pub mod turn;

pub use bastion::{Bastion, NewFacility, OwnerRemoval};
pub use catalog::{
    facilities_available_at, facility_definition, facility_definition_by_name,
    max_facilities_for_level, FacilityDefinition, FacilitySize, FacilityType, GuildType,
};
pub use dice::{DiceExpr, DiceRoll};
pub use error::{Error, Result};
pub use events::{resolve_event, BastionEvent, EventKind, Language, LocalizedText, RolledEvent};
pub use garrison::{CasualtyReport, DEFAULT_CASUALTY_DICE};
pub use identity::{
    BastionId, DefenderId, EventId, FacilityId, HirelingId, OrderId, OwnerId, TransactionId,
    TrophyId,
};
pub use order::{Order, OrderOption, OrderStatus, OrderType};
pub use records::{
    Defender, DefenderSource, DefenderType, Facility, GoldTransaction, Hireling, NewDefender,
    NewTrophy, Owner, OwnerUpdate, Trophy, OWNER_COLORS,
};
pub use rng::GameRng;
pub use schedule::{OrderCompletion, TurnReport};
pub use stats::BastionStats;
pub use turn::{CompletionClock, Turn, TurnClock, DEFAULT_TURN_LENGTH_DAYS};
