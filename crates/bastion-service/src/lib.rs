//! Bastion Service - Repository and operations for a persisted bastion
//!
//! This crate wires the domain model in `bastion-core` to the document store
//! in `bastion-db`:
//!
//! - **Repository**: `get_or_create_bastion` / `save_bastion` over the single
//!   stored document, with a version check on every save
//! - **Operations**: owners, facilities, hirelings, orders, turns, gold,
//!   defenders, events and trophies, each a load-apply-save cycle
//! - **Configuration**: RON file with defaults for every setting
//! - **Backup**: JSON export and import of the whole bastion
//!
//! Business-rule rejections come back as `Ok(None)` (or `false`) and leave
//! the stored bastion unchanged; `Err` is reserved for storage, config and
//! input failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use bastion_core::{FacilityType, NewFacility};
//! use bastion_service::{BastionConfig, BastionService};
//!
//! let mut service = BastionService::open(BastionConfig::load("bastion.ron")?)?;
//! let owner = service.add_owner("Aria", 5, None)?;
//! let garden = service.add_facility(NewFacility::new(owner.id, FacilityType::Garden))?;
//! if garden.is_none() {
//!     println!("no room for another facility");
//! }
//! let report = service.advance_turn()?;
//! ```

mod config;
mod error;
mod events;
mod garrison;
mod orders;
mod owners;
mod service;
mod treasury;

pub use config::BastionConfig;
pub use error::{Error, Result};
pub use service::BastionService;
