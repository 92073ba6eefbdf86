//! The bastion aggregate
//!
//! One `Bastion` document holds every owner, facility, hireling, defender,
//! event, trophy and ledger entry. Operations here enforce the aggregate's
//! invariants and either apply completely or return an [`Error`] without
//! touching the document.

use crate::catalog::{
    clamp_owner_level, facility_definition, max_facilities_for_level, FacilityType, GuildType,
};
use crate::error::{Error, Result};
use crate::events::{roll_event, BastionEvent};
use crate::identity::{BastionId, DefenderId, EventId, FacilityId, HirelingId, OwnerId, TrophyId};
use crate::records::{
    Defender, Facility, GoldTransaction, Hireling, NewTrophy, Owner, OwnerUpdate, Trophy,
    OWNER_COLORS,
};
use crate::rng::GameRng;
use crate::turn::{Turn, TurnClock};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The player-controlled stronghold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bastion {
    pub id: BastionId,
    pub name: String,
    pub location: String,
    /// Running balance; always equals the sum of the ledger amounts
    pub gold: i64,
    pub ledger: Vec<GoldTransaction>,
    pub clock: TurnClock,
    pub owners: IndexMap<OwnerId, Owner>,
    pub facilities: IndexMap<FacilityId, Facility>,
    pub hirelings: IndexMap<HirelingId, Hireling>,
    pub defenders: IndexMap<DefenderId, Defender>,
    pub events: Vec<BastionEvent>,
    pub trophies: IndexMap<TrophyId, Trophy>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency token, bumped by every successful save
    pub version: u64,
    next_id: u64,
}

/// Fields supplied when adding a facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFacility {
    pub owner_id: OwnerId,
    pub facility_type: FacilityType,
    pub custom_name: Option<String>,
    pub guild: Option<GuildType>,
}

impl NewFacility {
    pub fn new(owner_id: OwnerId, facility_type: FacilityType) -> Self {
        Self {
            owner_id,
            facility_type,
            custom_name: None,
            guild: None,
        }
    }

    pub fn with_guild(mut self, guild: GuildType) -> Self {
        self.guild = Some(guild);
        self
    }
}

/// Everything removed along with an owner
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerRemoval {
    pub owner: Owner,
    pub facilities: Vec<Facility>,
    pub hirelings: Vec<Hireling>,
}

impl Bastion {
    /// Create an empty bastion at turn 1 with no gold
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: BastionId::new(1),
            name: name.into(),
            location: String::new(),
            gold: 0,
            ledger: Vec::new(),
            clock: TurnClock::new(now),
            owners: IndexMap::new(),
            facilities: IndexMap::new(),
            hirelings: IndexMap::new(),
            defenders: IndexMap::new(),
            events: Vec::new(),
            trophies: IndexMap::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
            version: 0,
            next_id: 1,
        }
    }

    /// Current turn number
    pub fn current_turn(&self) -> Turn {
        self.clock.turn
    }

    /// Allocate a record id unique within this bastion
    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // =========================================================================
    // Details
    // =========================================================================

    /// Rename and/or relocate the bastion
    pub fn update_details(&mut self, name: Option<String>, location: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(location) = location {
            self.location = location;
        }
    }

    /// Replace the free-text notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    // =========================================================================
    // Owners
    // =========================================================================

    /// Add an owner; the level is clamped into the owner range and the first
    /// unused palette color is assigned
    pub fn add_owner(
        &mut self,
        name: impl Into<String>,
        level: u8,
        class: Option<String>,
        now: DateTime<Utc>,
    ) -> &Owner {
        let level = clamp_owner_level(level);
        let id = OwnerId::new(self.allocate_id());
        let owner = Owner {
            id,
            name: name.into(),
            level,
            class,
            max_facilities: max_facilities_for_level(level),
            color: self.next_owner_color(),
            created_at: now,
        };
        self.owners.entry(id).or_insert(owner)
    }

    fn next_owner_color(&self) -> String {
        OWNER_COLORS
            .iter()
            .find(|color| !self.owners.values().any(|o| o.color == **color))
            .copied()
            .unwrap_or(OWNER_COLORS[self.owners.len() % OWNER_COLORS.len()])
            .to_string()
    }

    /// Merge a partial update into an owner
    ///
    /// A level that would leave the owner holding more facilities than it
    /// allows is refused and nothing is changed.
    pub fn update_owner(&mut self, id: OwnerId, update: OwnerUpdate) -> Result<&Owner> {
        if !self.owners.contains_key(&id) {
            return Err(Error::OwnerNotFound(id));
        }
        let level = update.level.map(clamp_owner_level);
        if let Some(level) = level {
            let max = max_facilities_for_level(level);
            let held = self.facilities_of(id).count();
            if held > max {
                return Err(Error::LevelBelowHoldings { level, max, held });
            }
        }

        let owner = self.owners.get_mut(&id).ok_or(Error::OwnerNotFound(id))?;
        if let Some(name) = update.name {
            owner.name = name;
        }
        if let Some(level) = level {
            owner.set_level(level);
        }
        if let Some(class) = update.class {
            owner.class = Some(class);
        }
        Ok(&*owner)
    }

    /// Remove an owner together with their facilities and those facilities'
    /// hirelings
    pub fn remove_owner(&mut self, id: OwnerId) -> Result<OwnerRemoval> {
        let owner = self
            .owners
            .shift_remove(&id)
            .ok_or(Error::OwnerNotFound(id))?;

        let facility_ids: Vec<FacilityId> = self.facilities_of(id).map(|f| f.id).collect();
        let mut facilities = Vec::with_capacity(facility_ids.len());
        let mut hirelings = Vec::new();
        for facility_id in facility_ids {
            if let Some(facility) = self.facilities.shift_remove(&facility_id) {
                hirelings.extend(self.remove_hirelings_of(facility_id));
                facilities.push(facility);
            }
        }

        Ok(OwnerRemoval {
            owner,
            facilities,
            hirelings,
        })
    }

    // =========================================================================
    // Facilities
    // =========================================================================

    /// Facilities held by an owner
    pub fn facilities_of(&self, owner_id: OwnerId) -> impl Iterator<Item = &Facility> {
        self.facilities
            .values()
            .filter(move |f| f.owner_id == owner_id)
    }

    /// Add a facility after checking the owner's slot cap, level and, for a
    /// guildhall, the guild type
    pub fn add_facility(&mut self, new: NewFacility, now: DateTime<Utc>) -> Result<&Facility> {
        let owner = self
            .owners
            .get(&new.owner_id)
            .ok_or(Error::OwnerNotFound(new.owner_id))?;

        if self.facilities_of(owner.id).count() >= owner.max_facilities {
            return Err(Error::FacilityLimitReached {
                max: owner.max_facilities,
            });
        }

        let definition = facility_definition(new.facility_type);
        if owner.level < definition.min_level {
            return Err(Error::LevelTooLow {
                facility: new.facility_type,
                required: definition.min_level,
                actual: owner.level,
            });
        }

        let guild = if definition.requires_guild {
            Some(new.guild.ok_or(Error::GuildRequired)?)
        } else {
            None
        };

        let id = FacilityId::new(self.allocate_id());
        let facility = Facility {
            id,
            owner_id: new.owner_id,
            facility_type: new.facility_type,
            custom_name: new.custom_name,
            size: definition.size,
            guild,
            current_order: None,
            order_history: Vec::new(),
            built_turn: self.current_turn(),
            built_at: now,
        };
        Ok(&*self.facilities.entry(id).or_insert(facility))
    }

    /// Remove a facility and its hirelings
    pub fn remove_facility(&mut self, id: FacilityId) -> Result<(Facility, Vec<Hireling>)> {
        let facility = self
            .facilities
            .shift_remove(&id)
            .ok_or(Error::FacilityNotFound(id))?;
        let hirelings = self.remove_hirelings_of(id);
        Ok((facility, hirelings))
    }

    /// Set or clear a facility's custom display name
    pub fn rename_facility(&mut self, id: FacilityId, name: Option<String>) -> Result<&Facility> {
        let facility = self
            .facilities
            .get_mut(&id)
            .ok_or(Error::FacilityNotFound(id))?;
        facility.custom_name = name.filter(|n| !n.trim().is_empty());
        Ok(&*facility)
    }

    // =========================================================================
    // Hirelings
    // =========================================================================

    /// Attach a hireling to an existing facility
    pub fn add_hireling(
        &mut self,
        facility_id: FacilityId,
        name: impl Into<String>,
        role: impl Into<String>,
        salary: Option<i64>,
    ) -> Result<&Hireling> {
        if !self.facilities.contains_key(&facility_id) {
            return Err(Error::FacilityNotFound(facility_id));
        }
        let id = HirelingId::new(self.allocate_id());
        let hireling = Hireling {
            id,
            facility_id,
            name: name.into(),
            role: role.into(),
            salary,
        };
        Ok(&*self.hirelings.entry(id).or_insert(hireling))
    }

    pub fn remove_hireling(&mut self, id: HirelingId) -> Result<Hireling> {
        self.hirelings
            .shift_remove(&id)
            .ok_or(Error::HirelingNotFound(id))
    }

    /// Hirelings working in a facility
    pub fn hirelings_of(&self, facility_id: FacilityId) -> impl Iterator<Item = &Hireling> {
        self.hirelings
            .values()
            .filter(move |h| h.facility_id == facility_id)
    }

    fn remove_hirelings_of(&mut self, facility_id: FacilityId) -> Vec<Hireling> {
        let mut removed = Vec::new();
        self.hirelings.retain(|_, h| {
            if h.facility_id == facility_id {
                removed.push(h.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Roll on the event table and log the result at the current turn
    pub fn roll_event(&mut self, rng: &mut GameRng, now: DateTime<Utc>) -> &BastionEvent {
        let rolled = roll_event(rng);
        let id = EventId::new(self.allocate_id());
        let event = BastionEvent::from_roll(id, self.current_turn(), rolled, now);
        self.push_event(event)
    }

    pub(crate) fn push_event(&mut self, event: BastionEvent) -> &BastionEvent {
        let index = self.events.len();
        self.events.push(event);
        &self.events[index]
    }

    /// Mark an event as resolved
    pub fn resolve_event(&mut self, id: EventId, now: DateTime<Utc>) -> Result<&BastionEvent> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::EventNotFound(id))?;
        event.resolve(now);
        Ok(&*event)
    }

    /// Events still waiting for the players
    pub fn unresolved_events(&self) -> impl Iterator<Item = &BastionEvent> {
        self.events.iter().filter(|e| !e.resolved)
    }

    // =========================================================================
    // Trophies
    // =========================================================================

    pub fn add_trophy(&mut self, new: NewTrophy, now: DateTime<Utc>) -> &Trophy {
        let id = TrophyId::new(self.allocate_id());
        let trophy = Trophy {
            id,
            name: new.name,
            description: new.description,
            source: new.source,
            acquired_at: now,
            estimated_value: new.estimated_value,
        };
        self.trophies.entry(id).or_insert(trophy)
    }

    pub fn remove_trophy(&mut self, id: TrophyId) -> Result<Trophy> {
        self.trophies
            .shift_remove(&id)
            .ok_or(Error::TrophyNotFound(id))
    }
}
