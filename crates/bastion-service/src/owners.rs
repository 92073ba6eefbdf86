//! Owner, facility and hireling operations

use crate::error::Result;
use crate::service::BastionService;
use bastion_core::{
    Facility, FacilityId, Hireling, HirelingId, NewFacility, Owner, OwnerId, OwnerRemoval,
    OwnerUpdate,
};

impl BastionService {
    // =========================================================================
    // Owners
    // =========================================================================

    /// Add an owner with the first unused color
    pub fn add_owner(
        &mut self,
        name: impl Into<String>,
        level: u8,
        class: Option<String>,
    ) -> Result<Owner> {
        let name = name.into();
        self.update("add_owner", |b, _, now| b.add_owner(name, level, class, now).clone())
    }

    /// Merge a partial update; the slot cap follows a level change
    pub fn update_owner(&mut self, id: OwnerId, update: OwnerUpdate) -> Result<Option<Owner>> {
        self.apply("update_owner", |b, _, _| b.update_owner(id, update).cloned())
    }

    /// Remove an owner with their facilities and those facilities' hirelings
    pub fn remove_owner(&mut self, id: OwnerId) -> Result<Option<OwnerRemoval>> {
        self.apply("remove_owner", |b, _, _| b.remove_owner(id))
    }

    // =========================================================================
    // Facilities
    // =========================================================================

    /// Build a facility for an owner
    ///
    /// `None` when the owner is unknown, out of slots, below the facility's
    /// level, or building a guildhall without a guild.
    pub fn add_facility(&mut self, new: NewFacility) -> Result<Option<Facility>> {
        self.apply("add_facility", |b, _, now| b.add_facility(new, now).cloned())
    }

    /// Remove a facility and its hirelings
    pub fn remove_facility(&mut self, id: FacilityId) -> Result<Option<(Facility, Vec<Hireling>)>> {
        self.apply("remove_facility", |b, _, _| b.remove_facility(id))
    }

    pub fn rename_facility(
        &mut self,
        id: FacilityId,
        name: Option<String>,
    ) -> Result<Option<Facility>> {
        self.apply("rename_facility", |b, _, _| b.rename_facility(id, name).cloned())
    }

    // =========================================================================
    // Hirelings
    // =========================================================================

    pub fn add_hireling(
        &mut self,
        facility_id: FacilityId,
        name: impl Into<String>,
        role: impl Into<String>,
        salary: Option<i64>,
    ) -> Result<Option<Hireling>> {
        let (name, role) = (name.into(), role.into());
        self.apply("add_hireling", |b, _, _| {
            b.add_hireling(facility_id, name, role, salary).cloned()
        })
    }

    pub fn remove_hireling(&mut self, id: HirelingId) -> Result<Option<Hireling>> {
        self.apply("remove_hireling", |b, _, _| b.remove_hireling(id))
    }

    /// Hirelings working in a facility; empty for an unknown facility
    pub fn hirelings_of(&self, facility_id: FacilityId) -> Result<Vec<Hireling>> {
        let bastion = self.get_or_create_bastion()?;
        Ok(bastion.hirelings_of(facility_id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BastionConfig, BastionService};
    use bastion_core::{FacilityType, GuildType, NewFacility, OwnerId, OwnerUpdate};

    fn service() -> BastionService {
        BastionService::in_memory(BastionConfig::default().with_seed(3)).unwrap()
    }

    #[test]
    fn test_owner_lifecycle() {
        let mut service = service();
        let aria = service
            .add_owner("Aria", 5, Some("Ranger".to_string()))
            .unwrap();
        let bram = service.add_owner("Bram", 12, None).unwrap();
        assert_ne!(aria.color, bram.color);
        assert_eq!(aria.max_facilities, 2);
        assert_eq!(bram.max_facilities, 4);

        let updated = service
            .update_owner(
                aria.id,
                OwnerUpdate {
                    level: Some(13),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.level, 13);
        assert_eq!(updated.max_facilities, 5);
        assert_eq!(updated.class.as_deref(), Some("Ranger"));

        assert!(service
            .update_owner(OwnerId::new(404), OwnerUpdate::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_slot_limit_scenario() {
        let mut service = service();
        let owner = service.add_owner("Aria", 5, None).unwrap().id;

        for ty in [FacilityType::Garden, FacilityType::Library] {
            assert!(service
                .add_facility(NewFacility::new(owner, ty))
                .unwrap()
                .is_some());
        }
        let version = service.get_or_create_bastion().unwrap().version;

        let third = service
            .add_facility(NewFacility::new(owner, FacilityType::Smithy))
            .unwrap();
        assert!(third.is_none());

        let bastion = service.get_or_create_bastion().unwrap();
        assert_eq!(bastion.facilities_of(owner).count(), 2);
        assert_eq!(bastion.version, version);
    }

    #[test]
    fn test_facility_rules() {
        let mut service = service();
        let owner = service.add_owner("Aria", 17, None).unwrap().id;

        let missing_owner = service
            .add_facility(NewFacility::new(OwnerId::new(77), FacilityType::Garden))
            .unwrap();
        assert!(missing_owner.is_none());

        let no_guild = service
            .add_facility(NewFacility::new(owner, FacilityType::Guildhall))
            .unwrap();
        assert!(no_guild.is_none());

        let hall = service
            .add_facility(
                NewFacility::new(owner, FacilityType::Guildhall).with_guild(GuildType::Brewers),
            )
            .unwrap()
            .unwrap();
        assert_eq!(hall.guild, Some(GuildType::Brewers));

        let low = service.add_owner("Pip", 5, None).unwrap().id;
        let too_low = service
            .add_facility(NewFacility::new(low, FacilityType::WarRoom))
            .unwrap();
        assert!(too_low.is_none());
        assert_eq!(service.get_or_create_bastion().unwrap().facilities.len(), 1);
    }

    #[test]
    fn test_rename_facility() {
        let mut service = service();
        let owner = service.add_owner("Aria", 5, None).unwrap().id;
        let garden = service
            .add_facility(NewFacility::new(owner, FacilityType::Garden))
            .unwrap()
            .unwrap();

        let renamed = service
            .rename_facility(garden.id, Some("Moonpetal Beds".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(renamed.display_name(), "Moonpetal Beds");

        let cleared = service.rename_facility(garden.id, None).unwrap().unwrap();
        assert_eq!(cleared.display_name(), "Garden");
    }

    #[test]
    fn test_cascading_removals() {
        let mut service = service();
        let aria = service.add_owner("Aria", 9, None).unwrap().id;
        let bram = service.add_owner("Bram", 5, None).unwrap().id;

        let library = service
            .add_facility(NewFacility::new(aria, FacilityType::Library))
            .unwrap()
            .unwrap()
            .id;
        let garden = service
            .add_facility(NewFacility::new(aria, FacilityType::Garden))
            .unwrap()
            .unwrap()
            .id;
        let forge = service
            .add_facility(NewFacility::new(bram, FacilityType::Smithy))
            .unwrap()
            .unwrap()
            .id;

        service
            .add_hireling(library, "Quill", "Scribe", Some(2))
            .unwrap()
            .unwrap();
        service
            .add_hireling(garden, "Fern", "Gardener", None)
            .unwrap()
            .unwrap();
        let smith = service
            .add_hireling(forge, "Tomas", "Smith", Some(3))
            .unwrap()
            .unwrap();

        let (removed, hirelings) = service.remove_facility(garden).unwrap().unwrap();
        assert_eq!(removed.id, garden);
        assert_eq!(hirelings.len(), 1);

        let removal = service.remove_owner(aria).unwrap().unwrap();
        assert_eq!(removal.facilities.len(), 1);
        assert_eq!(removal.hirelings.len(), 1);

        let bastion = service.get_or_create_bastion().unwrap();
        assert_eq!(bastion.owners.len(), 1);
        assert_eq!(bastion.facilities.len(), 1);
        assert_eq!(bastion.hirelings.len(), 1);
        assert!(bastion.hirelings.contains_key(&smith.id));

        assert!(service.remove_owner(aria).unwrap().is_none());
    }

    #[test]
    fn test_hireling_needs_facility() {
        let mut service = service();
        let owner = service.add_owner("Aria", 5, None).unwrap().id;
        let garden = service
            .add_facility(NewFacility::new(owner, FacilityType::Garden))
            .unwrap()
            .unwrap()
            .id;
        let (gone, _) = service.remove_facility(garden).unwrap().unwrap();

        assert!(service
            .add_hireling(gone.id, "Fern", "Gardener", None)
            .unwrap()
            .is_none());

        let other = service
            .add_facility(NewFacility::new(owner, FacilityType::Garden))
            .unwrap()
            .unwrap()
            .id;
        let fern = service
            .add_hireling(other, "Fern", "Gardener", None)
            .unwrap()
            .unwrap();
        assert_eq!(service.hirelings_of(other).unwrap(), vec![fern.clone()]);
        assert!(service.hirelings_of(garden).unwrap().is_empty());

        assert_eq!(service.remove_hireling(fern.id).unwrap(), Some(fern.clone()));
        assert!(service.remove_hireling(fern.id).unwrap().is_none());
        assert!(service.hirelings_of(other).unwrap().is_empty());
    }

    #[test]
    fn test_level_drop_below_holdings_is_rejected() {
        let mut service = service();
        let owner = service.add_owner("Aria", 9, None).unwrap().id;
        for ty in [FacilityType::Garden, FacilityType::Library, FacilityType::Smithy] {
            service
                .add_facility(NewFacility::new(owner, ty))
                .unwrap()
                .unwrap();
        }
        let before = service.get_or_create_bastion().unwrap();

        let demoted = service
            .update_owner(
                owner,
                OwnerUpdate {
                    level: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(demoted.is_none());
        assert_eq!(service.get_or_create_bastion().unwrap(), before);
    }
}
