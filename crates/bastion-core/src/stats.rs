//! Read-side summary of a bastion
//!
//! Nothing here is stored; the projection is recomputed from the document
//! on demand.

use crate::bastion::Bastion;
use crate::catalog::FacilitySize;
use crate::turn::Turn;
use serde::{Deserialize, Serialize};

/// Counts and sums across the whole bastion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BastionStats {
    pub current_turn: Turn,
    pub owners: usize,
    pub facilities: usize,
    pub cramped_facilities: usize,
    pub roomy_facilities: usize,
    pub vast_facilities: usize,
    pub hirelings: usize,
    pub hireling_salaries: i64,
    pub defenders: usize,
    pub temporary_defenders: usize,
    pub gold: i64,
    pub gold_earned: i64,
    pub gold_spent: i64,
    pub transactions: usize,
    pub trophies: usize,
    pub trophy_value: i64,
    pub events: usize,
    pub resolved_events: usize,
    pub unresolved_events: usize,
    pub active_orders: usize,
    pub completed_orders: usize,
}

impl Bastion {
    /// Compute the current statistics
    pub fn stats(&self) -> BastionStats {
        let mut stats = BastionStats {
            current_turn: self.current_turn(),
            owners: self.owners.len(),
            facilities: self.facilities.len(),
            hirelings: self.hirelings.len(),
            defenders: self.defenders.len(),
            gold: self.gold,
            transactions: self.ledger.len(),
            trophies: self.trophies.len(),
            events: self.events.len(),
            ..Default::default()
        };

        for facility in self.facilities.values() {
            match facility.size {
                FacilitySize::Cramped => stats.cramped_facilities += 1,
                FacilitySize::Roomy => stats.roomy_facilities += 1,
                FacilitySize::Vast => stats.vast_facilities += 1,
            }
            stats.completed_orders += facility.order_history.len();
        }
        stats.active_orders = self.active_orders().count();

        stats.hireling_salaries = self.hirelings.values().filter_map(|h| h.salary).sum();
        stats.temporary_defenders = self.defenders.values().filter(|d| d.temporary).count();
        (stats.gold_earned, stats.gold_spent) = self.gold_flow();
        stats.trophy_value = self
            .trophies
            .values()
            .filter_map(|t| t.estimated_value)
            .sum();
        stats.resolved_events = self.events.iter().filter(|e| e.resolved).count();
        stats.unresolved_events = stats.events - stats.resolved_events;

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bastion::NewFacility;
    use crate::catalog::{FacilityType, GuildType};
    use crate::order::OrderOption;
    use crate::records::{NewDefender, NewTrophy};
    use crate::rng::GameRng;
    use chrono::Utc;

    #[test]
    fn test_empty_stats() {
        let b = Bastion::new("Empty", Utc::now());
        let stats = b.stats();
        assert_eq!(stats.current_turn, 1);
        assert_eq!(
            stats,
            BastionStats {
                current_turn: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_stats_projection() {
        let now = Utc::now();
        let mut rng = GameRng::new(17);
        let mut b = Bastion::new("Busy Keep", now);

        let owner = b.add_owner("Aria", 17, None, now).id;
        let smithy = b
            .add_facility(NewFacility::new(owner, FacilityType::Smithy), now)
            .unwrap()
            .id;
        b.add_facility(NewFacility::new(owner, FacilityType::Sanctuary), now)
            .unwrap();
        let hall = b
            .add_facility(
                NewFacility::new(owner, FacilityType::Guildhall).with_guild(GuildType::Brewers),
                now,
            )
            .unwrap()
            .id;

        b.add_hireling(smithy, "Tomas", "Smith", Some(3)).unwrap();
        b.add_hireling(hall, "Odo", "Brewer", Some(5)).unwrap();
        b.add_hireling(hall, "Pim", "Apprentice", None).unwrap();

        b.add_gold_transaction(400, "Visitors", now).unwrap();
        b.add_gold_transaction(-150, "Repairs", now).unwrap();

        b.add_defender(NewDefender::hired("Sella"), now);
        b.add_trophy(
            NewTrophy {
                name: "Owlbear pelt".to_string(),
                estimated_value: Some(120),
                ..Default::default()
            },
            now,
        );
        b.add_trophy(
            NewTrophy {
                name: "Goblin banner".to_string(),
                ..Default::default()
            },
            now,
        );

        let craft = OrderOption::Craft {
            item: "Horseshoes".to_string(),
            cost: 0,
            turns: 1,
        };
        b.start_order(smithy, craft.clone(), None, now, 7).unwrap();
        b.complete_order(smithy, None, &mut rng, now).unwrap();
        b.start_order(smithy, craft, None, now, 7).unwrap();

        let stats = b.stats();
        assert_eq!(stats.owners, 1);
        assert_eq!(stats.facilities, 3);
        assert_eq!(stats.cramped_facilities, 1);
        assert_eq!(stats.roomy_facilities, 1);
        assert_eq!(stats.vast_facilities, 1);
        assert_eq!(stats.hirelings, 3);
        assert_eq!(stats.hireling_salaries, 8);
        assert_eq!(stats.gold, 250);
        assert_eq!(stats.gold_earned, 400);
        assert_eq!(stats.gold_spent, 150);
        assert_eq!(stats.defenders, 1);
        assert_eq!(stats.trophies, 2);
        assert_eq!(stats.trophy_value, 120);
        assert_eq!(stats.active_orders, 1);
        assert_eq!(stats.completed_orders, 1);
        // The completion notice is the only event and still needs attention
        assert_eq!(stats.events, 1);
        assert_eq!(stats.unresolved_events, 1);
    }
}
