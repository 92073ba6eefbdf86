//! Bastion defenders and casualty rolls

use crate::bastion::Bastion;
use crate::error::{Error, Result};
use crate::identity::DefenderId;
use crate::records::{Defender, NewDefender};
use crate::rng::GameRng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dice rolled for casualties when the bastion is attacked
pub const DEFAULT_CASUALTY_DICE: u32 = 6;

/// Outcome of a casualty roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasualtyReport {
    /// Each d6 result, in roll order
    pub rolls: Vec<u32>,
    /// Number of ones rolled
    pub deaths: usize,
    /// Defenders actually lost; fewer than `deaths` if the garrison ran out
    pub removed: Vec<Defender>,
}

impl Bastion {
    pub fn add_defender(&mut self, new: NewDefender, now: DateTime<Utc>) -> &Defender {
        let id = DefenderId::new(self.allocate_id());
        self.insert_defender(id, new, now)
    }

    pub(crate) fn insert_defender(
        &mut self,
        id: DefenderId,
        new: NewDefender,
        now: DateTime<Utc>,
    ) -> &Defender {
        let defender = Defender {
            id,
            name: new.name,
            defender_type: new.defender_type,
            source: new.source,
            hired_at: now,
            monthly_cost: new.monthly_cost,
            notes: new.notes,
            temporary: new.temporary,
        };
        self.defenders.entry(id).or_insert(defender)
    }

    pub fn remove_defender(&mut self, id: DefenderId) -> Result<Defender> {
        self.defenders
            .shift_remove(&id)
            .ok_or(Error::DefenderNotFound(id))
    }

    /// Roll `dice_count` d6; each 1 kills a defender picked uniformly at random
    pub fn roll_defender_casualties(
        &mut self,
        dice_count: u32,
        rng: &mut GameRng,
    ) -> CasualtyReport {
        let rolls = rng.roll_dice(dice_count, 6);
        let deaths = rolls.iter().filter(|r| **r == 1).count();

        let mut removed = Vec::with_capacity(deaths.min(self.defenders.len()));
        for _ in 0..deaths {
            let Some(index) = rng.pick_index(self.defenders.len()) else {
                break;
            };
            if let Some((_, defender)) = self.defenders.shift_remove_index(index) {
                removed.push(defender);
            }
        }

        CasualtyReport {
            rolls,
            deaths,
            removed,
        }
    }

    /// Send away every temporary defender
    pub fn dismiss_temporary_defenders(&mut self) -> Vec<Defender> {
        let mut dismissed = Vec::new();
        self.defenders.retain(|_, d| {
            if d.temporary {
                dismissed.push(d.clone());
                false
            } else {
                true
            }
        });
        dismissed
    }
}
