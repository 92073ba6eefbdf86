//! Defender operations

use crate::error::Result;
use crate::service::BastionService;
use bastion_core::{CasualtyReport, Defender, DefenderId, NewDefender};
use tracing::info;

impl BastionService {
    pub fn add_defender(&mut self, new: NewDefender) -> Result<Defender> {
        self.update("add_defender", |b, _, now| b.add_defender(new, now).clone())
    }

    pub fn remove_defender(&mut self, id: DefenderId) -> Result<Option<Defender>> {
        self.apply("remove_defender", |b, _, _| b.remove_defender(id))
    }

    /// Roll casualty dice against the garrison
    ///
    /// `None` rolls the configured number of dice.
    pub fn roll_defender_casualties(&mut self, dice_count: Option<u32>) -> Result<CasualtyReport> {
        let dice_count = dice_count.unwrap_or(self.config().casualty_dice);
        let report = self.update("roll_defender_casualties", |b, rng, _| {
            b.roll_defender_casualties(dice_count, rng)
        })?;
        info!(
            dice = dice_count,
            deaths = report.deaths,
            lost = report.removed.len(),
            "casualties rolled"
        );
        Ok(report)
    }

    /// Remove every temporary defender
    pub fn dismiss_temporary_defenders(&mut self) -> Result<Vec<Defender>> {
        self.update("dismiss_temporary_defenders", |b, _, _| b.dismiss_temporary_defenders())
    }
}
