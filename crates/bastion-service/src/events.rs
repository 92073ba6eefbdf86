//! Event log operations

use crate::error::Result;
use crate::service::BastionService;
use bastion_core::{BastionEvent, EventId};

impl BastionService {
    /// Roll on the event table and log the result
    pub fn roll_event(&mut self) -> Result<BastionEvent> {
        self.update("roll_event", |b, rng, now| b.roll_event(rng, now).clone())
    }

    pub fn resolve_event(&mut self, id: EventId) -> Result<Option<BastionEvent>> {
        self.apply("resolve_event", |b, _, now| b.resolve_event(id, now).cloned())
    }

    pub fn unresolved_events(&self) -> Result<Vec<BastionEvent>> {
        let bastion = self.get_or_create_bastion()?;
        Ok(bastion.unresolved_events().cloned().collect())
    }
}
