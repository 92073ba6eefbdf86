//! Gold and trophy operations

use crate::error::Result;
use crate::service::BastionService;
use bastion_core::{GoldTransaction, NewTrophy, Trophy, TrophyId};

impl BastionService {
    /// Record a gold movement; the ledger is never clamped
    ///
    /// `None` when the new balance would overflow.
    pub fn add_gold_transaction(
        &mut self,
        amount: i64,
        reason: impl Into<String>,
    ) -> Result<Option<GoldTransaction>> {
        let reason = reason.into();
        self.apply("add_gold_transaction", |b, _, now| {
            b.add_gold_transaction(amount, reason, now).cloned()
        })
    }

    /// Set the balance directly, floored at zero
    ///
    /// The difference is recorded as a ledger entry. `None` when the balance
    /// does not change.
    pub fn update_gold(
        &mut self,
        balance: i64,
        reason: impl Into<String>,
    ) -> Result<Option<GoldTransaction>> {
        let reason = reason.into();
        let tx = self.apply("update_gold", |b, _, now| {
            b.update_gold(balance, reason, now).map(|tx| tx.cloned())
        })?;
        Ok(tx.flatten())
    }

    pub fn add_trophy(&mut self, new: NewTrophy) -> Result<Trophy> {
        self.update("add_trophy", |b, _, now| b.add_trophy(new, now).clone())
    }

    pub fn remove_trophy(&mut self, id: TrophyId) -> Result<Option<Trophy>> {
        self.apply("remove_trophy", |b, _, _| b.remove_trophy(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::{BastionConfig, BastionService};
    use bastion_core::NewTrophy;

    fn service() -> BastionService {
        BastionService::in_memory(BastionConfig::default().with_seed(5)).unwrap()
    }

    #[test]
    fn test_overspend_goes_negative() {
        let mut service = service();
        service.add_gold_transaction(100, "Tithe").unwrap().unwrap();

        let tx = service
            .add_gold_transaction(-150, "overspend")
            .unwrap()
            .unwrap();
        assert_eq!(tx.amount, -150);
        assert_eq!(tx.balance_after, -50);

        let bastion = service.get_or_create_bastion().unwrap();
        assert_eq!(bastion.gold, -50);
        assert_eq!(bastion.ledger.len(), 2);
    }

    #[test]
    fn test_update_gold_clamps_and_records() {
        let mut service = service();
        service.add_gold_transaction(40, "Tolls").unwrap().unwrap();

        let tx = service.update_gold(-10, "Audit").unwrap().unwrap();
        assert_eq!(tx.amount, -40);
        assert_eq!(tx.balance_after, 0);

        assert!(service.update_gold(0, "No change").unwrap().is_none());

        let bastion = service.get_or_create_bastion().unwrap();
        let total: i64 = bastion.ledger.iter().map(|t| t.amount).sum();
        assert_eq!(bastion.gold, total);
        assert_eq!(service.get_bastion_stats().unwrap().gold_spent, 40);
    }

    #[test]
    fn test_overflowing_balance_is_rejected() {
        let mut service = service();
        service
            .add_gold_transaction(i64::MAX, "Dragon hoard")
            .unwrap()
            .unwrap();
        let version = service.get_or_create_bastion().unwrap().version;

        let refused = service.add_gold_transaction(1, "One more coin").unwrap();
        assert!(refused.is_none());

        let bastion = service.get_or_create_bastion().unwrap();
        assert_eq!(bastion.gold, i64::MAX);
        assert_eq!(bastion.ledger.len(), 1);
        assert_eq!(bastion.version, version);
    }

    #[test]
    fn test_trophies() {
        let mut service = service();
        let pelt = service
            .add_trophy(NewTrophy {
                name: "Owlbear pelt".to_string(),
                source: Some("Neverwinter Wood".to_string()),
                estimated_value: Some(120),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(service.get_bastion_stats().unwrap().trophy_value, 120);

        assert_eq!(service.remove_trophy(pelt.id).unwrap(), Some(pelt.clone()));
        assert!(service.remove_trophy(pelt.id).unwrap().is_none());
        assert_eq!(service.get_bastion_stats().unwrap().trophies, 0);
    }
}
