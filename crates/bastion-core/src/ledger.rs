//! Gold ledger
//!
//! The ledger is authoritative: every change to the balance is an appended
//! transaction and the balance always equals the sum of their amounts.
//! Ledger transactions are never clamped, so spending past zero leaves the
//! bastion in debt. Only a directly set balance is floored at zero.
//! A movement that would overflow the balance is refused.

use crate::bastion::Bastion;
use crate::error::{Error, Result};
use crate::identity::TransactionId;
use crate::records::GoldTransaction;
use chrono::{DateTime, Utc};

impl Bastion {
    /// Append a transaction and move the balance by `amount`
    pub fn add_gold_transaction(
        &mut self,
        amount: i64,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<&GoldTransaction> {
        let balance = self.gold.checked_add(amount).ok_or(Error::GoldOverflow {
            balance: self.gold,
            amount,
        })?;

        let id = TransactionId::new(self.allocate_id());
        self.gold = balance;
        let tx = GoldTransaction {
            id,
            amount,
            reason: reason.into(),
            turn: self.current_turn(),
            balance_after: balance,
            recorded_at: now,
        };
        let index = self.ledger.len();
        self.ledger.push(tx);
        Ok(&self.ledger[index])
    }

    /// Set the balance directly, floored at zero
    ///
    /// The difference is recorded as an adjustment transaction; returns
    /// `None` when the balance does not change.
    pub fn update_gold(
        &mut self,
        balance: i64,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<&GoldTransaction>> {
        let target = balance.max(0);
        let delta = target.checked_sub(self.gold).ok_or(Error::GoldOverflow {
            balance: self.gold,
            amount: target,
        })?;
        if delta == 0 {
            return Ok(None);
        }
        self.add_gold_transaction(delta, reason, now).map(Some)
    }

    /// Whether the bastion can pay `cost` without going into debt
    pub fn can_afford(&self, cost: i64) -> bool {
        cost <= self.gold
    }

    /// Total income and total spending recorded in the ledger
    ///
    /// Both totals saturate rather than wrap.
    pub fn gold_flow(&self) -> (i64, i64) {
        self.ledger.iter().fold((0i64, 0i64), |(earned, spent), tx| {
            if tx.amount >= 0 {
                (earned.saturating_add(tx.amount), spent)
            } else {
                (earned, spent.saturating_sub(tx.amount))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bastion() -> Bastion {
        Bastion::new("Ledger Hall", Utc::now())
    }

    #[test]
    fn test_transaction_moves_balance() {
        let mut b = bastion();
        let now = Utc::now();

        let tx = b.add_gold_transaction(250, "Treasure", now).unwrap();
        assert_eq!(tx.balance_after, 250);
        assert_eq!(tx.turn, 1);

        let before = b.gold;
        let tx = b.add_gold_transaction(-40, "Repairs", now).unwrap().clone();
        assert_eq!(b.gold, before - 40);
        assert_eq!(tx.balance_after, b.gold);
        assert_eq!(b.ledger.len(), 2);
    }

    #[test]
    fn test_overspend_is_not_clamped() {
        let mut b = bastion();
        let now = Utc::now();
        b.add_gold_transaction(100, "Seed money", now).unwrap();

        let tx = b.add_gold_transaction(-150, "overspend", now).unwrap();
        assert_eq!(tx.balance_after, -50);
        assert_eq!(b.gold, -50);
    }

    #[test]
    fn test_overflowing_transaction_is_refused() {
        let mut b = bastion();
        let now = Utc::now();
        b.add_gold_transaction(i64::MAX, "Dragon hoard", now)
            .unwrap();
        let before = b.clone();

        let err = b.add_gold_transaction(1, "One more coin", now).unwrap_err();
        assert_eq!(
            err,
            Error::GoldOverflow {
                balance: i64::MAX,
                amount: 1
            }
        );
        assert_eq!(b, before);

        b.add_gold_transaction(-1, "Spent a coin", now).unwrap();
        let sum = b
            .ledger
            .iter()
            .try_fold(0i64, |acc, tx| acc.checked_add(tx.amount));
        assert_eq!(sum, Some(b.gold));
    }

    #[test]
    fn test_update_gold_from_deep_debt_is_refused() {
        let mut b = bastion();
        let now = Utc::now();
        b.add_gold_transaction(i64::MIN, "Cursed debt", now)
            .unwrap();

        let err = b.update_gold(10, "Forgiven", now).unwrap_err();
        assert!(matches!(err, Error::GoldOverflow { .. }));
        assert_eq!(b.gold, i64::MIN);
        assert_eq!(b.ledger.len(), 1);
    }

    #[test]
    fn test_update_gold_clamps_and_records_delta() {
        let mut b = bastion();
        let now = Utc::now();
        b.add_gold_transaction(100, "Seed money", now).unwrap();

        let tx = b
            .update_gold(-20, "Manual correction", now)
            .unwrap()
            .unwrap();
        assert_eq!(tx.amount, -100);
        assert_eq!(tx.balance_after, 0);
        assert_eq!(b.gold, 0);

        assert!(b.update_gold(0, "No change", now).unwrap().is_none());
        assert_eq!(b.ledger.len(), 2);
    }

    #[test]
    fn test_balance_matches_ledger_sum() {
        let mut b = bastion();
        let now = Utc::now();
        b.add_gold_transaction(500, "Income", now).unwrap();
        b.add_gold_transaction(-750, "Big purchase", now).unwrap();
        b.update_gold(300, "Reset", now).unwrap();
        b.add_gold_transaction(-10, "Tip", now).unwrap();

        let sum: i64 = b.ledger.iter().map(|tx| tx.amount).sum();
        assert_eq!(b.gold, sum);
    }

    #[test]
    fn test_gold_flow_and_affordability() {
        let mut b = bastion();
        let now = Utc::now();
        b.add_gold_transaction(300, "Visitors", now).unwrap();
        b.add_gold_transaction(-120, "Wages", now).unwrap();

        assert_eq!(b.gold_flow(), (300, 120));
        assert!(b.can_afford(180));
        assert!(!b.can_afford(181));
    }
}
