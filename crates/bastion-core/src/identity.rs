//! Identity types for bastion records
//!
//! Every record embedded in the bastion document gets a numeric id allocated
//! from the aggregate's own counter, so ids stay unique across record kinds
//! and survive a save/load round-trip unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new id
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw id value
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of the bastion aggregate itself
    BastionId,
    "bastion"
);
record_id!(
    /// Identifier of a player character owning facility slots
    OwnerId,
    "owner"
);
record_id!(
    /// Identifier of a facility
    FacilityId,
    "facility"
);
record_id!(HirelingId, "hireling");
record_id!(DefenderId, "defender");
record_id!(OrderId, "order");
record_id!(EventId, "event");
record_id!(TrophyId, "trophy");
record_id!(
    /// Identifier of a gold ledger entry
    TransactionId,
    "tx"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display() {
        assert_eq!(OwnerId::new(3).to_string(), "owner:3");
        assert_eq!(FacilityId::new(12).to_string(), "facility:12");
        assert_eq!(TransactionId::new(1).to_string(), "tx:1");
    }

    #[test]
    fn test_record_id_raw() {
        let id = DefenderId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id, DefenderId(42));
    }
}
