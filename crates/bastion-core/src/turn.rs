//! Turn-based time for the bastion
//!
//! - `Turn` - Bastion turn number, starting at 1
//! - `TurnClock` - Current turn and when it started on the wall clock
//! - `CompletionClock` - Which clock decides that an order is finished

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A bastion turn number
pub type Turn = u32;

/// One bastion turn is a week of in-world time by default
pub const DEFAULT_TURN_LENGTH_DAYS: u32 = 7;

/// Which clock decides when an in-progress order is due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompletionClock {
    /// Due once the wall-clock `completes_at` has passed
    #[default]
    WallClock,
    /// Due once `current_turn >= start_turn + turns_required`
    TurnCount,
}

/// Bastion turn clock state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnClock {
    /// Current turn number
    pub turn: Turn,
    /// When the current turn started
    pub started_at: DateTime<Utc>,
}

impl TurnClock {
    /// Create a clock at turn 1
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            turn: 1,
            started_at: now,
        }
    }

    /// Advance to the next turn, restarting the turn timer
    pub fn advance(&mut self, now: DateTime<Utc>) -> Turn {
        self.turn = self.turn.saturating_add(1);
        self.started_at = now;
        self.turn
    }
}

/// Wall-clock length of `turns` bastion turns
///
/// `None` when the span does not fit in a [`Duration`].
pub fn turns_duration(turns: u32, turn_length_days: u32) -> Option<Duration> {
    i64::from(turns)
        .checked_mul(i64::from(turn_length_days))
        .and_then(Duration::try_days)
}
