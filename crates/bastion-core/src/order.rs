//! Facility orders
//!
//! An order occupies a facility's single order slot. Its lifecycle is
//! `none -> in progress -> completed`: completed orders are archived to the
//! facility's history and the slot is cleared.

use crate::error::{Error, Result};
use crate::identity::OrderId;
use crate::turn::{turns_duration, CompletionClock, Turn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of work an order performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Craft,
    Trade,
    Recruit,
    Research,
    Harvest,
    Empower,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::Craft => "craft",
            OrderType::Trade => "trade",
            OrderType::Recruit => "recruit",
            OrderType::Research => "research",
            OrderType::Harvest => "harvest",
            OrderType::Empower => "empower",
        };
        f.write_str(name)
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    InProgress,
    Completed,
}

/// A selectable order, tagged by order type
///
/// Catalog entries and custom orders share this type; type, price and
/// duration always come from the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderOption {
    Craft { item: String, cost: i64, turns: u32 },
    Harvest {
        product: String,
        cost: i64,
        turns: u32,
    },
    Trade {
        goods: String,
        cost: i64,
        turns: u32,
    },
    Research { topic: String, turns: u32 },
    Empower { benefit: String, turns: u32 },
    Recruit { unit: String, cost: i64, turns: u32 },
}

impl OrderOption {
    /// The order type this option belongs to
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderOption::Craft { .. } => OrderType::Craft,
            OrderOption::Harvest { .. } => OrderType::Harvest,
            OrderOption::Trade { .. } => OrderType::Trade,
            OrderOption::Research { .. } => OrderType::Research,
            OrderOption::Empower { .. } => OrderType::Empower,
            OrderOption::Recruit { .. } => OrderType::Recruit,
        }
    }

    /// Gold paid when the order starts
    pub fn cost(&self) -> i64 {
        match self {
            OrderOption::Craft { cost, .. }
            | OrderOption::Harvest { cost, .. }
            | OrderOption::Trade { cost, .. }
            | OrderOption::Recruit { cost, .. } => *cost,
            OrderOption::Research { .. } | OrderOption::Empower { .. } => 0,
        }
    }

    /// Number of bastion turns the order takes
    pub fn turns(&self) -> u32 {
        match self {
            OrderOption::Craft { turns, .. }
            | OrderOption::Harvest { turns, .. }
            | OrderOption::Trade { turns, .. }
            | OrderOption::Research { turns, .. }
            | OrderOption::Empower { turns, .. }
            | OrderOption::Recruit { turns, .. } => *turns,
        }
    }

    /// Short display label
    pub fn label(&self) -> &str {
        match self {
            OrderOption::Craft { item, .. } => item,
            OrderOption::Harvest { product, .. } => product,
            OrderOption::Trade { goods, .. } => goods,
            OrderOption::Research { topic, .. } => topic,
            OrderOption::Empower { benefit, .. } => benefit,
            OrderOption::Recruit { unit, .. } => unit,
        }
    }
}

/// A timed task occupying a facility's order slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub description: String,
    pub start_turn: Turn,
    pub turns_required: u32,
    pub gold_cost: i64,
    /// Catalog option the order was started from, if any
    pub option: Option<OrderOption>,
    pub started_at: DateTime<Utc>,
    /// Wall-clock due time
    pub completes_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<String>,
}

impl Order {
    /// Build an in-progress order from a selected option
    ///
    /// Fails when the option's duration cannot be placed on the calendar.
    pub fn from_option(
        id: OrderId,
        option: OrderOption,
        description: Option<String>,
        start_turn: Turn,
        now: DateTime<Utc>,
        turn_length_days: u32,
    ) -> Result<Self> {
        let turns_required = option.turns();
        let completes_at = turns_duration(turns_required, turn_length_days)
            .and_then(|span| now.checked_add_signed(span))
            .ok_or_else(|| {
                Error::InvalidOrder(format!("{} turns is beyond the calendar", turns_required))
            })?;
        Ok(Self {
            id,
            order_type: option.order_type(),
            status: OrderStatus::InProgress,
            description: description.unwrap_or_else(|| option.label().to_string()),
            start_turn,
            turns_required,
            gold_cost: option.cost(),
            started_at: now,
            completes_at,
            completed_at: None,
            result: None,
            option: Some(option),
        })
    }

    /// Whether the order is still running
    pub fn is_in_progress(&self) -> bool {
        self.status == OrderStatus::InProgress
    }

    /// Turn at which the order is due, capped at the last representable turn
    pub fn due_turn(&self) -> Turn {
        self.start_turn.saturating_add(self.turns_required)
    }

    /// Turns left before the order is due, as shown to players
    pub fn turns_remaining(&self, current_turn: Turn) -> u32 {
        self.due_turn().saturating_sub(current_turn)
    }

    /// Whether an in-progress order is due under the given clock
    pub fn is_due(&self, clock: CompletionClock, current_turn: Turn, now: DateTime<Utc>) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        match clock {
            CompletionClock::WallClock => self.completes_at <= now,
            CompletionClock::TurnCount => current_turn >= self.due_turn(),
        }
    }

    /// Mark the order completed
    pub fn complete(&mut self, result: Option<String>, now: DateTime<Utc>) {
        self.status = OrderStatus::Completed;
        self.completed_at = Some(now);
        if result.is_some() {
            self.result = result;
        }
    }
}
