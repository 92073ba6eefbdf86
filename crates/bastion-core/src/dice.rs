//! Dice notation
//!
//! Parses and rolls the usual tabletop notation: `NdM`, `dM`, `NdM+K` and
//! `NdM-K`.

use crate::error::{Error, Result};
use crate::rng::GameRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest number of dice accepted in a single expression
pub const MAX_DICE: u32 = 100;

/// Largest die accepted in a single expression
pub const MAX_SIDES: u32 = 1000;

/// A parsed dice expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

/// The outcome of rolling a [`DiceExpr`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub expr: DiceExpr,
    /// Individual die results, in roll order
    pub rolls: Vec<u32>,
    pub total: i64,
}

impl DiceExpr {
    /// Create an expression without a modifier
    pub const fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            modifier: 0,
        }
    }

    /// Attach a flat modifier
    pub const fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Smallest possible total
    pub fn min(&self) -> i64 {
        self.count as i64 + self.modifier as i64
    }

    /// Largest possible total
    pub fn max(&self) -> i64 {
        self.count as i64 * self.sides as i64 + self.modifier as i64
    }

    /// Roll the expression
    pub fn roll(&self, rng: &mut GameRng) -> DiceRoll {
        let rolls = rng.roll_dice(self.count, self.sides);
        let total = rolls.iter().map(|r| *r as i64).sum::<i64>() + self.modifier as i64;
        DiceRoll {
            expr: *self,
            rolls,
            total,
        }
    }
}

impl FromStr for DiceExpr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDice(s.to_string());
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let lower = compact.to_ascii_lowercase();

        let (count_part, rest) = lower.split_once('d').ok_or_else(invalid)?;
        let count = if count_part.is_empty() {
            1
        } else {
            count_part.parse::<u32>().map_err(|_| invalid())?
        };

        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(pos) => {
                let (sides, modifier) = rest.split_at(pos);
                let modifier = modifier.parse::<i32>().map_err(|_| invalid())?;
                (sides, modifier)
            }
            None => (rest, 0),
        };
        let sides = sides_part.parse::<u32>().map_err(|_| invalid())?;

        if count == 0 || count > MAX_DICE || sides == 0 || sides > MAX_SIDES {
            return Err(invalid());
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}
