//! Dice random number generator
//!
//! Uses a simple xorshift64 algorithm. Bastion rolls are flavor randomness,
//! so the generator is seeded from the wall clock in normal use and from a
//! fixed seed in tests to make rolls reproducible.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A small, non-cryptographic random number generator for dice rolls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // xorshift gets stuck on a zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG seeded from the current time
    pub fn from_entropy() -> Self {
        let now = Utc::now();
        let nanos = now.timestamp_subsec_nanos() as u64;
        let secs = now.timestamp() as u64;
        Self::new(secs.rotate_left(32) ^ nanos.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Get the current state
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Roll a single die with the given number of sides, in `[1, sides]`
    ///
    /// A die with fewer than one side always rolls 1.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        if sides <= 1 {
            return 1;
        }
        (self.next_u64() % sides as u64) as u32 + 1
    }

    /// Roll `count` independent dice
    pub fn roll_dice(&mut self, count: u32, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.roll_die(sides)).collect()
    }

    /// Pick a uniform index into a collection of `len` elements
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some((self.next_u64() % len as u64) as usize)
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
