//! Database models for persistent storage.

mod bastion;

pub use bastion::*;
