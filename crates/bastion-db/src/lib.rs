//! Bastion DB - Local document store using native_db
//!
//! Persists the bastion aggregate as a single document:
//! - One row keyed `"bastion"` holding the serialized aggregate
//! - A version token checked on every save (optimistic concurrency)
//! - Read-only queries over the stored row

mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use store::Store;
