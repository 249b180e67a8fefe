//! # Storage Module
//!
//! Persists the four ledger collections. The domain layer never talks to a
//! database directly: it hands whole collections to the [`PersistenceGateway`],
//! which serializes them as JSON arrays into a [`KeyValueStore`].
//!
//! ## Layout
//!
//! - **traits**: the key-value abstraction the gateway writes through
//! - **sqlite**: SQLite implementation backed by a `key_values` table
//! - **gateway**: typed load/save of applications, clients, transactions and
//!   gallery listings, including first-run seeding

pub mod gateway;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use gateway::{Collection, PersistenceGateway};
pub use sqlite::DbConnection;
pub use traits::KeyValueStore;
