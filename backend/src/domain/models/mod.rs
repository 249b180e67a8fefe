//! Persisted ledger records.
//!
//! These are the shapes written to storage. Field names serialize in
//! camelCase so blobs stay compatible with the collections the admin
//! dashboard has always written (`borrowedAmount`, `expectedReturnDate`, ...).

pub mod application;
pub mod client;
pub mod gallery;
pub mod money;
pub mod transaction;

pub use application::Application;
pub use client::Client;
pub use gallery::GalleryListing;
pub use transaction::Transaction;
