//! # IO Module
//!
//! Adapter layer between HTTP clients and the ledger. Requests are translated
//! into domain operations on the [`LedgerService`](crate::domain::LedgerService)
//! and results are mapped back into the DTOs of the `shared` crate.
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum, with state injected through extractors
//! - **Serialization**: Serde JSON, plus `text/plain` downloads for receipts
//! - **Error Handling**: domain errors mapped to 404 / 409 / 400

pub mod rest;

pub use rest::*;
