//! # Domain Module
//!
//! Business rules of the livestock lending ledger.
//!
//! ## Layout
//!
//! - **models**: persisted records (applications, clients, transactions, listings)
//!   and money arithmetic
//! - **ledger**: the application → client → transaction state machine
//! - **gallery**: listings for sale and their images
//! - **queries**: due-today, overdue, search and filter views, dashboard figures
//! - **receipt**: plain-text receipts
//! - **sample_data**: first-run fixtures
//! - **notifications**: operator notifications
//! - **ledger_service**: async orchestration, write-through and mobile-money
//!   confirmations
//!
//! Nothing in here knows about HTTP. Everything below `ledger_service` is
//! synchronous and takes the current instant as an argument.

pub mod calendar;
pub mod commands;
pub mod error;
pub mod gallery;
pub mod ledger;
pub mod ledger_service;
pub mod models;
pub mod notifications;
pub mod queries;
pub mod receipt;
pub mod sample_data;

pub use calendar::{BusinessCalendar, Clock, FixedClock, SystemClock};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use ledger_service::{LedgerService, LedgerSettings};
pub use notifications::{NotificationFeed, Notifier};
