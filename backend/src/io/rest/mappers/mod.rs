//! Conversions between domain records and the DTOs in `shared`.
//!
//! Derived figures (expected amount, balance, day counts) are computed here,
//! at read time, and never stored.

pub mod application_mapper;
pub mod client_mapper;
pub mod dashboard_mapper;
pub mod gallery_mapper;
pub mod transaction_mapper;

pub use application_mapper::ApplicationMapper;
pub use client_mapper::ClientMapper;
pub use dashboard_mapper::DashboardMapper;
pub use gallery_mapper::GalleryMapper;
pub use transaction_mapper::TransactionMapper;
