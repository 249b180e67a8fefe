//! # REST API Interface Layer
//!
//! HTTP endpoints for the lending ledger, all under `/api`.
//!
//! - **application_apis**: submit, list, approve, reject
//! - **client_apis**: client lists, payments, defaults, reminders, receipts
//! - **payment_apis**: pending mobile-money prompts
//! - **transaction_apis**: the ledger and transaction receipts
//! - **gallery_apis**: listings for sale
//! - **dashboard_apis**: headline figures and recent notifications
//!
//! Handlers contain no business rules: they map, call the service, and turn
//! a [`LedgerError`] into a status code with [`error_response`].

pub mod application_apis;
pub mod client_apis;
pub mod dashboard_apis;
pub mod gallery_apis;
pub mod mappers;
pub mod payment_apis;
pub mod transaction_apis;

pub use application_apis::*;
pub use client_apis::*;
pub use dashboard_apis::*;
pub use gallery_apis::*;
pub use payment_apis::*;
pub use transaction_apis::*;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;

use crate::domain::error::LedgerError;
use crate::domain::receipt::Receipt;

/// Map a refused operation to its HTTP status with a JSON error body
pub fn error_response(e: LedgerError) -> Response {
    let status = match e {
        LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
        LedgerError::InvalidState(_) => StatusCode::CONFLICT,
        LedgerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

/// Serve a receipt as a plain-text download
pub fn receipt_response(receipt: Receipt) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", receipt.file_name),
            ),
        ],
        receipt.content,
    )
        .into_response()
}
