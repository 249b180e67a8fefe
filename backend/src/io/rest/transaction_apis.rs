//! # REST API for Transactions
//!
//! The ledger is append-only, so there is nothing to create or delete here.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::mappers::TransactionMapper;
use super::{error_response, receipt_response};
use crate::AppState;
use shared::{TransactionDto, TransactionListRequest, TransactionListResponse};

/// List transactions with optional search and calendar-day filter
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(request): Query<TransactionListRequest>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", request);

    let service = &state.ledger_service;
    let filter = TransactionMapper::to_filter(request);
    let transactions: Vec<TransactionDto> = service
        .read(|ledger| {
            filter
                .apply(ledger.transactions(), service.calendar())
                .into_iter()
                .map(TransactionMapper::to_dto)
                .collect()
        })
        .await;
    (StatusCode::OK, Json(TransactionListResponse { transactions }))
}

pub async fn download_transaction_receipt(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("GET /api/transactions/{}/receipt", id);

    match state.ledger_service.transaction_receipt(id).await {
        Ok(receipt) => receipt_response(receipt),
        Err(e) => error_response(e),
    }
}
