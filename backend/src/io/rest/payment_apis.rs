//! # REST API for Pending Mobile Payments

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::error_response;
use super::mappers::TransactionMapper;
use crate::AppState;
use shared::{PendingPaymentDto, PendingPaymentListResponse};

/// Mobile-money prompts still awaiting confirmation
pub async fn list_pending_payments(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/payments/pending");

    let pending_payments: Vec<PendingPaymentDto> = state
        .ledger_service
        .pending_payments()
        .await
        .into_iter()
        .map(TransactionMapper::pending_to_dto)
        .collect();
    (StatusCode::OK, Json(PendingPaymentListResponse { pending_payments }))
}

pub async fn cancel_pending_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    info!("DELETE /api/payments/pending/{}", id);

    match state.ledger_service.cancel_pending_payment(id).await {
        Ok(payment) => (StatusCode::OK, Json(TransactionMapper::pending_to_dto(payment))).into_response(),
        Err(e) => {
            warn!("Cancel of {} refused: {}", id, e);
            error_response(e)
        }
    }
}
