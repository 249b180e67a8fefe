//! # REST API for Clients
//!
//! Client lists with derived figures, and the operations on a running loan:
//! payments, mobile-money prompts, default, reminders and receipts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};

use super::mappers::{ClientMapper, GalleryMapper, TransactionMapper};
use super::{error_response, receipt_response};
use crate::domain::notifications::messages;
use crate::domain::queries;
use crate::AppState;
use shared::{
    ClientListRequest, ClientListResponse, ClientView, MarkDefaultedResponse, MobilePaymentRequest,
    RecordPaymentRequest, RecordPaymentResponse, ReminderResponse,
};

/// List clients matching the optional search, status and due date
pub async fn list_clients(
    State(state): State<AppState>,
    Query(request): Query<ClientListRequest>,
) -> impl IntoResponse {
    info!("GET /api/clients - query: {:?}", request);

    let service = &state.ledger_service;
    let now = service.now();
    let filter = ClientMapper::to_filter(request);
    let clients: Vec<ClientView> = service
        .read(|ledger| {
            filter
                .apply(ledger.clients(), now, service.calendar())
                .into_iter()
                .map(|c| ClientMapper::to_view(c, now))
                .collect()
        })
        .await;
    (StatusCode::OK, Json(ClientListResponse { clients }))
}

pub async fn list_due_today(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/clients/due-today");

    let service = &state.ledger_service;
    let now = service.now();
    let clients: Vec<ClientView> = service
        .read(|ledger| {
            queries::due_today(ledger.clients(), now, service.calendar())
                .into_iter()
                .map(|c| ClientMapper::to_view(c, now))
                .collect()
        })
        .await;
    (StatusCode::OK, Json(ClientListResponse { clients }))
}

pub async fn list_overdue(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/clients/overdue");

    let service = &state.ledger_service;
    let now = service.now();
    let clients: Vec<ClientView> = service
        .read(|ledger| {
            queries::overdue(ledger.clients(), now)
                .into_iter()
                .map(|c| ClientMapper::to_view(c, now))
                .collect()
        })
        .await;
    (StatusCode::OK, Json(ClientListResponse { clients }))
}

pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<RecordPaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/clients/{}/payments - {} by {}", id, request.amount, request.method);

    match state
        .ledger_service
        .record_payment(id, request.amount, &request.method)
        .await
    {
        Ok(outcome) => {
            let response = RecordPaymentResponse {
                client: ClientMapper::to_view(&outcome.client, state.ledger_service.now()),
                success_message: messages::payment_processed(outcome.transaction.amount),
                transaction: TransactionMapper::to_dto(&outcome.transaction),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Payment for client {} refused: {}", id, e);
            error_response(e)
        }
    }
}

/// Send a mobile-money prompt; the payment lands once it is confirmed
pub async fn request_mobile_payment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<MobilePaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/clients/{}/mpesa - {}", id, request.amount);

    match state
        .ledger_service
        .request_mobile_payment(id, request.amount)
        .await
    {
        Ok(pending) => (
            StatusCode::ACCEPTED,
            Json(TransactionMapper::pending_to_dto(pending)),
        )
            .into_response(),
        Err(e) => {
            warn!("Mobile payment for client {} refused: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn mark_defaulted(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("POST /api/clients/{}/default", id);

    match state.ledger_service.mark_defaulted(id).await {
        Ok(outcome) => {
            let response = MarkDefaultedResponse {
                removed_client_id: outcome.removed_client.id,
                listing: GalleryMapper::to_view(&outcome.listing, state.ledger_service.now()),
                success_message: messages::collateral_repossessed(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Default of client {} refused: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn send_reminder(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("POST /api/clients/{}/reminder", id);

    match state.ledger_service.send_reminder(id).await {
        Ok((client, message)) => (
            StatusCode::OK,
            Json(ReminderResponse {
                client_id: client.id,
                message,
            }),
        )
            .into_response(),
        Err(e) => {
            warn!("Reminder for client {} refused: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn download_client_receipt(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("GET /api/clients/{}/receipt", id);

    match state.ledger_service.client_receipt(id).await {
        Ok(receipt) => receipt_response(receipt),
        Err(e) => error_response(e),
    }
}
