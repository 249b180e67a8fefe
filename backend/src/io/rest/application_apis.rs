//! # REST API for Loan Applications

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};

use super::error_response;
use super::mappers::{ApplicationMapper, ClientMapper, TransactionMapper};
use crate::domain::notifications::messages;
use crate::AppState;
use shared::{
    ApplicationDecisionResponse, ApplicationListResponse, ApproveApplicationResponse,
    SubmitApplicationRequest,
};

/// List every application, newest last, with the number still pending
pub async fn list_applications(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/applications");

    let response = state
        .ledger_service
        .read(|ledger| ApplicationListResponse {
            applications: ledger.applications().iter().map(ApplicationMapper::to_dto).collect(),
            pending_count: ledger.pending_application_count(),
        })
        .await;
    (StatusCode::OK, Json(response))
}

pub async fn submit_application(
    State(state): State<AppState>,
    Json(request): Json<SubmitApplicationRequest>,
) -> impl IntoResponse {
    info!("POST /api/applications - applicant: {}", request.name);

    let command = ApplicationMapper::to_command(request);
    match state.ledger_service.submit_application(command).await {
        Ok(application) => {
            let response = ApplicationDecisionResponse {
                application: ApplicationMapper::to_dto(&application),
                success_message: messages::application_submitted(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Application refused: {}", e);
            error_response(e)
        }
    }
}

pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("POST /api/applications/{}/approve", id);

    match state.ledger_service.approve_application(id).await {
        Ok(approval) => {
            let now = state.ledger_service.now();
            let response = ApproveApplicationResponse {
                application: ApplicationMapper::to_dto(&approval.application),
                client: ClientMapper::to_view(&approval.client, now),
                transaction: TransactionMapper::to_dto(&approval.transaction),
                success_message: messages::loan_approved(&approval.client.name),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Approval of {} refused: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn reject_application(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("POST /api/applications/{}/reject", id);

    match state.ledger_service.reject_application(id).await {
        Ok(application) => {
            let response = ApplicationDecisionResponse {
                success_message: messages::application_rejected(&application.name),
                application: ApplicationMapper::to_dto(&application),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Rejection of {} refused: {}", id, e);
            error_response(e)
        }
    }
}
