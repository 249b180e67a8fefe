//! # REST API for the Operator Dashboard

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::mappers::DashboardMapper;
use crate::AppState;
use shared::{NotificationDto, NotificationListResponse};

pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard");

    let stats = state.ledger_service.dashboard().await;
    (StatusCode::OK, Json(DashboardMapper::to_dto(stats)))
}

/// Notifications that have not been dismissed yet
pub async fn list_notifications(State(state): State<AppState>) -> impl IntoResponse {
    let notifications: Vec<NotificationDto> = state
        .notifications
        .recent()
        .into_iter()
        .map(DashboardMapper::notification_to_dto)
        .collect();
    (StatusCode::OK, Json(NotificationListResponse { notifications }))
}
