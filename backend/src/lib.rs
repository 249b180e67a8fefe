//! # Livestock Ledger Backend
//!
//! Everything behind the admin dashboard of a livestock-backed lending
//! business: applications, funded loans, the transaction ledger and the
//! gallery of repossessed livestock for sale.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (ledger state machine, queries, LedgerService)
//!     ↓
//! Storage Layer (PersistenceGateway over a SQLite key-value table)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::BackendConfig;
use crate::domain::{Clock, LedgerService, LedgerSettings, NotificationFeed, SystemClock};
use crate::storage::{DbConnection, PersistenceGateway};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub ledger_service: LedgerService<DbConnection>,
    pub notifications: NotificationFeed,
}

impl AppState {
    pub async fn new(db: DbConnection, clock: Arc<dyn Clock>, settings: LedgerSettings) -> Result<Self> {
        let notifications = NotificationFeed::new(clock.clone());
        let ledger_service = LedgerService::load(
            PersistenceGateway::new(db),
            Arc::new(notifications.clone()),
            clock,
            settings,
        )
        .await?;

        Ok(Self {
            ledger_service,
            notifications,
        })
    }
}

/// Open the database and load the ledger
pub async fn initialize_backend(config: &BackendConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open {}", config.database_url))?;

    info!("Loading ledger");
    AppState::new(db, Arc::new(SystemClock), config.ledger_settings()?).await
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &BackendConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/applications", get(io::list_applications).post(io::submit_application))
        .route("/applications/:id/approve", post(io::approve_application))
        .route("/applications/:id/reject", post(io::reject_application))
        .route("/clients", get(io::list_clients))
        .route("/clients/due-today", get(io::list_due_today))
        .route("/clients/overdue", get(io::list_overdue))
        .route("/clients/:id/payments", post(io::record_payment))
        .route("/clients/:id/mpesa", post(io::request_mobile_payment))
        .route("/clients/:id/default", post(io::mark_defaulted))
        .route("/clients/:id/reminder", post(io::send_reminder))
        .route("/clients/:id/receipt", get(io::download_client_receipt))
        .route("/payments/pending", get(io::list_pending_payments))
        .route("/payments/pending/:id", delete(io::cancel_pending_payment))
        .route("/transactions", get(io::list_transactions))
        .route("/transactions/:id/receipt", get(io::download_transaction_receipt))
        .route("/gallery", get(io::list_listings).post(io::create_listing))
        .route("/gallery/:id", put(io::update_listing).delete(io::delete_listing))
        .route("/gallery/:id/images/:index", delete(io::remove_listing_image))
        .route("/dashboard", get(io::get_dashboard))
        .route("/notifications", get(io::list_notifications));

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(dir) = &config.static_dir {
        info!("Serving admin UI from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}
