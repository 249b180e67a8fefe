//! # REST API for the Livestock Gallery

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};

use super::error_response;
use super::mappers::GalleryMapper;
use crate::domain::notifications::messages;
use crate::AppState;
use shared::{
    CreateListingRequest, GalleryListResponse, GalleryListingView, GalleryMutationResponse,
    UpdateListingRequest,
};

pub async fn list_listings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/gallery");

    let now = state.ledger_service.now();
    let listings: Vec<GalleryListingView> = state
        .ledger_service
        .read(|ledger| {
            ledger
                .gallery()
                .iter()
                .map(|l| GalleryMapper::to_view(l, now))
                .collect()
        })
        .await;
    (StatusCode::OK, Json(GalleryListResponse { listings }))
}

pub async fn create_listing(
    State(state): State<AppState>,
    Json(request): Json<CreateListingRequest>,
) -> impl IntoResponse {
    info!("POST /api/gallery - title: {}", request.title);

    let (fields, images) = GalleryMapper::from_create(request);
    match state.ledger_service.add_listing(fields, images).await {
        Ok(listing) => {
            let response = GalleryMutationResponse {
                listing: GalleryMapper::to_view(&listing, state.ledger_service.now()),
                success_message: messages::listing_added(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Listing refused: {}", e);
            error_response(e)
        }
    }
}

/// Overwrite a listing's fields and append any new images
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<UpdateListingRequest>,
) -> impl IntoResponse {
    info!("PUT /api/gallery/{}", id);

    let (fields, new_images) = GalleryMapper::from_update(request);
    match state.ledger_service.edit_listing(id, fields, new_images).await {
        Ok(listing) => {
            let response = GalleryMutationResponse {
                listing: GalleryMapper::to_view(&listing, state.ledger_service.now()),
                success_message: messages::listing_updated(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Update of listing {} refused: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("DELETE /api/gallery/{}", id);

    match state.ledger_service.delete_listing(id).await {
        Ok(listing) => {
            let response = GalleryMutationResponse {
                listing: GalleryMapper::to_view(&listing, state.ledger_service.now()),
                success_message: messages::listing_deleted(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Delete of listing {} refused: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn remove_listing_image(
    State(state): State<AppState>,
    Path((id, index)): Path<(u64, usize)>,
) -> impl IntoResponse {
    info!("DELETE /api/gallery/{}/images/{}", id, index);

    match state.ledger_service.remove_image(id, index).await {
        Ok(listing) => {
            let response = GalleryMutationResponse {
                listing: GalleryMapper::to_view(&listing, state.ledger_service.now()),
                success_message: messages::image_removed(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Image {} of listing {} not removed: {}", index, id, e);
            error_response(e)
        }
    }
}
