use chrono::{DateTime, Utc};

use crate::domain::commands::gallery::ListingFields;
use crate::domain::gallery::days_until_available;
use crate::domain::models::GalleryListing;
use shared::{CreateListingRequest, GalleryListingView, UpdateListingRequest};

pub struct GalleryMapper;

impl GalleryMapper {
    /// Listing with its availability countdown as of `now`
    pub fn to_view(listing: &GalleryListing, now: DateTime<Utc>) -> GalleryListingView {
        GalleryListingView {
            id: listing.id,
            title: listing.title.clone(),
            livestock_type: listing.livestock_type.clone(),
            price: listing.price,
            available_date: listing.available_date,
            description: listing.description.clone(),
            images: listing.images.clone(),
            days_remaining: days_until_available(listing, now),
        }
    }

    /// Scalar fields and uploaded images of a new listing
    pub fn from_create(request: CreateListingRequest) -> (ListingFields, Vec<String>) {
        let fields = ListingFields {
            title: request.title,
            livestock_type: request.livestock_type,
            price: request.price,
            available_date: request.available_date,
            description: request.description,
        };
        (fields, request.images)
    }

    /// Scalar fields and images to append for an edit
    pub fn from_update(request: UpdateListingRequest) -> (ListingFields, Vec<String>) {
        let fields = ListingFields {
            title: request.title,
            livestock_type: request.livestock_type,
            price: request.price,
            available_date: request.available_date,
            description: request.description,
        };
        (fields, request.new_images)
    }
}
