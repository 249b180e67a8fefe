//! Gallery lifecycle: livestock listed for sale.
//!
//! Listings come from two places: repossessed collateral (see
//! [`Ledger::mark_defaulted`]) and listings the operator adds by hand.
//! Images are opaque references, already encoded by the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::calendar::days_until;
use super::commands::gallery::ListingFields;
use super::error::{LedgerError, LedgerResult};
use super::ledger::{bounded_amount, next_id, required_text, Ledger};
use super::models::gallery::placeholder_image;
use super::models::GalleryListing;

/// Whole days until a listing becomes available; zero or negative once it is.
pub fn days_until_available(listing: &GalleryListing, now: DateTime<Utc>) -> i64 {
    days_until(listing.available_date, now)
}

struct ValidFields {
    title: String,
    livestock_type: String,
    price: Decimal,
    available_date: DateTime<Utc>,
    description: String,
}

fn validate(fields: ListingFields) -> LedgerResult<ValidFields> {
    let title = required_text("Title", &fields.title)?;
    let livestock_type = required_text("Livestock type", &fields.livestock_type)?;
    let price = bounded_amount("Price", fields.price)?;
    if price < Decimal::ZERO {
        return Err(LedgerError::InvalidInput(
            "Price cannot be negative".to_string(),
        ));
    }
    Ok(ValidFields {
        title,
        livestock_type,
        price,
        available_date: fields.available_date,
        description: fields.description.trim().to_string(),
    })
}

impl Ledger {
    /// Add a listing. Without uploaded images it gets a placeholder for its type.
    pub fn add_listing(
        &mut self,
        fields: ListingFields,
        images: Vec<String>,
    ) -> LedgerResult<GalleryListing> {
        let fields = validate(fields)?;
        let images = if images.is_empty() {
            vec![placeholder_image(&fields.livestock_type)]
        } else {
            images
        };

        let listing = GalleryListing {
            id: next_id(&self.gallery, |l| l.id),
            title: fields.title,
            livestock_type: fields.livestock_type,
            price: fields.price,
            available_date: fields.available_date,
            description: fields.description,
            images,
        };

        info!("Listing {} added: {}", listing.id, listing.title);
        self.gallery.push(listing.clone());
        Ok(listing)
    }

    /// Overwrite a listing's fields. `new_images` are appended after the
    /// existing ones.
    pub fn edit_listing(
        &mut self,
        id: u64,
        fields: ListingFields,
        new_images: Vec<String>,
    ) -> LedgerResult<GalleryListing> {
        let index = self.listing_index(id)?;
        let fields = validate(fields)?;

        let listing = &mut self.gallery[index];
        listing.title = fields.title;
        listing.livestock_type = fields.livestock_type;
        listing.price = fields.price;
        listing.available_date = fields.available_date;
        listing.description = fields.description;
        listing.images.extend(new_images);

        info!("Listing {} updated", id);
        Ok(listing.clone())
    }

    /// Remove the image at `image_index`, keeping the order of the rest.
    pub fn remove_image(&mut self, id: u64, image_index: usize) -> LedgerResult<GalleryListing> {
        let index = self.listing_index(id)?;
        let listing = &mut self.gallery[index];
        if image_index >= listing.images.len() {
            return Err(LedgerError::InvalidInput(format!(
                "Listing {} has no image at position {}",
                id, image_index
            )));
        }

        listing.images.remove(image_index);
        Ok(listing.clone())
    }

    pub fn delete_listing(&mut self, id: u64) -> LedgerResult<GalleryListing> {
        let index = self.listing_index(id)?;
        let removed = self.gallery.remove(index);

        info!("Listing {} deleted: {}", id, removed.title);
        Ok(removed)
    }

    fn listing_index(&self, id: u64) -> LedgerResult<usize> {
        self.gallery
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| LedgerError::not_found("Listing", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()
    }

    fn fields(title: &str, price: i64) -> ListingFields {
        ListingFields {
            title: title.to_string(),
            livestock_type: "cattle".to_string(),
            price: Decimal::from(price),
            available_date: now() + Duration::days(5),
            description: "Two heifers".to_string(),
        }
    }

    fn images(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_add_listing_without_images_uses_placeholder() {
        let mut ledger = Ledger::new();
        let listing = ledger.add_listing(fields("Heifers", 60_000), vec![]).unwrap();

        assert_eq!(listing.id, 1);
        assert_eq!(listing.images, vec![placeholder_image("cattle")]);
        assert_eq!(ledger.gallery().len(), 1);
    }

    #[test]
    fn test_add_listing_validates_fields() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.add_listing(fields(" ", 100), vec![]),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(ledger.add_listing(fields("Bull", -1), vec![]).is_err());
        assert!(ledger.add_listing(fields("Free calf", 0), vec![]).is_ok());

        let mut priceless = fields("Bull", 0);
        priceless.price = Decimal::MAX;
        assert!(matches!(
            ledger.add_listing(priceless, vec![]),
            Err(LedgerError::InvalidInput(_))
        ));
        assert_eq!(ledger.gallery().len(), 1);
    }

    #[test]
    fn test_edit_appends_images() {
        let mut ledger = Ledger::new();
        let listing = ledger
            .add_listing(fields("Heifers", 60_000), images(&["a.jpg", "b.jpg"]))
            .unwrap();

        let edited = ledger
            .edit_listing(listing.id, fields("Dairy heifers", 58_000), images(&["c.jpg"]))
            .unwrap();

        assert_eq!(edited.title, "Dairy heifers");
        assert_eq!(edited.price, Decimal::from(58_000));
        assert_eq!(edited.images, images(&["a.jpg", "b.jpg", "c.jpg"]));
        assert_eq!(ledger.listing(listing.id), Some(&edited));
    }

    #[test]
    fn test_edit_missing_listing_is_not_found() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.edit_listing(5, fields("x", 1), vec![]).unwrap_err(),
            LedgerError::not_found("Listing", 5)
        );
    }

    #[test]
    fn test_remove_image_removes_exactly_one() {
        let mut ledger = Ledger::new();
        let listing = ledger
            .add_listing(fields("Heifers", 1), images(&["a", "b", "c"]))
            .unwrap();

        let updated = ledger.remove_image(listing.id, 1).unwrap();
        assert_eq!(updated.images, images(&["a", "c"]));

        let out_of_range = ledger.remove_image(listing.id, 2);
        assert!(matches!(out_of_range, Err(LedgerError::InvalidInput(_))));
        assert_eq!(ledger.listing(listing.id).unwrap().images.len(), 2);
    }

    #[test]
    fn test_delete_listing() {
        let mut ledger = Ledger::new();
        let first = ledger.add_listing(fields("One", 1), vec![]).unwrap();
        let second = ledger.add_listing(fields("Two", 2), vec![]).unwrap();

        ledger.delete_listing(first.id).unwrap();

        assert_eq!(ledger.gallery(), &[second]);
        assert!(ledger.delete_listing(first.id).is_err());
    }

    #[test]
    fn test_days_until_available_counts_down() {
        let mut ledger = Ledger::new();
        let listing = ledger.add_listing(fields("Heifers", 1), vec![]).unwrap();

        assert_eq!(days_until_available(&listing, now()), 5);
        assert_eq!(days_until_available(&listing, now() + Duration::days(5)), 0);
        assert_eq!(days_until_available(&listing, now() + Duration::days(7)), -2);
    }
}
