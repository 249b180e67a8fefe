//! Domain model for livestock offered for sale.
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A gallery listing as persisted.
///
/// The availability countdown is deliberately not a field: it is derived
/// from `available_date` on every read. Older blobs that still carry a
/// `daysRemaining` value deserialize fine, the field is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryListing {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub livestock_type: String,
    pub price: Decimal,
    pub available_date: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Punctuation left unescaped in a query value
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Image shown for a listing that has no uploaded photos.
pub fn placeholder_image(livestock_type: &str) -> String {
    format!(
        "/placeholder.svg?height=300&width=400&text={}",
        utf8_percent_encode(livestock_type.trim(), QUERY_VALUE)
    )
}
