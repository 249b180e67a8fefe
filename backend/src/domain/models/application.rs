//! Domain model for a loan application.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::ApplicationStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub id_number: String,
    pub loan_amount: Decimal,
    pub livestock_type: String,
    pub livestock_count: u32,
    pub estimated_value: Decimal,
    pub location: String,
    #[serde(default)]
    pub additional_info: Option<String>,
    pub status: ApplicationStatus,
    /// When the application was submitted
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl Application {
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}
