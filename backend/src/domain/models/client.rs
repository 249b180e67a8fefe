//! Domain model for a funded loan.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::ClientStatus;

use super::money::expected_repayment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u64,
    /// Application this loan was approved from. Absent only in records
    /// imported from blobs written before the link was kept.
    #[serde(default)]
    pub application_id: Option<u64>,
    pub name: String,
    pub phone: String,
    pub id_number: String,
    /// Principal, fixed at approval
    pub borrowed_amount: Decimal,
    pub borrowed_date: DateTime<Utc>,
    /// Due date, fixed at approval
    pub expected_return_date: DateTime<Utc>,
    /// Cumulative payments; only ever increases
    pub amount_paid: Decimal,
    pub status: ClientStatus,
    pub livestock_type: String,
    pub livestock_count: u32,
    pub livestock_value: Decimal,
}

impl Client {
    pub fn expected_amount(&self) -> Decimal {
        expected_repayment(self.borrowed_amount)
    }

    /// Outstanding amount. Negative after an overpayment.
    pub fn balance(&self) -> Decimal {
        self.expected_amount() - self.amount_paid
    }

    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    pub fn is_fully_paid(&self) -> bool {
        self.amount_paid >= self.expected_amount()
    }
}
