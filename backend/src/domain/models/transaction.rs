//! Domain model for an immutable ledger entry.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{TransactionStatus, TransactionType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Ledger-wide sequence shared by loan and payment entries
    pub id: u64,
    pub client_id: u64,
    /// Name of the client at the time of the entry
    pub client_name: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    /// Lowercase payment channel: "cash", "mpesa", ...
    pub method: String,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn is_payment_for(&self, client_id: u64) -> bool {
        self.client_id == client_id && self.transaction_type == TransactionType::Payment
    }
}
