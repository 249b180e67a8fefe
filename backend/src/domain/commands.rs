//! Domain-level command and result types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to and from these types.

pub mod applications {
    use rust_decimal::Decimal;

    use crate::domain::models::{Application, Client, Transaction};

    /// Input for submitting a new loan application.
    #[derive(Debug, Clone)]
    pub struct SubmitApplicationCommand {
        pub name: String,
        pub phone: String,
        pub id_number: String,
        pub loan_amount: Decimal,
        pub livestock_type: String,
        pub livestock_count: u32,
        pub estimated_value: Decimal,
        pub location: String,
        pub additional_info: Option<String>,
        pub photos: Vec<String>,
    }

    /// Everything an approval creates or changes.
    #[derive(Debug, Clone)]
    pub struct Approval {
        pub application: Application,
        pub client: Client,
        pub transaction: Transaction,
    }
}

pub mod payments {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::models::{Client, Transaction};

    /// Result of recording a payment: the client after the payment and the new entry.
    #[derive(Debug, Clone)]
    pub struct PaymentOutcome {
        pub client: Client,
        pub transaction: Transaction,
    }

    /// A mobile-money prompt awaiting confirmation.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PendingPayment {
        pub id: Uuid,
        pub client_id: u64,
        pub client_name: String,
        pub phone: String,
        pub amount: Decimal,
        pub requested_at: DateTime<Utc>,
    }
}

pub mod defaults {
    use crate::domain::models::{Client, GalleryListing};

    /// Result of repossessing a defaulted loan's collateral.
    #[derive(Debug, Clone)]
    pub struct DefaultOutcome {
        /// The client as it was just before removal
        pub removed_client: Client,
        pub listing: GalleryListing,
    }
}

pub mod gallery {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    /// Scalar listing fields, shared by create and edit.
    #[derive(Debug, Clone)]
    pub struct ListingFields {
        pub title: String,
        pub livestock_type: String,
        pub price: Decimal,
        pub available_date: DateTime<Utc>,
        pub description: String,
    }
}
