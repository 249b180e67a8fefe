use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle of a loan application. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Lifecycle of a funded loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Completed,
    Defaulted,
}

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money disbursed to a client at approval
    Loan,
    /// Money received from a client
    Payment,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Loan => write!(f, "loan"),
            TransactionType::Payment => write!(f, "payment"),
        }
    }
}

/// Settlement status of a ledger entry. Every recorded entry is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Client list filter as selected by the operator. Only one value applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    Active,
    DueToday,
    Overdue,
    Completed,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StatusFilter::Active),
            "due-today" => Ok(StatusFilter::DueToday),
            "overdue" => Ok(StatusFilter::Overdue),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("Unknown status filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    pub name: String,
    pub phone: String,
    pub id_number: String,
    pub loan_amount: Decimal,
    pub livestock_type: String,
    pub livestock_count: u32,
    pub estimated_value: Decimal,
    pub location: String,
    pub additional_info: Option<String>,
    /// Already-encoded image references (data URLs or paths)
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDto {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub id_number: String,
    pub loan_amount: Decimal,
    pub livestock_type: String,
    pub livestock_count: u32,
    pub estimated_value: Decimal,
    pub location: String,
    pub additional_info: Option<String>,
    pub status: ApplicationStatus,
    pub date: DateTime<Utc>,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationDto>,
    pub pending_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDecisionResponse {
    pub application: ApplicationDto,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveApplicationResponse {
    pub application: ApplicationDto,
    pub client: ClientView,
    pub transaction: TransactionDto,
    pub success_message: String,
}

/// A client record together with the figures derived from it at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientView {
    pub id: u64,
    pub application_id: Option<u64>,
    pub name: String,
    pub phone: String,
    pub id_number: String,
    pub borrowed_amount: Decimal,
    pub borrowed_date: DateTime<Utc>,
    pub expected_return_date: DateTime<Utc>,
    pub amount_paid: Decimal,
    pub status: ClientStatus,
    pub livestock_type: String,
    pub livestock_count: u32,
    pub livestock_value: Decimal,
    /// Principal plus the fixed 30% interest
    pub expected_amount: Decimal,
    pub balance: Decimal,
    /// Negative when overdue
    pub days_remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub clients: Vec<ClientView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDto {
    pub id: u64,
    pub client_id: u64,
    pub client_name: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub method: String,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentResponse {
    pub client: ClientView,
    pub transaction: TransactionDto,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobilePaymentRequest {
    pub amount: Decimal,
}

/// A mobile-money prompt that has been sent and is awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPaymentDto {
    pub id: Uuid,
    pub client_id: u64,
    pub client_name: String,
    pub phone: String,
    pub amount: Decimal,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPaymentListResponse {
    pub pending_payments: Vec<PendingPaymentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDefaultedResponse {
    pub removed_client_id: u64,
    pub listing: GalleryListingView,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub client_id: u64,
    pub message: String,
}

/// A gallery listing with its availability countdown computed at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryListingView {
    pub id: u64,
    pub title: String,
    pub livestock_type: String,
    pub price: Decimal,
    pub available_date: DateTime<Utc>,
    pub description: String,
    pub images: Vec<String>,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryListResponse {
    pub listings: Vec<GalleryListingView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub livestock_type: String,
    pub price: Decimal,
    pub available_date: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateListingRequest {
    pub title: String,
    pub livestock_type: String,
    pub price: Decimal,
    pub available_date: DateTime<Utc>,
    pub description: String,
    /// Appended to the existing images, never replacing them
    #[serde(default)]
    pub new_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryMutationResponse {
    pub listing: GalleryListingView,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatsDto {
    pub total_clients: usize,
    pub total_lent: Decimal,
    pub total_received: Decimal,
    pub total_revenue: Decimal,
    pub pending_applications: usize,
    pub due_today: usize,
    pub overdue: usize,
}

/// Severity of an operator notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDto {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationDto>,
}

/// Query string for the client list. All parts are optional and combine by conjunction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientListRequest {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListRequest {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
