//! Operator notifications.
//!
//! Every ledger outcome the operator should hear about goes through a
//! [`Notifier`]. Notifications are fire-and-forget and auto-dismiss: the
//! feed keeps each one for a few seconds, then drops it.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use shared::NotificationKind;
use tracing::{error, info, warn};

use super::calendar::{Clock, SystemClock};

/// How long a notification stays visible
pub const NOTIFICATION_TTL_SECS: i64 = 5;

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Notifier that logs each notification and keeps the recent ones for the
/// dashboard to poll.
#[derive(Clone)]
pub struct NotificationFeed {
    entries: Arc<Mutex<Vec<Notification>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl NotificationFeed {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            clock,
            ttl: Duration::seconds(NOTIFICATION_TTL_SECS),
        }
    }

    /// Notifications that have not yet been dismissed, oldest first
    pub fn recent(&self) -> Vec<Notification> {
        let now = self.clock.now();
        let mut entries = self.lock();
        entries.retain(|n| now - n.created_at < self.ttl);
        entries.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        // A panic while holding the lock cannot leave the list half-written
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Notifier for NotificationFeed {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success | NotificationKind::Info => info!("🔔 {}", message),
            NotificationKind::Warning => warn!("🔔 {}", message),
            NotificationKind::Error => error!("🔔 {}", message),
        }

        let now = self.clock.now();
        let mut entries = self.lock();
        entries.retain(|n| now - n.created_at < self.ttl);
        entries.push(Notification {
            kind,
            message: message.to_string(),
            created_at: now,
        });
    }
}

/// Wording of the operator-facing messages
pub mod messages {
    use rust_decimal::Decimal;

    use crate::domain::receipt::format_currency;

    pub fn application_submitted() -> String {
        "Loan application submitted successfully! We will contact you within 24 hours.".to_string()
    }

    pub fn loan_approved(name: &str) -> String {
        format!("Loan approved for {}!", name)
    }

    pub fn application_rejected(name: &str) -> String {
        format!("Application rejected for {}", name)
    }

    pub fn payment_processed(amount: Decimal) -> String {
        format!("Payment of {} processed successfully!", format_currency(amount))
    }

    pub fn mobile_prompt_sent(phone: &str, amount: Decimal) -> String {
        format!("M-Pesa prompt sent to {} for {}", phone, format_currency(amount))
    }

    pub fn mobile_payment_received(amount: Decimal) -> String {
        format!("M-Pesa payment of {} received successfully!", format_currency(amount))
    }

    pub fn mobile_prompt_cancelled(name: &str) -> String {
        format!("M-Pesa request for {} cancelled", name)
    }

    pub fn collateral_repossessed() -> String {
        "Livestock ownership transferred. Client removed from list. Added to gallery for sale."
            .to_string()
    }

    pub fn reminder_sent(phone: &str) -> String {
        format!("Final payment reminder sent to {}", phone)
    }

    pub fn listing_added() -> String {
        "Livestock added to gallery successfully!".to_string()
    }

    pub fn listing_updated() -> String {
        "Livestock updated successfully!".to_string()
    }

    pub fn image_removed() -> String {
        "Image removed successfully!".to_string()
    }

    pub fn listing_deleted() -> String {
        "Livestock removed from gallery!".to_string()
    }

    pub fn receipt_downloaded() -> String {
        "Receipt downloaded successfully!".to_string()
    }

    pub fn transaction_receipt_downloaded() -> String {
        "Transaction receipt downloaded!".to_string()
    }

    pub fn not_saved() -> String {
        "The change was applied but could not be saved. It will be lost on restart.".to_string()
    }
}
