//! Ledger service: the one entry point the REST layer talks to.
//!
//! Owns the in-memory [`Ledger`] behind a lock that is held for the whole of
//! a mutation and its write-through, so operations never interleave. After
//! every change the affected collections are persisted; if that fails the
//! change stays in memory and the operator is warned.
//!
//! Mobile-money payments are two-step. A prompt registers a pending payment
//! and a background task confirms it after a delay by recording the payment
//! through the same path as a cash payment. Until then the prompt can be
//! cancelled.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::NotificationKind;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::calendar::{BusinessCalendar, Clock};
use super::commands::applications::{Approval, SubmitApplicationCommand};
use super::commands::defaults::DefaultOutcome;
use super::commands::gallery::ListingFields;
use super::commands::payments::{PaymentOutcome, PendingPayment};
use super::error::{LedgerError, LedgerResult};
use super::ledger::Ledger;
use super::models::{Application, Client, GalleryListing};
use super::notifications::{messages, Notifier};
use super::queries::DashboardStats;
use super::receipt::{self, Receipt};
use crate::storage::{Collection, KeyValueStore, PersistenceGateway};

/// Payment method recorded for confirmed mobile-money payments
pub const MOBILE_MONEY_METHOD: &str = "mpesa";

/// Runtime knobs for the service
#[derive(Debug, Clone)]
pub struct LedgerSettings {
    pub calendar: BusinessCalendar,
    /// Delay before a mobile-money prompt is confirmed
    pub confirmation_delay: StdDuration,
    /// Seed sample data into collections that were never stored
    pub seed_sample_data: bool,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            calendar: BusinessCalendar::default(),
            confirmation_delay: StdDuration::from_secs(3),
            seed_sample_data: true,
        }
    }
}

struct PendingEntry {
    payment: PendingPayment,
    handle: JoinHandle<()>,
}

#[derive(Clone)]
pub struct LedgerService<S: KeyValueStore> {
    ledger: Arc<Mutex<Ledger>>,
    gateway: PersistenceGateway<S>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    calendar: BusinessCalendar,
    confirmation_delay: StdDuration,
    pending: Arc<Mutex<HashMap<Uuid, PendingEntry>>>,
}

impl<S: KeyValueStore> LedgerService<S> {
    /// Load the ledger through `gateway`, seeding first-run collections.
    pub async fn load(
        gateway: PersistenceGateway<S>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        settings: LedgerSettings,
    ) -> Result<Self> {
        let ledger = gateway.load(clock.now(), settings.seed_sample_data).await?;
        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            gateway,
            notifier,
            clock,
            calendar: settings.calendar,
            confirmation_delay: settings.confirmation_delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Run `f` against the current ledger. The ledger is locked meanwhile.
    pub async fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let ledger = self.ledger.lock().await;
        f(&ledger)
    }

    pub async fn submit_application(&self, command: SubmitApplicationCommand) -> LedgerResult<Application> {
        self.mutate(
            &[Collection::Applications],
            |ledger, now| ledger.submit_application(command, now),
            |_| messages::application_submitted(),
        )
        .await
    }

    pub async fn approve_application(&self, id: u64) -> LedgerResult<Approval> {
        self.mutate(
            &[Collection::Applications, Collection::Clients, Collection::Transactions],
            |ledger, now| ledger.approve_application(id, now),
            |approval| messages::loan_approved(&approval.client.name),
        )
        .await
    }

    pub async fn reject_application(&self, id: u64) -> LedgerResult<Application> {
        self.mutate(
            &[Collection::Applications],
            |ledger, _| ledger.reject_application(id),
            |application| messages::application_rejected(&application.name),
        )
        .await
    }

    pub async fn record_payment(&self, client_id: u64, amount: Decimal, method: &str) -> LedgerResult<PaymentOutcome> {
        self.apply_payment(client_id, amount, method, |outcome| {
            messages::payment_processed(outcome.transaction.amount)
        })
        .await
    }

    pub async fn mark_defaulted(&self, client_id: u64) -> LedgerResult<DefaultOutcome> {
        self.mutate(
            &[Collection::Clients, Collection::Gallery],
            |ledger, now| ledger.mark_defaulted(client_id, now),
            |_| messages::collateral_repossessed(),
        )
        .await
    }

    /// Tell an active client their loan is due. Nothing is recorded.
    pub async fn send_reminder(&self, client_id: u64) -> LedgerResult<(Client, String)> {
        let ledger = self.ledger.lock().await;
        let client = match ledger.reminder_target(client_id) {
            Ok(client) => client.clone(),
            Err(e) => return Err(self.report(e)),
        };

        let message = messages::reminder_sent(&client.phone);
        self.notifier.notify(NotificationKind::Info, &message);
        Ok((client, message))
    }

    /// Send a mobile-money prompt. The payment is recorded once the prompt
    /// is confirmed, unless it is cancelled first.
    pub async fn request_mobile_payment(&self, client_id: u64, amount: Decimal) -> LedgerResult<PendingPayment> {
        let payment = {
            let ledger = self.ledger.lock().await;
            match ledger.validate_payment(client_id, amount) {
                Ok((client, amount)) => PendingPayment {
                    id: Uuid::new_v4(),
                    client_id,
                    client_name: client.name.clone(),
                    phone: client.phone.clone(),
                    amount,
                    requested_at: self.clock.now(),
                },
                Err(e) => return Err(self.report(e)),
            }
        };

        // Registered before the task can look for it
        let mut pending = self.pending.lock().await;
        let service = self.clone();
        let id = payment.id;
        let handle = tokio::spawn(async move {
            service.confirm_mobile_payment(id).await;
        });
        pending.insert(
            id,
            PendingEntry {
                payment: payment.clone(),
                handle,
            },
        );
        drop(pending);

        info!("📱 Pending payment {} of {} for client {}", id, payment.amount, client_id);
        self.notifier.notify(
            NotificationKind::Info,
            &messages::mobile_prompt_sent(&payment.phone, payment.amount),
        );
        Ok(payment)
    }

    /// Withdraw a prompt that has not been confirmed yet.
    pub async fn cancel_pending_payment(&self, id: Uuid) -> LedgerResult<PendingPayment> {
        let entry = self.pending.lock().await.remove(&id);
        let Some(entry) = entry else {
            return Err(self.report(LedgerError::not_found("Pending payment", id)));
        };

        entry.handle.abort();
        info!("📱 Pending payment {} cancelled", id);
        self.notifier.notify(
            NotificationKind::Info,
            &messages::mobile_prompt_cancelled(&entry.payment.client_name),
        );
        Ok(entry.payment)
    }

    /// Prompts awaiting confirmation, oldest first
    pub async fn pending_payments(&self) -> Vec<PendingPayment> {
        let pending = self.pending.lock().await;
        let mut payments: Vec<PendingPayment> = pending.values().map(|e| e.payment.clone()).collect();
        payments.sort_by_key(|p| p.requested_at);
        payments
    }

    pub async fn add_listing(&self, fields: ListingFields, images: Vec<String>) -> LedgerResult<GalleryListing> {
        self.mutate(
            &[Collection::Gallery],
            |ledger, _| ledger.add_listing(fields, images),
            |_| messages::listing_added(),
        )
        .await
    }

    pub async fn edit_listing(
        &self,
        id: u64,
        fields: ListingFields,
        new_images: Vec<String>,
    ) -> LedgerResult<GalleryListing> {
        self.mutate(
            &[Collection::Gallery],
            |ledger, _| ledger.edit_listing(id, fields, new_images),
            |_| messages::listing_updated(),
        )
        .await
    }

    pub async fn remove_image(&self, id: u64, image_index: usize) -> LedgerResult<GalleryListing> {
        self.mutate(
            &[Collection::Gallery],
            |ledger, _| ledger.remove_image(id, image_index),
            |_| messages::image_removed(),
        )
        .await
    }

    pub async fn delete_listing(&self, id: u64) -> LedgerResult<GalleryListing> {
        self.mutate(
            &[Collection::Gallery],
            |ledger, _| ledger.delete_listing(id),
            |_| messages::listing_deleted(),
        )
        .await
    }

    pub async fn client_receipt(&self, client_id: u64) -> LedgerResult<Receipt> {
        let now = self.clock.now();
        let result = self
            .read(|ledger| -> LedgerResult<Receipt> {
                let client = ledger
                    .client(client_id)
                    .ok_or_else(|| LedgerError::not_found("Client", client_id))?;
                let history = ledger.transactions_for(client_id);
                Ok(receipt::client_receipt(client, &history, now, &self.calendar))
            })
            .await;
        self.report_read(result, messages::receipt_downloaded())
    }

    pub async fn transaction_receipt(&self, transaction_id: u64) -> LedgerResult<Receipt> {
        let now = self.clock.now();
        let result = self
            .read(|ledger| {
                ledger
                    .transaction(transaction_id)
                    .map(|t| receipt::transaction_receipt(t, now, &self.calendar))
                    .ok_or_else(|| LedgerError::not_found("Transaction", transaction_id))
            })
            .await;
        self.report_read(result, messages::transaction_receipt_downloaded())
    }

    pub async fn dashboard(&self) -> DashboardStats {
        let now = self.clock.now();
        self.read(|ledger| DashboardStats::compute(ledger, now, &self.calendar))
            .await
    }

    async fn confirm_mobile_payment(&self, id: Uuid) {
        tokio::time::sleep(self.confirmation_delay).await;

        let entry = self.pending.lock().await.remove(&id);
        let Some(entry) = entry else {
            debug!("Pending payment {} was cancelled", id);
            return;
        };

        let payment = entry.payment;
        let confirmed = self
            .apply_payment(payment.client_id, payment.amount, MOBILE_MONEY_METHOD, |outcome| {
                messages::mobile_payment_received(outcome.transaction.amount)
            })
            .await;
        if let Err(e) = confirmed {
            warn!("⚠️ Pending payment {} could not be recorded: {}", id, e);
        }
    }

    async fn apply_payment(
        &self,
        client_id: u64,
        amount: Decimal,
        method: &str,
        message: impl FnOnce(&PaymentOutcome) -> String,
    ) -> LedgerResult<PaymentOutcome> {
        self.mutate(
            &[Collection::Clients, Collection::Transactions],
            |ledger, now| ledger.record_payment(client_id, amount, method, now),
            message,
        )
        .await
    }

    /// Apply `op` under the lock, write through `collections`, and tell the
    /// operator how it went.
    async fn mutate<T>(
        &self,
        collections: &[Collection],
        op: impl FnOnce(&mut Ledger, DateTime<Utc>) -> LedgerResult<T>,
        message: impl FnOnce(&T) -> String,
    ) -> LedgerResult<T> {
        let mut ledger = self.ledger.lock().await;
        let value = match op(&mut ledger, self.clock.now()) {
            Ok(value) => value,
            Err(e) => return Err(self.report(e)),
        };

        if let Err(e) = self.gateway.persist(&ledger, collections).await {
            error!("❌ Change kept in memory only: {:#}", e);
            self.notifier
                .notify(NotificationKind::Warning, &messages::not_saved());
        }

        self.notifier.notify(NotificationKind::Success, &message(&value));
        Ok(value)
    }

    fn report_read<T>(&self, result: LedgerResult<T>, success: String) -> LedgerResult<T> {
        match result {
            Ok(value) => {
                self.notifier.notify(NotificationKind::Success, &success);
                Ok(value)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Surface a refused operation. Repeating an already-applied decision
    /// is informational, anything else is an error.
    fn report(&self, e: LedgerError) -> LedgerError {
        let kind = match e {
            LedgerError::InvalidState(_) => NotificationKind::Info,
            LedgerError::NotFound { .. } | LedgerError::InvalidInput(_) => NotificationKind::Error,
        };
        debug!("Operation refused: {}", e);
        self.notifier.notify(kind, &e.to_string());
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::FixedClock;
    use crate::domain::notifications::NotificationFeed;
    use crate::storage::testing::FlakyStore;
    use crate::storage::DbConnection;
    use chrono::TimeZone;
    use shared::ClientStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    struct Harness {
        service: LedgerService<FlakyStore<DbConnection>>,
        store: FlakyStore<DbConnection>,
        feed: NotificationFeed,
    }

    async fn harness(seed: bool, confirmation_delay: StdDuration) -> Harness {
        let store = FlakyStore::new(DbConnection::init_test().await.unwrap());
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
        let feed = NotificationFeed::new(clock.clone());
        let settings = LedgerSettings {
            calendar: BusinessCalendar::default(),
            confirmation_delay,
            seed_sample_data: seed,
        };
        let service = LedgerService::load(
            PersistenceGateway::new(store.clone()),
            Arc::new(feed.clone()),
            clock,
            settings,
        )
        .await
        .unwrap();
        Harness { service, store, feed }
    }

    fn last_notification(feed: &NotificationFeed) -> (NotificationKind, String) {
        let recent = feed.recent();
        let last = recent.last().expect("no notifications");
        (last.kind, last.message.clone())
    }

    fn command(name: &str, amount: i64) -> SubmitApplicationCommand {
        SubmitApplicationCommand {
            name: name.to_string(),
            phone: "0711111111".to_string(),
            id_number: "11112222".to_string(),
            loan_amount: Decimal::from(amount),
            livestock_type: "cattle".to_string(),
            livestock_count: 2,
            estimated_value: Decimal::from(amount * 2),
            location: "Isinya".to_string(),
            additional_info: Some("  ".to_string()),
            photos: vec![],
        }
    }

    /// Poll the ledger until `done` holds, or give up after two seconds
    async fn wait_for(
        service: &LedgerService<FlakyStore<DbConnection>>,
        mut done: impl FnMut(&Ledger) -> bool,
    ) {
        for _ in 0..200 {
            if service.read(|l| done(l)).await {
                return;
            }
            tokio::time::sleep(StdDuration::from_millis(10)).await;
        }
        panic!("ledger never reached the expected state");
    }

    #[tokio::test]
    async fn test_approval_is_written_through() {
        let h = harness(false, StdDuration::from_secs(3)).await;
        let application = h.service.submit_application(command("Jane", 20_000)).await.unwrap();
        assert_eq!(application.additional_info, None);

        let approval = h.service.approve_application(application.id).await.unwrap();

        assert_eq!(
            last_notification(&h.feed),
            (NotificationKind::Success, "Loan approved for Jane!".to_string())
        );
        let reloaded = PersistenceGateway::new(h.store.clone()).load(now(), false).await.unwrap();
        assert_eq!(reloaded.clients(), &[approval.client]);
        assert_eq!(reloaded.transactions(), &[approval.transaction]);
        assert_eq!(reloaded.applications()[0].status, shared::ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn test_second_approval_is_informational() {
        let h = harness(true, StdDuration::from_secs(3)).await;
        h.service.approve_application(1).await.unwrap();

        let again = h.service.approve_application(1).await;

        assert!(matches!(again, Err(LedgerError::InvalidState(_))));
        assert_eq!(last_notification(&h.feed).0, NotificationKind::Info);
        assert_eq!(h.service.read(|l| l.clients().len()).await, 6);
    }

    #[tokio::test]
    async fn test_unknown_client_is_an_error_notification() {
        let h = harness(true, StdDuration::from_secs(3)).await;

        let result = h.service.record_payment(99, Decimal::from(100), "cash").await;

        assert_eq!(result.unwrap_err(), LedgerError::not_found("Client", 99));
        assert_eq!(
            last_notification(&h.feed),
            (NotificationKind::Error, "Client 99 not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_change_in_memory() {
        let h = harness(true, StdDuration::from_secs(3)).await;
        h.store.fail_writes(true);

        let outcome = h.service.record_payment(1, Decimal::from(1_000), "cash").await.unwrap();

        assert_eq!(outcome.client.amount_paid, Decimal::from(1_000));
        assert_eq!(
            h.service.read(|l| l.client(1).map(|c| c.amount_paid)).await,
            Some(Decimal::from(1_000))
        );
        let kinds: Vec<NotificationKind> = h.feed.recent().iter().map(|n| n.kind).collect();
        assert!(kinds.contains(&NotificationKind::Warning));

        // storage still holds the seed
        let stored = PersistenceGateway::new(h.store.clone()).load(now(), false).await.unwrap();
        assert_eq!(stored.client(1).unwrap().amount_paid, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_mobile_payment_is_recorded_after_confirmation() {
        let h = harness(true, StdDuration::from_millis(20)).await;
        let before = h.service.read(|l| l.transactions().len()).await;

        let pending = h.service.request_mobile_payment(5, Decimal::from(5_000)).await.unwrap();
        assert_eq!(pending.phone, "0756789012");
        assert_eq!(
            last_notification(&h.feed),
            (
                NotificationKind::Info,
                "M-Pesa prompt sent to 0756789012 for KSh 5,000".to_string()
            )
        );

        wait_for(&h.service, |l| l.transactions().len() > before).await;
        assert!(h.service.pending_payments().await.is_empty());

        let (paid, payments) = h
            .service
            .read(|l| {
                let mpesa = l
                    .transactions()
                    .iter()
                    .skip(before)
                    .filter(|t| t.is_payment_for(5) && t.method == MOBILE_MONEY_METHOD)
                    .count();
                (l.client(5).unwrap().amount_paid, mpesa)
            })
            .await;
        assert_eq!(paid, Decimal::from(20_000));
        assert_eq!(payments, 1);
        assert!(h.service.read(|l| l.audit().is_empty()).await);
    }

    #[tokio::test]
    async fn test_cancelled_mobile_payment_never_lands() {
        let h = harness(true, StdDuration::from_millis(100)).await;

        let pending = h.service.request_mobile_payment(1, Decimal::from(5_000)).await.unwrap();
        assert_eq!(h.service.pending_payments().await, vec![pending.clone()]);

        let cancelled = h.service.cancel_pending_payment(pending.id).await.unwrap();
        assert_eq!(cancelled, pending);
        assert!(h.service.pending_payments().await.is_empty());

        tokio::time::sleep(StdDuration::from_millis(250)).await;
        assert_eq!(
            h.service.read(|l| l.client(1).unwrap().amount_paid).await,
            Decimal::ZERO
        );
        assert!(matches!(
            h.service.cancel_pending_payment(pending.id).await,
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_mobile_payment_for_completed_loan_is_refused_up_front() {
        let h = harness(true, StdDuration::from_millis(20)).await;

        let result = h.service.request_mobile_payment(4, Decimal::from(100)).await;

        assert!(matches!(result, Err(LedgerError::InvalidState(_))));
        assert!(h.service.pending_payments().await.is_empty());
    }

    #[tokio::test]
    async fn test_default_moves_collateral_to_gallery() {
        let h = harness(true, StdDuration::from_secs(3)).await;

        let outcome = h.service.mark_defaulted(3).await.unwrap();

        assert_eq!(outcome.listing.price, Decimal::from(32_500));
        assert_eq!(outcome.removed_client.status, ClientStatus::Defaulted);
        let stored = PersistenceGateway::new(h.store.clone()).load(now(), false).await.unwrap();
        assert!(stored.client(3).is_none());
        assert_eq!(stored.gallery().len(), 3);
    }

    #[tokio::test]
    async fn test_reminder_has_no_effect() {
        let h = harness(true, StdDuration::from_secs(3)).await;
        let before = h.service.read(|l| l.clone()).await;

        let (client, message) = h.service.send_reminder(2).await.unwrap();

        assert_eq!(client.id, 2);
        assert_eq!(message, "Final payment reminder sent to 0723456789");
        assert_eq!(h.service.read(|l| l.clone()).await, before);
        assert!(h.service.send_reminder(4).await.is_err());
    }

    #[tokio::test]
    async fn test_receipts() {
        let h = harness(true, StdDuration::from_secs(3)).await;

        let receipt = h.service.client_receipt(2).await.unwrap();
        assert!(receipt.content.contains("Joseph Ngugi"));
        assert!(receipt.content.contains("PAYMENT - KSh 20,000 (MPESA)"));

        let receipt = h.service.transaction_receipt(1).await.unwrap();
        assert!(receipt.file_name.starts_with("transaction_1_"));
        assert!(h.service.transaction_receipt(404).await.is_err());
    }

    #[tokio::test]
    async fn test_gallery_operations_persist() {
        let h = harness(false, StdDuration::from_secs(3)).await;
        let fields = ListingFields {
            title: "Boran bull".to_string(),
            livestock_type: "cattle".to_string(),
            price: Decimal::from(70_000),
            available_date: now(),
            description: String::new(),
        };

        let listing = h
            .service
            .add_listing(fields.clone(), vec!["a.jpg".to_string(), "b.jpg".to_string()])
            .await
            .unwrap();
        h.service.remove_image(listing.id, 0).await.unwrap();
        h.service
            .edit_listing(listing.id, fields, vec!["c.jpg".to_string()])
            .await
            .unwrap();

        let stored = PersistenceGateway::new(h.store.clone()).load(now(), false).await.unwrap();
        assert_eq!(stored.gallery()[0].images, vec!["b.jpg", "c.jpg"]);

        h.service.delete_listing(listing.id).await.unwrap();
        assert!(h.service.read(|l| l.gallery().is_empty()).await);
    }

    #[tokio::test]
    async fn test_dashboard_over_seed() {
        let h = harness(true, StdDuration::from_secs(3)).await;

        let stats = h.service.dashboard().await;

        assert_eq!(stats.total_clients, 5);
        assert_eq!(stats.total_lent, Decimal::from(180_000));
        assert_eq!(stats.total_received, Decimal::from(87_000));
        assert_eq!(stats.pending_applications, 1);
        assert_eq!(stats.due_today, 1);
        assert_eq!(stats.overdue, 1);
    }
}
