//! Ledger core: applications, client loans and the transaction ledger.
//!
//! `Ledger` owns the four collections and is the only thing that mutates
//! them. Every operation takes the current instant explicitly and checks all
//! of its preconditions before touching any collection, so a refused
//! operation leaves the ledger exactly as it was.
//!
//! ## Lifecycle
//!
//! ```text
//! Application: pending ──approve──▶ approved   (spawns Client + loan Transaction)
//!                      └─reject───▶ rejected
//! Client:      active ──payments reach principal × 1.3──▶ completed
//!                     └─mark_defaulted──▶ removed, collateral listed for sale
//! ```

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use shared::{ApplicationStatus, ClientStatus, TransactionStatus, TransactionType};
use tracing::{debug, info};

use super::commands::applications::{Approval, SubmitApplicationCommand};
use super::commands::defaults::DefaultOutcome;
use super::commands::payments::PaymentOutcome;
use super::error::{LedgerError, LedgerResult};
use super::models::gallery::placeholder_image;
use super::models::money::{max_amount, round_money};
use super::models::{Application, Client, GalleryListing, Transaction};

/// Days between approval and the loan's due date
pub const LOAN_TERM_DAYS: i64 = 7;
/// Days between a default and the repossessed livestock going on sale
pub const RESALE_DELAY_DAYS: i64 = 3;
/// Loans are always disbursed in cash
pub const DISBURSEMENT_METHOD: &str = "cash";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub(super) applications: Vec<Application>,
    pub(super) clients: Vec<Client>,
    pub(super) transactions: Vec<Transaction>,
    pub(super) gallery: Vec<GalleryListing>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        applications: Vec<Application>,
        clients: Vec<Client>,
        transactions: Vec<Transaction>,
        gallery: Vec<GalleryListing>,
    ) -> Self {
        Self {
            applications,
            clients,
            transactions,
            gallery,
        }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn gallery(&self) -> &[GalleryListing] {
        &self.gallery
    }

    pub fn application(&self, id: u64) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn client(&self, id: u64) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn listing(&self, id: u64) -> Option<&GalleryListing> {
        self.gallery.iter().find(|l| l.id == id)
    }

    /// All entries recorded against one client, in ledger order
    pub fn transactions_for(&self, client_id: u64) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.client_id == client_id)
            .collect()
    }

    pub fn pending_application_count(&self) -> usize {
        self.applications.iter().filter(|a| a.is_pending()).count()
    }

    /// Record a new pending application. Identical repeated submissions
    /// create distinct applications.
    pub fn submit_application(
        &mut self,
        command: SubmitApplicationCommand,
        now: DateTime<Utc>,
    ) -> LedgerResult<Application> {
        let name = required_text("Name", &command.name)?;
        let phone = required_text("Phone number", &command.phone)?;
        let id_number = required_text("ID number", &command.id_number)?;
        let livestock_type = required_text("Livestock type", &command.livestock_type)?;
        let location = required_text("Location", &command.location)?;

        let loan_amount = bounded_amount("Loan amount", command.loan_amount)?;
        if loan_amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(
                "Loan amount must be greater than zero".to_string(),
            ));
        }
        let estimated_value = bounded_amount("Estimated value", command.estimated_value)?;
        if estimated_value < Decimal::ZERO {
            return Err(LedgerError::InvalidInput(
                "Estimated value cannot be negative".to_string(),
            ));
        }

        let application = Application {
            id: next_id(&self.applications, |a| a.id),
            name,
            phone,
            id_number,
            loan_amount,
            livestock_type,
            livestock_count: command.livestock_count,
            estimated_value,
            location,
            additional_info: command
                .additional_info
                .map(|info| info.trim().to_string())
                .filter(|info| !info.is_empty()),
            status: ApplicationStatus::Pending,
            date: now,
            photos: command.photos,
        };

        info!(
            "Application {} submitted by {} for {}",
            application.id, application.name, application.loan_amount
        );
        self.applications.push(application.clone());
        Ok(application)
    }

    /// Approve a pending application, funding a new client loan.
    ///
    /// An application that was already approved or rejected is refused with
    /// `InvalidState` and nothing changes.
    pub fn approve_application(&mut self, id: u64, now: DateTime<Utc>) -> LedgerResult<Approval> {
        let index = self.pending_application_index(id)?;
        let application = &self.applications[index];

        let client = Client {
            id: self.next_client_id(),
            application_id: Some(application.id),
            name: application.name.clone(),
            phone: application.phone.clone(),
            id_number: application.id_number.clone(),
            borrowed_amount: application.loan_amount,
            borrowed_date: now,
            expected_return_date: now + Duration::days(LOAN_TERM_DAYS),
            amount_paid: Decimal::ZERO,
            status: ClientStatus::Active,
            livestock_type: application.livestock_type.clone(),
            livestock_count: application.livestock_count,
            livestock_value: application.estimated_value,
        };

        let transaction = Transaction {
            id: next_id(&self.transactions, |t| t.id),
            client_id: client.id,
            client_name: client.name.clone(),
            transaction_type: TransactionType::Loan,
            amount: client.borrowed_amount,
            method: DISBURSEMENT_METHOD.to_string(),
            date: now,
            status: TransactionStatus::Completed,
        };

        self.applications[index].status = ApplicationStatus::Approved;
        self.clients.push(client.clone());
        self.transactions.push(transaction.clone());

        info!(
            "Application {} approved: client {} owes {} by {}",
            id,
            client.id,
            client.expected_amount(),
            client.expected_return_date
        );
        Ok(Approval {
            application: self.applications[index].clone(),
            client,
            transaction,
        })
    }

    /// Reject a pending application. No client or transaction is created.
    pub fn reject_application(&mut self, id: u64) -> LedgerResult<Application> {
        let index = self.pending_application_index(id)?;
        self.applications[index].status = ApplicationStatus::Rejected;

        info!("Application {} rejected", id);
        Ok(self.applications[index].clone())
    }

    /// Check that `amount` could be paid against `client_id` right now,
    /// without recording anything. Returns the client and the rounded amount.
    pub fn validate_payment(&self, client_id: u64, amount: Decimal) -> LedgerResult<(&Client, Decimal)> {
        let amount = bounded_amount("Payment amount", amount)?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(
                "Payment amount must be greater than zero".to_string(),
            ));
        }
        let client = self.active_client(client_id)?;
        Ok((client, amount))
    }

    /// Record a payment against an active loan, completing it once the
    /// expected amount has been reached. Overpayments are accepted.
    pub fn record_payment(
        &mut self,
        client_id: u64,
        amount: Decimal,
        method: &str,
        now: DateTime<Utc>,
    ) -> LedgerResult<PaymentOutcome> {
        let method = method.trim().to_lowercase();
        if method.is_empty() {
            return Err(LedgerError::InvalidInput(
                "Payment method is required".to_string(),
            ));
        }
        let (client, amount) = self.validate_payment(client_id, amount)?;
        let amount_paid = client.amount_paid.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidInput(format!("Payment of {} is too large to record", amount))
        })?;

        let transaction_id = next_id(&self.transactions, |t| t.id);
        let index = self.client_index(client_id)?;
        let client = &mut self.clients[index];

        client.amount_paid = amount_paid;
        if client.is_fully_paid() {
            client.status = ClientStatus::Completed;
            info!("Client {} has repaid {} in full", client.id, client.expected_amount());
        }

        let transaction = Transaction {
            id: transaction_id,
            client_id,
            client_name: client.name.clone(),
            transaction_type: TransactionType::Payment,
            amount,
            method,
            date: now,
            status: TransactionStatus::Completed,
        };
        let client = client.clone();
        self.transactions.push(transaction.clone());

        debug!(
            "Payment {} of {} by {}: paid {} of {}",
            transaction.id,
            amount,
            transaction.method,
            client.amount_paid,
            client.expected_amount()
        );
        Ok(PaymentOutcome { client, transaction })
    }

    /// Repossess a defaulted loan's collateral.
    ///
    /// The livestock goes on sale for the full expected repayment and the
    /// client record is removed. No ledger entry is written for the default;
    /// the loan transaction stays as the record of the disbursement.
    pub fn mark_defaulted(&mut self, client_id: u64, now: DateTime<Utc>) -> LedgerResult<DefaultOutcome> {
        self.active_client(client_id)?;
        let index = self.client_index(client_id)?;
        let client = &self.clients[index];

        let listing = GalleryListing {
            id: next_id(&self.gallery, |l| l.id),
            title: format!(
                "{} {} from {}",
                client.livestock_count, client.livestock_type, client.name
            ),
            livestock_type: client.livestock_type.clone(),
            price: client.expected_amount(),
            available_date: now + Duration::days(RESALE_DELAY_DAYS),
            description: format!(
                "{} recovered from defaulted loan from {}. Good condition.",
                client.livestock_type, client.name
            ),
            images: vec![placeholder_image(&client.livestock_type)],
        };

        let mut removed_client = self.clients.remove(index);
        removed_client.status = ClientStatus::Defaulted;
        self.gallery.push(listing.clone());

        info!(
            "Client {} defaulted with balance {}; listed as {}",
            client_id,
            removed_client.balance(),
            listing.id
        );
        Ok(DefaultOutcome {
            removed_client,
            listing,
        })
    }

    /// The client a final payment reminder would go to. Reminders have no
    /// effect on the ledger and only make sense for loans still running.
    pub fn reminder_target(&self, client_id: u64) -> LedgerResult<&Client> {
        self.active_client(client_id)
    }

    /// Check the ledger's invariants and describe every violation.
    /// An empty result means the ledger is consistent.
    pub fn audit(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for client in &self.clients {
            let paid: Decimal = self
                .transactions
                .iter()
                .filter(|t| t.is_payment_for(client.id))
                .map(|t| t.amount)
                .sum();
            if paid != client.amount_paid {
                problems.push(format!(
                    "Client {} has amount paid {} but payments total {}",
                    client.id, client.amount_paid, paid
                ));
            }

            let should_be_completed = client.is_fully_paid();
            let is_completed = client.status == ClientStatus::Completed;
            if should_be_completed != is_completed {
                problems.push(format!(
                    "Client {} has status {:?} with {} paid of {}",
                    client.id,
                    client.status,
                    client.amount_paid,
                    client.expected_amount()
                ));
            }

            if let Some(application_id) = client.application_id {
                match self.application(application_id) {
                    Some(application) if application.status == ApplicationStatus::Approved => {
                        let loans: Vec<&Transaction> = self
                            .transactions
                            .iter()
                            .filter(|t| {
                                t.client_id == client.id
                                    && t.transaction_type == TransactionType::Loan
                            })
                            .collect();
                        if loans.len() != 1 || loans[0].amount != application.loan_amount {
                            problems.push(format!(
                                "Application {} should have exactly one loan entry of {}",
                                application.id, application.loan_amount
                            ));
                        }
                    }
                    _ => problems.push(format!(
                        "Client {} has no approved application {}",
                        client.id, application_id
                    )),
                }
            }
        }

        problems
    }

    fn application_index(&self, id: u64) -> LedgerResult<usize> {
        self.applications
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| LedgerError::not_found("Application", id))
    }

    fn pending_application_index(&self, id: u64) -> LedgerResult<usize> {
        let index = self.application_index(id)?;
        let application = &self.applications[index];
        if !application.is_pending() {
            return Err(LedgerError::InvalidState(format!(
                "Application {} for {} has already been {}",
                id,
                application.name,
                status_label(application.status)
            )));
        }
        Ok(index)
    }

    /// Defaulted clients are deleted but their ledger entries stay, so
    /// their ids must never be handed out again.
    fn next_client_id(&self) -> u64 {
        let live = self.clients.iter().map(|c| c.id);
        let recorded = self.transactions.iter().map(|t| t.client_id);
        live.chain(recorded).max().map_or(1, |max| max + 1)
    }

    fn client_index(&self, id: u64) -> LedgerResult<usize> {
        self.clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::not_found("Client", id))
    }

    fn active_client(&self, id: u64) -> LedgerResult<&Client> {
        let client = &self.clients[self.client_index(id)?];
        match client.status {
            ClientStatus::Active => Ok(client),
            ClientStatus::Completed => Err(LedgerError::InvalidState(format!(
                "Loan for {} is already fully repaid",
                client.name
            ))),
            ClientStatus::Defaulted => Err(LedgerError::InvalidState(format!(
                "Loan for {} has defaulted",
                client.name
            ))),
        }
    }
}

/// Next id in a collection: one past the highest id, or 1 when empty.
pub(super) fn next_id<T>(items: &[T], id: impl Fn(&T) -> u64) -> u64 {
    items.iter().map(id).max().map_or(1, |max| max + 1)
}

/// Round an incoming amount to cents and refuse anything above the ledger's limit
pub(super) fn bounded_amount(field: &str, amount: Decimal) -> LedgerResult<Decimal> {
    let amount = round_money(amount);
    if amount > max_amount() {
        return Err(LedgerError::InvalidInput(format!(
            "{} cannot exceed {}",
            field,
            max_amount()
        )));
    }
    Ok(amount)
}

pub(super) fn required_text(field: &str, value: &str) -> LedgerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::InvalidInput(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn status_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "submitted",
        ApplicationStatus::Approved => "approved",
        ApplicationStatus::Rejected => "rejected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    fn application_command(name: &str, loan_amount: i64) -> SubmitApplicationCommand {
        SubmitApplicationCommand {
            name: name.to_string(),
            phone: "0712000000".to_string(),
            id_number: "30111222".to_string(),
            loan_amount: Decimal::from(loan_amount),
            livestock_type: "goats".to_string(),
            livestock_count: 4,
            estimated_value: Decimal::from(loan_amount + 5_000),
            location: "Isinya".to_string(),
            additional_info: None,
            photos: vec![],
        }
    }

    /// A ledger with one approved, active client for `name`
    fn ledger_with_client(name: &str, borrowed: i64) -> (Ledger, u64) {
        let mut ledger = Ledger::new();
        let application = ledger
            .submit_application(application_command(name, borrowed), now())
            .unwrap();
        let approval = ledger.approve_application(application.id, now()).unwrap();
        (ledger, approval.client.id)
    }

    fn payment_total(ledger: &Ledger, client_id: u64) -> Decimal {
        ledger
            .transactions()
            .iter()
            .filter(|t| t.is_payment_for(client_id))
            .map(|t| t.amount)
            .sum()
    }

    #[test]
    fn test_submit_assigns_sequential_ids_and_pending_status() {
        let mut ledger = Ledger::new();
        let first = ledger.submit_application(application_command("Jane", 20_000), now()).unwrap();
        let second = ledger.submit_application(application_command("Jane", 20_000), now()).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, ApplicationStatus::Pending);
        assert_eq!(first.date, now());
        assert_eq!(ledger.pending_application_count(), 2);
    }

    #[test]
    fn test_submit_ids_follow_highest_existing_id() {
        let mut ledger = Ledger::new();
        ledger.submit_application(application_command("A", 1_000), now()).unwrap();
        let mut gap = ledger.applications[0].clone();
        gap.id = 9;
        ledger.applications.push(gap);

        let next = ledger.submit_application(application_command("B", 1_000), now()).unwrap();
        assert_eq!(next.id, 10);
    }

    #[test]
    fn test_submit_rejects_invalid_input() {
        let mut ledger = Ledger::new();

        let zero = ledger.submit_application(application_command("Jane", 0), now());
        assert!(matches!(zero, Err(LedgerError::InvalidInput(_))));

        let mut blank = application_command("   ", 1_000);
        blank.name = "   ".to_string();
        assert!(matches!(
            ledger.submit_application(blank, now()),
            Err(LedgerError::InvalidInput(_))
        ));

        let mut negative_value = application_command("Jane", 1_000);
        negative_value.estimated_value = Decimal::from(-1);
        assert!(ledger.submit_application(negative_value, now()).is_err());

        assert!(ledger.applications().is_empty());
    }

    #[test]
    fn test_approve_creates_client_and_loan_entry() {
        let mut ledger = Ledger::new();
        let application = ledger
            .submit_application(application_command("Jane", 20_000), now())
            .unwrap();

        let approval = ledger.approve_application(application.id, now()).unwrap();

        assert_eq!(approval.application.status, ApplicationStatus::Approved);
        assert_eq!(ledger.clients().len(), 1);
        let client = &ledger.clients()[0];
        assert_eq!(client.borrowed_amount, Decimal::from(20_000));
        assert_eq!(client.expected_return_date, now() + Duration::days(7));
        assert_eq!(client.status, ClientStatus::Active);
        assert_eq!(client.amount_paid, Decimal::ZERO);
        assert_eq!(client.application_id, Some(application.id));
        assert_eq!(client.livestock_value, Decimal::from(25_000));

        assert_eq!(ledger.transactions().len(), 1);
        let loan = &ledger.transactions()[0];
        assert_eq!(loan.transaction_type, TransactionType::Loan);
        assert_eq!(loan.amount, Decimal::from(20_000));
        assert_eq!(loan.method, "cash");
        assert_eq!(loan.status, TransactionStatus::Completed);
        assert!(ledger.audit().is_empty());
    }

    #[test]
    fn test_approve_twice_has_no_effect() {
        let (mut ledger, _) = ledger_with_client("Jane", 20_000);
        let before = ledger.clone();

        let again = ledger.approve_application(1, now());

        assert!(matches!(again, Err(LedgerError::InvalidState(_))));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_approve_unknown_application_is_not_found() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.approve_application(42, now()).unwrap_err(),
            LedgerError::not_found("Application", 42)
        );
    }

    #[test]
    fn test_reject_then_reject_again_is_noop() {
        let mut ledger = Ledger::new();
        let application = ledger
            .submit_application(application_command("Jane", 20_000), now())
            .unwrap();

        let rejected = ledger.reject_application(application.id).unwrap();
        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert!(ledger.clients().is_empty());
        assert!(ledger.transactions().is_empty());

        let before = ledger.clone();
        assert!(matches!(
            ledger.reject_application(application.id),
            Err(LedgerError::InvalidState(_))
        ));
        assert!(ledger.approve_application(application.id, now()).is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_full_payment_completes_loan() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);

        let outcome = ledger
            .record_payment(client_id, Decimal::from(13_000), "cash", now())
            .unwrap();

        assert_eq!(outcome.client.status, ClientStatus::Completed);
        assert_eq!(outcome.client.balance(), Decimal::ZERO);
        assert_eq!(outcome.transaction.transaction_type, TransactionType::Payment);
        assert_eq!(outcome.transaction.id, 2);
        assert!(ledger.audit().is_empty());
    }

    #[test]
    fn test_partial_payments_keep_loan_active() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        ledger
            .record_payment(client_id, Decimal::from(5_000), "cash", now())
            .unwrap();

        let outcome = ledger
            .record_payment(client_id, Decimal::from(5_000), "MPesa ", now())
            .unwrap();

        assert_eq!(outcome.client.amount_paid, Decimal::from(10_000));
        assert_eq!(outcome.client.expected_amount(), Decimal::from(13_000));
        assert_eq!(outcome.client.balance(), Decimal::from(3_000));
        assert_eq!(outcome.client.status, ClientStatus::Active);
        assert_eq!(outcome.transaction.method, "mpesa");
        assert_eq!(payment_total(&ledger, client_id), Decimal::from(10_000));
    }

    #[test]
    fn test_payment_against_completed_loan_is_refused() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        ledger
            .record_payment(client_id, Decimal::from(13_000), "cash", now())
            .unwrap();
        let before = ledger.clone();

        let late = ledger.record_payment(client_id, Decimal::from(100), "cash", now());

        assert!(matches!(late, Err(LedgerError::InvalidState(_))));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_payment_rejects_non_positive_amounts_and_blank_method() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);

        assert!(matches!(
            ledger.record_payment(client_id, Decimal::ZERO, "cash", now()),
            Err(LedgerError::InvalidInput(_))
        ));
        // rounds to 0.00
        assert!(ledger
            .record_payment(client_id, Decimal::new(4, 3), "cash", now())
            .is_err());
        assert!(ledger
            .record_payment(client_id, Decimal::from(10), " ", now())
            .is_err());
        assert!(matches!(
            ledger.record_payment(99, Decimal::from(10), "cash", now()),
            Err(LedgerError::NotFound { .. })
        ));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_amount_paid_is_monotone_and_matches_payments() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 50_000);
        let mut previous = Decimal::ZERO;
        for amount in [1_000, 2_500, 333, 10_000] {
            let outcome = ledger
                .record_payment(client_id, Decimal::from(amount), "cash", now())
                .unwrap();
            assert!(outcome.client.amount_paid >= previous);
            previous = outcome.client.amount_paid;
            assert_eq!(previous, payment_total(&ledger, client_id));
        }
    }

    #[test]
    fn test_payment_amount_is_rounded_to_cents() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        let outcome = ledger
            .record_payment(client_id, Decimal::new(100_005, 3), "cash", now())
            .unwrap();
        assert_eq!(outcome.transaction.amount, Decimal::new(10_001, 2));
        assert_eq!(outcome.client.amount_paid, Decimal::new(10_001, 2));
    }

    #[test]
    fn test_mark_defaulted_lists_collateral_and_removes_client() {
        let mut ledger = Ledger::new();
        let mut command = application_command("Samuel", 25_000);
        command.livestock_type = "sheep".to_string();
        command.livestock_count = 8;
        let application = ledger.submit_application(command, now()).unwrap();
        let client_id = ledger.approve_application(application.id, now()).unwrap().client.id;

        let outcome = ledger.mark_defaulted(client_id, now()).unwrap();

        assert!(ledger.client(client_id).is_none());
        assert_eq!(outcome.removed_client.status, ClientStatus::Defaulted);
        assert_eq!(ledger.gallery().len(), 1);
        let listing = &ledger.gallery()[0];
        assert_eq!(listing.price, Decimal::from(32_500));
        assert_eq!(listing.title, "8 sheep from Samuel");
        assert_eq!(listing.livestock_type, "sheep");
        assert_eq!(listing.available_date, now() + Duration::days(3));
        assert_eq!(listing.images.len(), 1);
        assert!(listing.description.contains("Samuel"));
        // the loan entry stays, nothing is added for the default
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_mark_defaulted_requires_active_loan() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        ledger
            .record_payment(client_id, Decimal::from(13_000), "cash", now())
            .unwrap();

        assert!(matches!(
            ledger.mark_defaulted(client_id, now()),
            Err(LedgerError::InvalidState(_))
        ));
        assert!(ledger.gallery().is_empty());
        assert!(matches!(
            ledger.mark_defaulted(77, now()),
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[test]
    fn test_transaction_ids_are_shared_across_kinds() {
        let (mut ledger, first) = ledger_with_client("A", 1_000);
        ledger.record_payment(first, Decimal::from(100), "cash", now()).unwrap();
        let application = ledger.submit_application(application_command("B", 2_000), now()).unwrap();
        let approval = ledger.approve_application(application.id, now()).unwrap();

        assert_eq!(approval.transaction.id, 3);
        assert_eq!(approval.client.id, 2);
    }

    #[test]
    fn test_reminder_only_for_active_loans() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        assert_eq!(ledger.reminder_target(client_id).unwrap().name, "Amina");

        ledger
            .record_payment(client_id, Decimal::from(20_000), "cash", now())
            .unwrap();
        assert!(ledger.reminder_target(client_id).is_err());
    }

    #[test]
    fn test_audit_reports_drift() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        ledger.clients[0].amount_paid = Decimal::from(500);

        let problems = ledger.audit();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains(&format!("Client {}", client_id)));
    }

    #[test]
    fn test_defaulted_client_id_is_not_reused() {
        let mut ledger = crate::domain::sample_data::sample_ledger(now());
        ledger.mark_defaulted(5, now()).unwrap();

        let approval = ledger.approve_application(1, now()).unwrap();

        assert_eq!(approval.client.id, 6);
        assert_eq!(ledger.transactions_for(6).len(), 1);
        assert_eq!(ledger.audit(), Vec::<String>::new());
    }

    #[test]
    fn test_amounts_above_limit_are_refused() {
        let mut ledger = Ledger::new();
        let mut command = application_command("Amina", 10_000);
        command.loan_amount = Decimal::MAX;
        assert!(matches!(
            ledger.submit_application(command, now()),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(ledger.applications().is_empty());

        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        let before = ledger.clone();
        assert!(matches!(
            ledger.record_payment(client_id, Decimal::MAX, "cash", now()),
            Err(LedgerError::InvalidInput(_))
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_payment_that_would_overflow_amount_paid_changes_nothing() {
        let (mut ledger, client_id) = ledger_with_client("Amina", 10_000);
        ledger.clients[0].amount_paid = Decimal::MAX - Decimal::ONE;
        let before = ledger.clone();

        let result = ledger.record_payment(client_id, Decimal::from(1_000), "cash", now());

        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
        assert_eq!(ledger, before);
    }
}
