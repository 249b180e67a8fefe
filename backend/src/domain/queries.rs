//! Read-only views over the ledger.
//!
//! Everything here is a pure function of the ledger, the current instant and
//! the business calendar. Calendar-day comparisons ("due today", the date
//! pickers) go through [`BusinessCalendar`]; "overdue" compares instants.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{ClientStatus, StatusFilter};

use super::calendar::BusinessCalendar;
use super::ledger::Ledger;
use super::models::{Client, Transaction};

/// Active and due on the same calendar day as `now`.
pub fn is_due_today(client: &Client, now: DateTime<Utc>, calendar: &BusinessCalendar) -> bool {
    client.is_active() && calendar.same_day(client.expected_return_date, now)
}

/// Active with a due date strictly in the past.
///
/// A loan due earlier today is both due today and overdue.
pub fn is_overdue(client: &Client, now: DateTime<Utc>) -> bool {
    client.is_active() && client.expected_return_date < now
}

pub fn due_today<'a>(
    clients: &'a [Client],
    now: DateTime<Utc>,
    calendar: &BusinessCalendar,
) -> Vec<&'a Client> {
    clients
        .iter()
        .filter(|c| is_due_today(c, now, calendar))
        .collect()
}

pub fn overdue(clients: &[Client], now: DateTime<Utc>) -> Vec<&Client> {
    clients.iter().filter(|c| is_overdue(c, now)).collect()
}

/// Case-insensitive substring match on name, phone and ID number.
/// A blank term matches everything.
pub fn matches_search(client: &Client, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [&client.name, &client.phone, &client.id_number]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

pub fn matches_status(
    client: &Client,
    filter: StatusFilter,
    now: DateTime<Utc>,
    calendar: &BusinessCalendar,
) -> bool {
    match filter {
        StatusFilter::Active => client.is_active(),
        StatusFilter::DueToday => is_due_today(client, now, calendar),
        StatusFilter::Overdue => is_overdue(client, now),
        StatusFilter::Completed => client.status == ClientStatus::Completed,
    }
}

pub fn is_due_on(client: &Client, date: NaiveDate, calendar: &BusinessCalendar) -> bool {
    calendar.date_of(client.expected_return_date) == date
}

/// Client list filter. Unset parts are ignored and the rest combine by
/// conjunction. Defaulted clients never match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub due_date: Option<NaiveDate>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client, now: DateTime<Utc>, calendar: &BusinessCalendar) -> bool {
        if client.status == ClientStatus::Defaulted {
            return false;
        }
        if let Some(term) = &self.search {
            if !matches_search(client, term) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if !matches_status(client, status, now, calendar) {
                return false;
            }
        }
        match self.due_date {
            Some(date) => is_due_on(client, date, calendar),
            None => true,
        }
    }

    pub fn apply<'a>(
        &self,
        clients: &'a [Client],
        now: DateTime<Utc>,
        calendar: &BusinessCalendar,
    ) -> Vec<&'a Client> {
        clients
            .iter()
            .filter(|c| self.matches(c, now, calendar))
            .collect()
    }
}

/// Transaction list filter: substring search over client name, type and
/// method, and an optional calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction, calendar: &BusinessCalendar) -> bool {
        if let Some(term) = &self.search {
            let term = term.trim().to_lowercase();
            let hit = term.is_empty()
                || transaction.client_name.to_lowercase().contains(&term)
                || transaction.transaction_type.to_string().contains(&term)
                || transaction.method.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        match self.date {
            Some(date) => calendar.date_of(transaction.date) == date,
            None => true,
        }
    }

    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
        calendar: &BusinessCalendar,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t, calendar))
            .collect()
    }
}

/// Headline figures for the operator dashboard. Money figures cover every
/// client that has not defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub total_lent: Decimal,
    pub total_received: Decimal,
    /// Received minus lent; negative while loans are outstanding
    pub total_revenue: Decimal,
    pub pending_applications: usize,
    pub due_today: usize,
    pub overdue: usize,
}

impl DashboardStats {
    pub fn compute(ledger: &Ledger, now: DateTime<Utc>, calendar: &BusinessCalendar) -> Self {
        let counted: Vec<&Client> = ledger
            .clients()
            .iter()
            .filter(|c| c.status != ClientStatus::Defaulted)
            .collect();

        let total_lent: Decimal = counted.iter().map(|c| c.borrowed_amount).sum();
        let total_received: Decimal = counted.iter().map(|c| c.amount_paid).sum();

        Self {
            total_clients: counted.len(),
            total_lent,
            total_received,
            total_revenue: total_received - total_lent,
            pending_applications: ledger.pending_application_count(),
            due_today: due_today(ledger.clients(), now, calendar).len(),
            overdue: overdue(ledger.clients(), now).len(),
        }
    }
}
