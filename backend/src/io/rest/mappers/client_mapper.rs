use chrono::{DateTime, Utc};

use crate::domain::calendar::days_until;
use crate::domain::models::Client;
use crate::domain::queries::ClientFilter;
use shared::{ClientListRequest, ClientView};

pub struct ClientMapper;

impl ClientMapper {
    /// Client record plus its figures as of `now`
    pub fn to_view(client: &Client, now: DateTime<Utc>) -> ClientView {
        ClientView {
            id: client.id,
            application_id: client.application_id,
            name: client.name.clone(),
            phone: client.phone.clone(),
            id_number: client.id_number.clone(),
            borrowed_amount: client.borrowed_amount,
            borrowed_date: client.borrowed_date,
            expected_return_date: client.expected_return_date,
            amount_paid: client.amount_paid,
            status: client.status,
            livestock_type: client.livestock_type.clone(),
            livestock_count: client.livestock_count,
            livestock_value: client.livestock_value,
            expected_amount: client.expected_amount(),
            balance: client.balance(),
            days_remaining: days_until(client.expected_return_date, now),
        }
    }

    pub fn to_filter(request: ClientListRequest) -> ClientFilter {
        ClientFilter {
            search: request.search.filter(|term| !term.trim().is_empty()),
            status: request.status,
            due_date: request.due_date,
        }
    }
}
