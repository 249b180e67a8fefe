use crate::domain::commands::payments::PendingPayment;
use crate::domain::models::Transaction;
use crate::domain::queries::TransactionFilter;
use shared::{PendingPaymentDto, TransactionDto, TransactionListRequest};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(transaction: &Transaction) -> TransactionDto {
        TransactionDto {
            id: transaction.id,
            client_id: transaction.client_id,
            client_name: transaction.client_name.clone(),
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            method: transaction.method.clone(),
            date: transaction.date,
            status: transaction.status,
        }
    }

    pub fn pending_to_dto(payment: PendingPayment) -> PendingPaymentDto {
        PendingPaymentDto {
            id: payment.id,
            client_id: payment.client_id,
            client_name: payment.client_name,
            phone: payment.phone,
            amount: payment.amount,
            requested_at: payment.requested_at,
        }
    }

    pub fn to_filter(request: TransactionListRequest) -> TransactionFilter {
        TransactionFilter {
            search: request.search.filter(|term| !term.trim().is_empty()),
            date: request.date,
        }
    }
}
