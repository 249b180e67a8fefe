//! Errors raised by ledger operations.
use thiserror::Error;

/// Why a ledger operation was refused.
///
/// Every variant leaves the ledger untouched: operations check all of their
/// preconditions before the first mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The record exists but its status forbids the operation
    #[error("{0}")]
    InvalidState(String),

    /// The request itself is malformed (non-positive amount, blank field, ...)
    #[error("{0}")]
    InvalidInput(String),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
