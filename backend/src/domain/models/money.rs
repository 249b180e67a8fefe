//! Money arithmetic.
//!
//! Every amount entering the ledger is rounded to two decimal places with
//! midpoints rounded away from zero, and interest is rounded the same way.
//! Balances are differences of already-rounded values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed simple interest charged on every loan, as a multiplier of principal.
pub fn interest_multiplier() -> Decimal {
    Decimal::new(13, 1)
}

/// Largest single amount the ledger accepts: one trillion shillings.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_i64)
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Principal plus interest: the full amount a borrower has to repay.
///
/// Saturates at `Decimal::MAX` for principals no accepted input can reach.
pub fn expected_repayment(principal: Decimal) -> Decimal {
    principal
        .checked_mul(interest_multiplier())
        .map_or(Decimal::MAX, round_money)
}
