//! One-line summaries of stored records
//!
//! Cards, transactions and attendance records each render themselves for
//! admin listings and CLI output through [`Describe`].

use rust_decimal::{Decimal, RoundingStrategy};

/// Human-readable one-line summary of a record
pub trait Describe {
    fn describe(&self) -> String;
}

/// Format an amount with exactly two decimal places, rounding half away from zero
pub fn two_decimals(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Format an amount with at most two decimal places and no trailing zeros
pub fn compact_amount(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
