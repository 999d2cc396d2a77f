//! Lenient parsing for user-entered numeric text.
//!
//! Goal amounts, goal periods, and limit values follow a forgiving policy: text
//! that does not parse becomes zero rather than an error. The strict path for
//! recorded savings lives in [`crate::plan::GoalLedger::add_saving`], which
//! rejects non-positive values outright.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a decimal amount, treating missing or malformed text as zero.
pub fn amount_or_zero(text: &str) -> Decimal {
    Decimal::from_str(text.trim()).unwrap_or(Decimal::ZERO)
}

/// Parses a whole number of months, treating missing, malformed, or negative
/// text as zero.
pub fn months_or_zero(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(0)
}
