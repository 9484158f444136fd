//! Common utility functions for financial calculations.
//!
//! This module provides the shared arithmetic used by the financial model and
//! the advice helpers: one-decimal rounding, overflow-checked sums and
//! percentages, and strict parsing of user-entered amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::Ratio;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Raised when an amount is too large to be combined with another.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("arithmetic overflow")]
pub struct Overflow;

/// Why a single amount field was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("a value is required")]
    Missing,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' must not be negative")]
    Negative(String),
}

/// Rounds a decimal value to exactly one decimal place using half-up rounding.
///
/// Values at exactly 0.05 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::common::round_one_decimal;
///
/// assert_eq!(round_one_decimal(dec!(42.04)), dec!(42.0));
/// assert_eq!(round_one_decimal(dec!(42.05)), dec!(42.1));
/// assert_eq!(round_one_decimal(dec!(-42.05)), dec!(-42.1));
/// ```
pub fn round_one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-500.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Sums a sequence of amounts, failing instead of panicking on overflow.
///
/// Addition is commutative, so the result does not depend on the order of
/// `values`.
pub fn checked_sum<I>(values: I) -> Result<Decimal, Overflow>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v).ok_or(Overflow))
}

/// Expresses `part` as a percentage of `whole`, rounded to one decimal.
///
/// When `whole` is zero (or negative) there is no meaningful ratio and
/// [`Ratio::Undefined`] is returned instead of dividing.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::Ratio;
/// use finance_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(2100), dec!(5000)), Ok(Ratio::Percent(dec!(42.0))));
/// assert_eq!(percent_of(dec!(500), dec!(0)), Ok(Ratio::Undefined));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Result<Ratio, Overflow> {
    Ok(match exact_percent_of(part, whole)? {
        Some(percent) => Ratio::Percent(round_one_decimal(percent)),
        None => Ratio::Undefined,
    })
}

/// Like [`percent_of`] but unrounded, for comparing against thresholds.
///
/// Returns `None` when `whole` is zero or negative.
pub fn exact_percent_of(
    part: Decimal,
    whole: Decimal,
) -> Result<Option<Decimal>, Overflow> {
    if whole <= Decimal::ZERO {
        return Ok(None);
    }

    let fraction = part.checked_div(whole).ok_or(Overflow)?;
    let percent = fraction.checked_mul(ONE_HUNDRED).ok_or(Overflow)?;
    Ok(Some(percent))
}

/// Parses a user-entered, non-negative amount.
///
/// Surrounding whitespace is ignored and `,` is accepted as a thousands
/// separator (e.g. `"1,234.56"`). Unlike a lenient float parse, trailing
/// garbage such as `"12abc"` is rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, AmountError> {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Err(AmountError::Missing);
    }

    let value: Decimal = normalized
        .parse()
        .map_err(|_| AmountError::NotANumber(s.trim().to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative(s.trim().to_string()));
    }

    Ok(value)
}
