//! Common arithmetic helpers shared by the simulators.
//!
//! All helpers work on [`Decimal`] so percentage arithmetic stays exact;
//! rounding is only applied by callers preparing values for display.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use slab_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `rate_percent` percent of `amount`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use slab_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(25000), dec!(4)), dec!(1000));
/// assert_eq!(percent_of(dec!(100001), dec!(10)), dec!(10000.1));
/// ```
pub fn percent_of(
    amount: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    amount * rate_percent / dec!(100)
}

/// Expresses `part` as a percentage of `whole`, or zero when `whole` is not
/// positive.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use slab_core::calculations::common::share_percent;
///
/// assert_eq!(share_percent(dec!(81900), dec!(1200000)), dec!(6.825));
/// assert_eq!(share_percent(dec!(10), dec!(0)), dec!(0));
/// ```
pub fn share_percent(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole > Decimal::ZERO {
        part * dec!(100) / whole
    } else {
        Decimal::ZERO
    }
}
