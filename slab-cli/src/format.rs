//! Parsing and display of rupee amounts.
//!
//! Input accepts plain numbers, Indian or western digit separators and the
//! `k` / `L` / `Cr` shorthand (`12L` is twelve lakh). Output abbreviates to
//! lakh or crore with two decimals and uses Indian grouping below one lakh.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Largest accepted amount, 10^15 rupees.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

static AMOUNT_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(k|l|lac|lacs|lakh|lakhs|cr|crore|crores)?$")
});

/// Error returned when a command-line amount cannot be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{0}': expected a number such as 1,20,000, 12L or 1.5Cr")]
    Invalid(String),

    #[error("amount '{0}' is above the limit of 10,00,00,000 Cr")]
    TooLarge(String),

    #[error("percentage '{0}' must be between 0 and 100")]
    PercentOutOfRange(String),
}

/// Strips whitespace, the rupee sign and digit separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses a non-negative rupee amount no larger than [`MAX_AMOUNT`].
///
/// ```
/// use rust_decimal::Decimal;
/// use slab_cli::format::parse_amount;
///
/// assert_eq!(parse_amount("1,20,000").unwrap(), Decimal::from(120_000));
/// assert_eq!(parse_amount("12L").unwrap(), Decimal::from(1_200_000));
/// assert_eq!(parse_amount("1.5Cr").unwrap(), Decimal::from(15_000_000));
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let invalid = || {
        tracing::warn!(input = %s, "invalid amount");
        ParseAmountError::Invalid(s.trim().to_string())
    };

    let pattern = AMOUNT_RE.as_ref().map_err(|_| invalid())?;
    let caps = pattern.captures(&normalized).ok_or_else(invalid)?;
    let number: Decimal = caps[1].parse().map_err(|_| invalid())?;

    let multiplier = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => Decimal::ONE,
        Some(unit) if unit == "k" => THOUSAND,
        Some(unit) if unit.starts_with('c') => CRORE,
        Some(_) => LAKH,
    };

    let too_large = || {
        tracing::warn!(input = %s, "amount above limit");
        ParseAmountError::TooLarge(s.trim().to_string())
    };

    let amount = number.checked_mul(multiplier).ok_or_else(too_large)?;
    if amount > MAX_AMOUNT {
        return Err(too_large());
    }
    Ok(amount)
}

/// Parses a percentage from 0 to 100 such as `18`, `12.5` or `18%`.
pub fn parse_percent(s: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = s.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    let value: Decimal = trimmed
        .parse()
        .map_err(|_| ParseAmountError::Invalid(s.trim().to_string()))?;
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(ParseAmountError::PercentOutOfRange(s.trim().to_string()));
    }
    Ok(value)
}

/// Groups an unsigned digit string the Indian way: `1200000` → `12,00,000`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

fn sign_of(amount: Decimal) -> &'static str {
    if amount < Decimal::ZERO { "-" } else { "" }
}

/// Whole rupees with Indian grouping, e.g. `₹12,00,000`.
pub fn format_rupees(amount: Decimal) -> String {
    let whole = amount
        .abs()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .trunc()
        .normalize();
    format!("{}₹{}", sign_of(amount), group_indian(&whole.to_string()))
}

/// Abbreviated display used in reports.
///
/// `₹1.50 Cr` from one crore up, `₹12.00 L` from one lakh up, otherwise whole
/// rupees with Indian grouping (`₹81,900`).
pub fn format_inr(amount: Decimal) -> String {
    let abs = amount.abs();
    let scaled = |unit: Decimal, suffix: &str| {
        let value =
            (abs / unit).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}₹{:.2} {}", sign_of(amount), value, suffix)
    };

    if abs >= CRORE {
        scaled(CRORE, "Cr")
    } else if abs >= LAKH {
        scaled(LAKH, "L")
    } else {
        format_rupees(amount)
    }
}

/// One decimal place, e.g. `6.8%`.
pub fn format_percent(value: Decimal) -> String {
    format!(
        "{:.1}%",
        value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}
