//! Section 80-IAC tax-holiday overlay.
//!
//! The overlay decides whether an already-evaluated liability is waived for a
//! single fiscal year. It keeps no memory between calls: a caller simulating
//! several years re-invokes it once per year with its own running count of
//! holiday years used.
//!
//! | Check | Rule |
//! |-------|------|
//! | Recognition | the startup must be recognised |
//! | Window | years since incorporation ≤ 10 |
//! | Remaining | 3 − years already used > 0 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::TaxResult;

/// Years after incorporation during which the holiday may be claimed.
pub const ELIGIBILITY_WINDOW_YEARS: u32 = 10;

/// Holiday years a startup may claim in total.
pub const MAX_HOLIDAY_YEARS: u32 = 3;

/// Per-year facts about the startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInputs {
    pub years_since_incorporation: u32,
    pub holiday_years_already_used: u32,
    pub is_recognized: bool,
}

/// Statutory limits; [`Default`] gives the Section 80-IAC values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRules {
    pub eligibility_window_years: u32,
    pub max_holiday_years: u32,
}

impl Default for HolidayRules {
    fn default() -> Self {
        Self {
            eligibility_window_years: ELIGIBILITY_WINDOW_YEARS,
            max_holiday_years: MAX_HOLIDAY_YEARS,
        }
    }
}

/// Why a holiday can or cannot be claimed, in the order the checks are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityStatus {
    NotRecognized,
    WindowExpired,
    Exhausted,
    Eligible { years_remaining: u32 },
}

impl EligibilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotRecognized => "Recognition Required",
            Self::WindowExpired => "Eligibility Window Expired",
            Self::Exhausted => "Tax Holiday Exhausted",
            Self::Eligible { .. } => "Tax Holiday Active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEligibility {
    pub is_within_window: bool,
    pub holiday_years_remaining: u32,
    pub can_claim_holiday: bool,
    pub status: EligibilityStatus,
}

/// Liability after the overlay, with the evaluated figure kept for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayOutcome {
    pub eligibility: HolidayEligibility,
    /// Tax actually payable this year.
    pub payable_tax: Decimal,
    /// Tax the holiday removed; zero when no holiday was claimed.
    pub waived_tax: Decimal,
    /// The slab evaluation the overlay was applied to, unmodified.
    pub evaluated: TaxResult,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HolidayOverlay {
    rules: HolidayRules,
}

impl HolidayOverlay {
    pub fn new(rules: HolidayRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> HolidayRules {
        self.rules
    }

    pub fn assess(
        &self,
        inputs: &HolidayInputs,
    ) -> HolidayEligibility {
        let is_within_window =
            inputs.years_since_incorporation <= self.rules.eligibility_window_years;
        let holiday_years_remaining = self
            .rules
            .max_holiday_years
            .saturating_sub(inputs.holiday_years_already_used);
        let can_claim_holiday =
            inputs.is_recognized && is_within_window && holiday_years_remaining > 0;

        let status = if !inputs.is_recognized {
            EligibilityStatus::NotRecognized
        } else if !is_within_window {
            EligibilityStatus::WindowExpired
        } else if holiday_years_remaining == 0 {
            EligibilityStatus::Exhausted
        } else {
            EligibilityStatus::Eligible {
                years_remaining: holiday_years_remaining,
            }
        };

        HolidayEligibility {
            is_within_window,
            holiday_years_remaining,
            can_claim_holiday,
            status,
        }
    }

    pub fn apply(
        &self,
        inputs: &HolidayInputs,
        evaluated: TaxResult,
    ) -> HolidayOutcome {
        let eligibility = self.assess(inputs);

        let (payable_tax, waived_tax) = if eligibility.can_claim_holiday {
            (Decimal::ZERO, evaluated.total_tax)
        } else {
            (evaluated.total_tax, Decimal::ZERO)
        };

        debug!(
            years = inputs.years_since_incorporation,
            used = inputs.holiday_years_already_used,
            claimed = eligibility.can_claim_holiday,
            %payable_tax,
            "holiday overlay applied"
        );

        HolidayOutcome {
            eligibility,
            payable_tax,
            waived_tax,
            evaluated,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn inputs(
        years: u32,
        used: u32,
        recognized: bool,
    ) -> HolidayInputs {
        HolidayInputs {
            years_since_incorporation: years,
            holiday_years_already_used: used,
            is_recognized: recognized,
        }
    }

    fn evaluated(total: Decimal) -> TaxResult {
        TaxResult {
            taxable_income: dec!(5000000),
            base_tax: total,
            cess_amount: Decimal::ZERO,
            total_tax: total,
            tax_before_rebate: total,
            rebate_applied: false,
            breakdown: Vec::new(),
        }
    }

    #[test]
    fn recognized_young_startup_can_claim() {
        let eligibility = HolidayOverlay::default().assess(&inputs(2, 0, true));

        assert!(eligibility.is_within_window);
        assert_eq!(eligibility.holiday_years_remaining, 3);
        assert!(eligibility.can_claim_holiday);
        assert_eq!(
            eligibility.status,
            EligibilityStatus::Eligible { years_remaining: 3 }
        );
    }

    #[test]
    fn claimable_holiday_waives_all_tax() {
        let outcome = HolidayOverlay::default().apply(&inputs(2, 0, true), evaluated(dec!(1248000)));

        assert_eq!(outcome.payable_tax, dec!(0));
        assert_eq!(outcome.waived_tax, dec!(1248000));
        assert_eq!(outcome.evaluated.total_tax, dec!(1248000));
    }

    #[test]
    fn exhausted_holiday_cannot_be_claimed() {
        let overlay = HolidayOverlay::default();

        let outcome = overlay.apply(&inputs(2, 3, true), evaluated(dec!(1248000)));

        assert!(!outcome.eligibility.can_claim_holiday);
        assert_eq!(outcome.eligibility.status, EligibilityStatus::Exhausted);
        assert_eq!(outcome.payable_tax, dec!(1248000));
        assert_eq!(outcome.waived_tax, dec!(0));
    }

    #[test]
    fn overused_count_saturates_at_zero_remaining() {
        let eligibility = HolidayOverlay::default().assess(&inputs(2, 7, true));

        assert_eq!(eligibility.holiday_years_remaining, 0);
        assert!(!eligibility.can_claim_holiday);
    }

    #[test]
    fn tenth_year_is_still_within_window() {
        let eligibility = HolidayOverlay::default().assess(&inputs(10, 0, true));

        assert!(eligibility.is_within_window);
        assert!(eligibility.can_claim_holiday);
    }

    #[test]
    fn eleventh_year_is_outside_window() {
        let eligibility = HolidayOverlay::default().assess(&inputs(11, 0, true));

        assert!(!eligibility.is_within_window);
        assert!(!eligibility.can_claim_holiday);
        assert_eq!(eligibility.status, EligibilityStatus::WindowExpired);
    }

    #[test]
    fn unrecognized_startup_reports_recognition_first() {
        let eligibility = HolidayOverlay::default().assess(&inputs(11, 3, false));

        assert!(!eligibility.can_claim_holiday);
        assert_eq!(eligibility.status, EligibilityStatus::NotRecognized);
    }

    #[test]
    fn custom_rules_change_limits() {
        let overlay = HolidayOverlay::new(HolidayRules {
            eligibility_window_years: 5,
            max_holiday_years: 1,
        });

        assert!(!overlay.assess(&inputs(6, 0, true)).can_claim_holiday);
        assert!(!overlay.assess(&inputs(3, 1, true)).can_claim_holiday);
        assert!(overlay.assess(&inputs(3, 0, true)).can_claim_holiday);
    }

    #[test]
    fn status_labels() {
        assert_eq!(
            EligibilityStatus::Eligible { years_remaining: 1 }.label(),
            "Tax Holiday Active"
        );
        assert_eq!(EligibilityStatus::Exhausted.label(), "Tax Holiday Exhausted");
    }
}
