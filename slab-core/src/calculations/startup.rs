//! Startup India profit-tax simulation.
//!
//! Profit is taxed on the startup slabs, then the 80-IAC overlay decides
//! whether that liability is waived. The projection walks forward one fiscal
//! year at a time, re-running the overlay with an advancing count of holiday
//! years used.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::share_percent;
use crate::calculations::holiday::{HolidayInputs, HolidayOutcome, HolidayOverlay};
use crate::calculations::slab::SlabEvaluator;
use crate::models::TaxBracket;
use crate::policy::{PolicySet, SlabPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupSummary {
    pub annual_profit: Decimal,
    pub holiday: HolidayOutcome,
    /// Liability without the holiday.
    pub normal_tax: Decimal,
    pub net_profit: Decimal,
    pub effective_tax_rate_percent: Decimal,
    pub marginal_bracket: TaxBracket,
    /// Normal tax multiplied by the full holiday allowance.
    pub total_potential_savings: Decimal,
    /// Normal tax multiplied by the holiday years still available.
    pub remaining_savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionYear {
    /// Years since incorporation for this row.
    pub year: u32,
    pub holiday_claimed: bool,
    pub tax_without_holiday: Decimal,
    pub tax_with_holiday: Decimal,
    pub profit_without_holiday: Decimal,
    pub profit_with_holiday: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct StartupSimulator<'a> {
    policy: &'a SlabPolicy,
    overlay: HolidayOverlay,
}

impl<'a> StartupSimulator<'a> {
    pub fn new(policies: &'a PolicySet) -> Self {
        Self {
            policy: &policies.startup_profit,
            overlay: HolidayOverlay::default(),
        }
    }

    pub fn with_overlay(
        mut self,
        overlay: HolidayOverlay,
    ) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn simulate(
        &self,
        annual_profit: Decimal,
        inputs: &HolidayInputs,
    ) -> StartupSummary {
        let evaluator = SlabEvaluator::new(&self.policy.table);
        let evaluated = evaluator.evaluate(annual_profit, &self.policy.modifiers);
        let normal_tax = evaluated.total_tax;
        let marginal_bracket = evaluator
            .find_effective_bracket(evaluated.taxable_income)
            .clone();

        let holiday = self.overlay.apply(inputs, evaluated);
        let net_profit = annual_profit - holiday.payable_tax;
        let max_years = Decimal::from(self.overlay.rules().max_holiday_years);
        let remaining_years = Decimal::from(holiday.eligibility.holiday_years_remaining);

        StartupSummary {
            annual_profit,
            normal_tax,
            net_profit,
            effective_tax_rate_percent: share_percent(holiday.payable_tax, annual_profit),
            marginal_bracket,
            total_potential_savings: normal_tax * max_years,
            remaining_savings: normal_tax * remaining_years,
            holiday,
        }
    }

    /// Projects `years` consecutive fiscal years starting at `inputs`.
    ///
    /// Profit is held constant. Each claimed year increments the holiday count
    /// fed into the next year's overlay call.
    pub fn project(
        &self,
        annual_profit: Decimal,
        inputs: &HolidayInputs,
        years: u32,
    ) -> Vec<ProjectionYear> {
        let evaluator = SlabEvaluator::new(&self.policy.table);
        let mut current = *inputs;

        (0..years)
            .map(|offset| {
                current.years_since_incorporation =
                    inputs.years_since_incorporation.saturating_add(offset);

                let evaluated = evaluator.evaluate(annual_profit, &self.policy.modifiers);
                let outcome = self.overlay.apply(&current, evaluated);
                let claimed = outcome.eligibility.can_claim_holiday;
                if claimed {
                    current.holiday_years_already_used =
                        current.holiday_years_already_used.saturating_add(1);
                }

                let tax_without_holiday = outcome.evaluated.total_tax;
                ProjectionYear {
                    year: current.years_since_incorporation,
                    holiday_claimed: claimed,
                    tax_without_holiday,
                    tax_with_holiday: outcome.payable_tax,
                    profit_without_holiday: annual_profit - tax_without_holiday,
                    profit_with_holiday: annual_profit - outcome.payable_tax,
                    savings: outcome.waived_tax,
                }
            })
            .collect()
    }
}
