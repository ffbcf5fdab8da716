//! Old-versus-new regime comparison for salaried income.
//!
//! The new regime applies only its own standard deduction; the old regime
//! stacks user-claimed deductions (80C, 80D, HRA and so on) on top of its
//! standard deduction. Both results are computed on every call so the caller
//! can show the cheaper regime next to the selected one.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use slab_core::calculations::IncomeTaxSimulator;
//! use slab_core::{PolicySet, Regime};
//!
//! let policies = PolicySet::builtin().unwrap();
//! let simulator = IncomeTaxSimulator::new(&policies);
//!
//! let comparison = simulator.compare(dec!(1200000), dec!(150000), Regime::New);
//!
//! assert_eq!(comparison.new_regime.result.total_tax, dec!(81900));
//! assert_eq!(comparison.better_regime, Regime::New);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::share_percent;
use crate::calculations::slab::SlabEvaluator;
use crate::models::{Regime, TaxBracket, TaxResult};
use crate::policy::PolicySet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeOutcome {
    pub regime: Regime,
    pub result: TaxResult,
    /// Marginal bracket for this regime's taxable income.
    pub marginal_bracket: TaxBracket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub gross_income: Decimal,
    pub new_regime: RegimeOutcome,
    pub old_regime: RegimeOutcome,
    /// Old regime only when strictly cheaper; ties favour the new regime.
    pub better_regime: Regime,
    /// Absolute difference between the two liabilities.
    pub savings: Decimal,
    pub selected: Regime,
    /// Gross income minus the selected regime's tax.
    pub net_income: Decimal,
    pub effective_rate_percent: Decimal,
    pub monthly_take_home: Decimal,
}

impl RegimeComparison {
    pub fn outcome(
        &self,
        regime: Regime,
    ) -> &RegimeOutcome {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }

    pub fn selected_outcome(&self) -> &RegimeOutcome {
        self.outcome(self.selected)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxSimulator<'a> {
    policies: &'a PolicySet,
    include_zero_rate_entries: bool,
}

impl<'a> IncomeTaxSimulator<'a> {
    pub fn new(policies: &'a PolicySet) -> Self {
        Self {
            policies,
            include_zero_rate_entries: true,
        }
    }

    pub fn include_zero_rate_entries(
        mut self,
        include: bool,
    ) -> Self {
        self.include_zero_rate_entries = include;
        self
    }

    /// Evaluates one regime. `user_deductions` only affect the old regime.
    pub fn evaluate(
        &self,
        regime: Regime,
        gross_income: Decimal,
        user_deductions: Decimal,
    ) -> RegimeOutcome {
        let policy = self.policies.regime(regime);
        let modifiers = match regime {
            Regime::New => policy.modifiers.clone(),
            Regime::Old => policy.modifiers_with_additional_deduction(user_deductions),
        };

        let evaluator =
            SlabEvaluator::new(&policy.table).include_zero_rate_entries(self.include_zero_rate_entries);
        let result = evaluator.evaluate(gross_income, &modifiers);
        let marginal_bracket = evaluator
            .find_effective_bracket(result.taxable_income)
            .clone();

        RegimeOutcome {
            regime,
            result,
            marginal_bracket,
        }
    }

    pub fn compare(
        &self,
        gross_income: Decimal,
        user_deductions: Decimal,
        selected: Regime,
    ) -> RegimeComparison {
        let new_regime = self.evaluate(Regime::New, gross_income, user_deductions);
        let old_regime = self.evaluate(Regime::Old, gross_income, user_deductions);

        let new_tax = new_regime.result.total_tax;
        let old_tax = old_regime.result.total_tax;
        let better_regime = if old_tax < new_tax {
            Regime::Old
        } else {
            Regime::New
        };

        let current_tax = match selected {
            Regime::New => new_tax,
            Regime::Old => old_tax,
        };
        let net_income = gross_income - current_tax;

        debug!(
            %gross_income,
            %user_deductions,
            %new_tax,
            %old_tax,
            better = better_regime.as_str(),
            "regimes compared"
        );

        RegimeComparison {
            gross_income,
            better_regime,
            savings: (old_tax - new_tax).abs(),
            selected,
            net_income,
            effective_rate_percent: share_percent(current_tax, gross_income),
            monthly_take_home: net_income / dec!(12),
            new_regime,
            old_regime,
        }
    }

    /// Smallest swept deduction at which the old regime becomes strictly cheaper.
    ///
    /// Deductions `0, step, 2·step, …` up to and including `max_deduction` are
    /// tried in order. Returns `None` when none qualifies or `step` is not
    /// positive.
    pub fn breakeven_deduction(
        &self,
        gross_income: Decimal,
        max_deduction: Decimal,
        step: Decimal,
    ) -> Option<Decimal> {
        if step <= Decimal::ZERO {
            return None;
        }

        let new_tax = self
            .evaluate(Regime::New, gross_income, Decimal::ZERO)
            .result
            .total_tax;

        let mut deduction = Decimal::ZERO;
        while deduction <= max_deduction {
            let old_tax = self
                .evaluate(Regime::Old, gross_income, deduction)
                .result
                .total_tax;
            if old_tax < new_tax {
                return Some(deduction);
            }
            deduction += step;
        }
        None
    }
}
