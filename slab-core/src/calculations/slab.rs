//! Progressive slab-tax evaluation.
//!
//! # Evaluation order
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Clamp a negative gross amount to zero |
//! | 2    | Taxable income = gross − standard deduction (minimum 0) |
//! | 3    | Per bracket: overlap × rate, summed into the base tax |
//! | 4    | Cess = base tax × cess rate |
//! | 5    | Total = base tax + cess |
//! | 6    | Rebate: taxable income ≤ threshold zeroes the total, the cess and the breakdown |
//!
//! The rebate is an all-or-nothing override applied after the un-rebated figure
//! is known, so [`TaxResult::tax_before_rebate`] always carries what would have
//! been owed.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use slab_core::calculations::SlabEvaluator;
//! use slab_core::PolicySet;
//!
//! let policies = PolicySet::builtin().unwrap();
//! let policy = &policies.new_regime;
//!
//! let result = SlabEvaluator::new(&policy.table).evaluate(dec!(775001), &policy.modifiers);
//!
//! assert_eq!(result.taxable_income, dec!(700001));
//! assert_eq!(result.base_tax, dec!(25000.1));
//! assert_eq!(result.total_tax, dec!(26000.104));
//! assert!(!result.rebate_applied);
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, trace};

use crate::calculations::common::percent_of;
use crate::models::{BracketBreakdown, BracketTable, PolicyModifiers, TaxBracket, TaxResult};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// Strict evaluation refuses negative gross amounts instead of clamping them.
    #[error("gross amount must be non-negative, got {0}")]
    NegativeGrossAmount(Decimal),
}

/// Evaluates a validated [`BracketTable`] against gross amounts.
///
/// The evaluator holds no state between calls; evaluating the same input twice
/// yields identical results.
#[derive(Debug, Clone, Copy)]
pub struct SlabEvaluator<'a> {
    table: &'a BracketTable,
    include_zero_rate_entries: bool,
}

impl<'a> SlabEvaluator<'a> {
    /// Creates an evaluator that reports every bracket with positive overlap,
    /// zero-rate brackets included.
    pub fn new(table: &'a BracketTable) -> Self {
        Self {
            table,
            include_zero_rate_entries: true,
        }
    }

    /// Controls whether brackets taxed at 0% appear in the breakdown.
    ///
    /// When disabled the breakdown no longer sums to the taxable income; the
    /// totals are unaffected either way.
    pub fn include_zero_rate_entries(
        mut self,
        include: bool,
    ) -> Self {
        self.include_zero_rate_entries = include;
        self
    }

    pub fn table(&self) -> &'a BracketTable {
        self.table
    }

    /// Computes the liability for `gross_amount`.
    ///
    /// A negative gross amount is treated as zero income.
    pub fn evaluate(
        &self,
        gross_amount: Decimal,
        modifiers: &PolicyModifiers,
    ) -> TaxResult {
        let gross = if gross_amount < Decimal::ZERO {
            debug!(%gross_amount, "negative gross amount clamped to zero");
            Decimal::ZERO
        } else {
            gross_amount
        };

        let taxable_income = self.taxable_income(gross, modifiers.standard_deduction);
        let (base_tax, breakdown) = self.apply_brackets(taxable_income);
        let cess_amount = percent_of(base_tax, modifiers.cess_rate_percent);
        let total_tax = base_tax + cess_amount;

        let rebate_applied = modifiers
            .rebate_threshold
            .is_some_and(|threshold| taxable_income <= threshold);

        if rebate_applied {
            debug!(%taxable_income, waived = %total_tax, "full rebate applied");
            return TaxResult {
                taxable_income,
                base_tax,
                cess_amount: Decimal::ZERO,
                total_tax: Decimal::ZERO,
                tax_before_rebate: total_tax,
                rebate_applied,
                breakdown: Vec::new(),
            };
        }

        TaxResult {
            taxable_income,
            base_tax,
            cess_amount,
            total_tax,
            tax_before_rebate: total_tax,
            rebate_applied,
            breakdown,
        }
    }

    /// Like [`evaluate`](Self::evaluate) but rejects negative gross amounts.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::NegativeGrossAmount`] when `gross_amount < 0`.
    pub fn evaluate_strict(
        &self,
        gross_amount: Decimal,
        modifiers: &PolicyModifiers,
    ) -> Result<TaxResult, EvaluationError> {
        if gross_amount < Decimal::ZERO {
            return Err(EvaluationError::NegativeGrossAmount(gross_amount));
        }
        Ok(self.evaluate(gross_amount, modifiers))
    }

    /// The bracket whose rate applies to the next unit of `taxable_income`.
    ///
    /// Used for labelling only; evaluation never consults it.
    pub fn find_effective_bracket(
        &self,
        taxable_income: Decimal,
    ) -> &'a TaxBracket {
        self.table.effective_bracket(taxable_income)
    }

    fn taxable_income(
        &self,
        gross: Decimal,
        standard_deduction: Decimal,
    ) -> Decimal {
        (gross - standard_deduction).max(Decimal::ZERO)
    }

    fn apply_brackets(
        &self,
        taxable_income: Decimal,
    ) -> (Decimal, Vec<BracketBreakdown>) {
        let mut base_tax = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for bracket in self.table {
            let overlap = bracket.overlap(taxable_income);
            if overlap <= Decimal::ZERO {
                continue;
            }

            let tax = percent_of(overlap, bracket.rate_percent);
            base_tax += tax;
            trace!(bracket = %bracket.label, %overlap, %tax, "bracket applied");

            if bracket.rate_percent > Decimal::ZERO || self.include_zero_rate_entries {
                breakdown.push(BracketBreakdown {
                    bracket_label: bracket.label.clone(),
                    taxable_amount: overlap,
                    tax,
                    rate_percent: bracket.rate_percent,
                });
            }
        }

        (base_tax, breakdown)
    }
}
