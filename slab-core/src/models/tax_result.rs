use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income that fell into one bracket and the tax charged on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    pub bracket_label: String,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
    pub rate_percent: Decimal,
}

/// Outcome of one slab evaluation. Amounts are unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Gross amount minus the standard deduction, floored at zero.
    pub taxable_income: Decimal,

    /// Sum of slab taxes before cess.
    pub base_tax: Decimal,

    /// Cess levied on `base_tax`; zero when the rebate applies.
    pub cess_amount: Decimal,

    /// Liability after cess and rebate.
    pub total_tax: Decimal,

    /// `base_tax + cess` as computed before any rebate override.
    pub tax_before_rebate: Decimal,

    pub rebate_applied: bool,

    /// Ascending bracket order; empty when the rebate applies.
    pub breakdown: Vec<BracketBreakdown>,
}

impl TaxResult {
    /// Liability the rebate removed (zero when no rebate applied).
    pub fn rebate_savings(&self) -> Decimal {
        self.tax_before_rebate - self.total_tax
    }

    /// Total of `taxable_amount` across breakdown entries.
    pub fn breakdown_income(&self) -> Decimal {
        self.breakdown.iter().map(|b| b.taxable_amount).sum()
    }
}
