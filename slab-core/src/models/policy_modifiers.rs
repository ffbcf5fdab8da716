use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModifierError {
    #[error("standard deduction must be non-negative, got {0}")]
    NegativeStandardDeduction(Decimal),

    #[error("rebate threshold must be non-negative, got {0}")]
    NegativeRebateThreshold(Decimal),

    #[error("cess rate must be non-negative, got {0}%")]
    NegativeCessRate(Decimal),
}

/// Adjustments applied around the bracket computation.
///
/// * `standard_deduction` is subtracted from the gross amount before slabs apply.
/// * `rebate_threshold`, when set, zeroes the whole liability if taxable income
///   is at or below it.
/// * `cess_rate_percent` is levied on the summed slab tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyModifiers {
    pub standard_deduction: Decimal,
    pub rebate_threshold: Option<Decimal>,
    pub cess_rate_percent: Decimal,
}

impl PolicyModifiers {
    /// Modifiers that leave the slab computation untouched.
    pub fn none() -> Self {
        Self {
            standard_deduction: Decimal::ZERO,
            rebate_threshold: None,
            cess_rate_percent: Decimal::ZERO,
        }
    }

    pub fn validate(&self) -> Result<(), ModifierError> {
        if self.standard_deduction < Decimal::ZERO {
            return Err(ModifierError::NegativeStandardDeduction(
                self.standard_deduction,
            ));
        }
        if let Some(threshold) = self.rebate_threshold {
            if threshold < Decimal::ZERO {
                return Err(ModifierError::NegativeRebateThreshold(threshold));
            }
        }
        if self.cess_rate_percent < Decimal::ZERO {
            return Err(ModifierError::NegativeCessRate(self.cess_rate_percent));
        }
        Ok(())
    }

    /// Returns a copy with `extra` added to the standard deduction.
    /// Negative extras are treated as zero.
    pub fn with_additional_deduction(
        &self,
        extra: Decimal,
    ) -> Self {
        Self {
            standard_deduction: self.standard_deduction + extra.max(Decimal::ZERO),
            ..self.clone()
        }
    }
}

impl Default for PolicyModifiers {
    fn default() -> Self {
        Self::none()
    }
}
