//! Canonical bracket tables and modifiers for each simulated policy.
//!
//! A [`PolicySet`] bundles one validated [`SlabPolicy`] per schedule under a
//! version tag. [`PolicySet::builtin`] returns the FY 2024-25 tables; other
//! versions can be loaded from CSV through a policy source.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    BracketTable, BracketTableError, ModifierError, PolicyModifiers, Regime, TaxBracket,
};

/// Version tag of the built-in tables.
pub const BUILTIN_VERSION: &str = "FY2024-25";

/// Schedule names used to key policies in external tables.
pub const NEW_REGIME: &str = "new_regime";
pub const OLD_REGIME: &str = "old_regime";
pub const STARTUP_PROFIT: &str = "startup_profit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("invalid bracket table for '{policy}': {source}")]
    Table {
        policy: String,
        #[source]
        source: BracketTableError,
    },

    #[error("invalid modifiers for '{policy}': {source}")]
    Modifiers {
        policy: String,
        #[source]
        source: ModifierError,
    },
}

/// A named bracket table with the modifiers that go with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlabPolicy {
    pub name: String,
    pub table: BracketTable,
    pub modifiers: PolicyModifiers,
}

impl SlabPolicy {
    /// Validates the brackets and modifiers together.
    ///
    /// # Errors
    ///
    /// [`PolicyError::Table`] for malformed brackets, [`PolicyError::Modifiers`]
    /// for negative modifier values.
    pub fn new(
        name: impl Into<String>,
        brackets: Vec<TaxBracket>,
        modifiers: PolicyModifiers,
    ) -> Result<Self, PolicyError> {
        let name = name.into();
        let table = BracketTable::new(brackets).map_err(|source| PolicyError::Table {
            policy: name.clone(),
            source,
        })?;
        modifiers
            .validate()
            .map_err(|source| PolicyError::Modifiers {
                policy: name.clone(),
                source,
            })?;

        debug!(policy = %name, brackets = table.len(), "policy validated");

        Ok(Self {
            name,
            table,
            modifiers,
        })
    }

    /// Policy modifiers with user-claimed deductions stacked on the standard one.
    pub fn modifiers_with_additional_deduction(
        &self,
        extra: Decimal,
    ) -> PolicyModifiers {
        self.modifiers.with_additional_deduction(extra)
    }
}

/// Every schedule the simulators need, under one version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicySet {
    pub version: String,
    pub new_regime: SlabPolicy,
    pub old_regime: SlabPolicy,
    pub startup_profit: SlabPolicy,
}

impl PolicySet {
    /// The FY 2024-25 tables.
    ///
    /// | Policy | Slabs | Deduction | Rebate ceiling | Cess |
    /// |--------|-------|-----------|----------------|------|
    /// | New regime | 0–3L 0%, 3–6L 5%, 6–9L 10%, 9–12L 15%, 12–15L 20%, 15L+ 30% | 75,000 | 7,00,000 | 4% |
    /// | Old regime | 0–2.5L 0%, 2.5–5L 5%, 5–10L 20%, 10L+ 30% | 50,000 | 5,00,000 | 4% |
    /// | Startup profit | as new regime | 0 | none | 4% |
    pub fn builtin() -> Result<Self, PolicyError> {
        Ok(Self {
            version: BUILTIN_VERSION.to_string(),
            new_regime: SlabPolicy::new(
                NEW_REGIME,
                new_regime_brackets(),
                PolicyModifiers {
                    standard_deduction: dec!(75000),
                    rebate_threshold: Some(dec!(700000)),
                    cess_rate_percent: dec!(4),
                },
            )?,
            old_regime: SlabPolicy::new(
                OLD_REGIME,
                old_regime_brackets(),
                PolicyModifiers {
                    standard_deduction: dec!(50000),
                    rebate_threshold: Some(dec!(500000)),
                    cess_rate_percent: dec!(4),
                },
            )?,
            startup_profit: SlabPolicy::new(
                STARTUP_PROFIT,
                new_regime_brackets(),
                PolicyModifiers {
                    standard_deduction: Decimal::ZERO,
                    rebate_threshold: None,
                    cess_rate_percent: dec!(4),
                },
            )?,
        })
    }

    pub fn regime(
        &self,
        regime: Regime,
    ) -> &SlabPolicy {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }

    pub fn policies(&self) -> [&SlabPolicy; 3] {
        [&self.new_regime, &self.old_regime, &self.startup_profit]
    }
}

fn new_regime_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(dec!(0), Some(dec!(300000)), dec!(0)).with_label("₹0 - ₹3L"),
        TaxBracket::new(dec!(300000), Some(dec!(600000)), dec!(5)).with_label("₹3L - ₹6L"),
        TaxBracket::new(dec!(600000), Some(dec!(900000)), dec!(10)).with_label("₹6L - ₹9L"),
        TaxBracket::new(dec!(900000), Some(dec!(1200000)), dec!(15)).with_label("₹9L - ₹12L"),
        TaxBracket::new(dec!(1200000), Some(dec!(1500000)), dec!(20)).with_label("₹12L - ₹15L"),
        TaxBracket::new(dec!(1500000), None, dec!(30)).with_label("Above ₹15L"),
    ]
}

fn old_regime_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(dec!(0), Some(dec!(250000)), dec!(0)).with_label("₹0 - ₹2.5L"),
        TaxBracket::new(dec!(250000), Some(dec!(500000)), dec!(5)).with_label("₹2.5L - ₹5L"),
        TaxBracket::new(dec!(500000), Some(dec!(1000000)), dec!(20)).with_label("₹5L - ₹10L"),
        TaxBracket::new(dec!(1000000), None, dec!(30)).with_label("Above ₹10L"),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_tables_validate() {
        let set = PolicySet::builtin().unwrap();

        assert_eq!(set.version, "FY2024-25");
        assert_eq!(set.new_regime.table.len(), 6);
        assert_eq!(set.old_regime.table.len(), 4);
        assert_eq!(set.startup_profit.table, set.new_regime.table);
    }

    #[test]
    fn builtin_modifiers_match_statute() {
        let set = PolicySet::builtin().unwrap();

        assert_eq!(set.new_regime.modifiers.standard_deduction, dec!(75000));
        assert_eq!(set.new_regime.modifiers.rebate_threshold, Some(dec!(700000)));
        assert_eq!(set.old_regime.modifiers.standard_deduction, dec!(50000));
        assert_eq!(set.old_regime.modifiers.rebate_threshold, Some(dec!(500000)));
        assert_eq!(set.startup_profit.modifiers.rebate_threshold, None);
        for policy in set.policies() {
            assert_eq!(policy.modifiers.cess_rate_percent, dec!(4));
        }
    }

    #[test]
    fn regime_selects_matching_policy() {
        let set = PolicySet::builtin().unwrap();

        assert_eq!(set.regime(Regime::New).name, NEW_REGIME);
        assert_eq!(set.regime(Regime::Old).name, OLD_REGIME);
    }

    #[test]
    fn slab_policy_reports_table_errors_with_name() {
        let result = SlabPolicy::new("broken", vec![], PolicyModifiers::none());

        assert_eq!(
            result,
            Err(PolicyError::Table {
                policy: "broken".to_string(),
                source: BracketTableError::Empty,
            })
        );
    }

    #[test]
    fn slab_policy_reports_modifier_errors_with_name() {
        let modifiers = PolicyModifiers {
            cess_rate_percent: dec!(-4),
            ..PolicyModifiers::none()
        };

        let result = SlabPolicy::new("broken", new_regime_brackets(), modifiers);

        assert_eq!(
            result,
            Err(PolicyError::Modifiers {
                policy: "broken".to_string(),
                source: ModifierError::NegativeCessRate(dec!(-4)),
            })
        );
    }

    #[test]
    fn old_regime_user_deductions_stack() {
        let set = PolicySet::builtin().unwrap();

        let modifiers = set
            .old_regime
            .modifiers_with_additional_deduction(dec!(150000));

        assert_eq!(modifiers.standard_deduction, dec!(200000));
    }
}
