//! GST registration and profit-impact simulation.
//!
//! Models a single product line: a base price, a GST rate and a profit margin,
//! scaled to annual turnover. Input-tax credit and the cash tied up in GST are
//! modelled as fixed assumed percentages rather than derived from purchases.
//!
//! | Figure | Formula |
//! |--------|---------|
//! | GST per unit | base price × rate |
//! | Annual liability | turnover × rate |
//! | Estimated ITC | liability × ITC share |
//! | Net GST per unit | GST per unit − (cost × taxable input share × rate) |
//! | Profit after GST | profit per unit − net GST per unit × opportunity cost |
//! | Annual profit | turnover × margin |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::percent_of;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GstError {
    #[error("base price must be positive, got {0}")]
    NonPositiveBasePrice(Decimal),

    #[error("annual turnover must be non-negative, got {0}")]
    NegativeTurnover(Decimal),
}

/// Fixed modelling assumptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstAssumptions {
    /// Turnover at or above which registration is mandatory.
    pub registration_threshold: Decimal,
    /// Share of the annual liability assumed to be offset by input-tax credit.
    pub itc_share_percent: Decimal,
    /// Share of unit cost assumed to be GST-taxable inputs.
    pub taxable_input_share_percent: Decimal,
    /// Opportunity cost of cash tied up in net GST.
    pub cash_cost_percent: Decimal,
}

impl Default for GstAssumptions {
    fn default() -> Self {
        Self {
            registration_threshold: dec!(4000000),
            itc_share_percent: dec!(60),
            taxable_input_share_percent: dec!(60),
            cash_cost_percent: dec!(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstInputs {
    pub annual_turnover: Decimal,
    pub base_price: Decimal,
    pub gst_rate_percent: Decimal,
    pub profit_margin_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstSummary {
    pub registration_mandatory: bool,
    /// Threshold minus turnover; negative once past the threshold.
    pub threshold_distance: Decimal,

    pub gst_per_unit: Decimal,
    pub final_price: Decimal,

    pub annual_gst_liability: Decimal,
    pub estimated_input_credit: Decimal,
    pub net_gst_payable: Decimal,
    /// Monthly cash outflow from net GST, reported as a negative figure.
    pub monthly_cash_flow_impact: Decimal,

    pub net_gst_per_unit: Decimal,
    pub profit_per_unit_before_gst: Decimal,
    pub profit_per_unit_after_gst: Decimal,
    pub annual_profit_before_gst: Decimal,
    pub annual_profit_after_gst: Decimal,

    pub margin_before_gst_percent: Decimal,
    pub margin_after_gst_percent: Decimal,
    pub margin_compression_percent: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct GstSimulator {
    assumptions: GstAssumptions,
}

impl GstSimulator {
    pub fn new(assumptions: GstAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &GstAssumptions {
        &self.assumptions
    }

    /// # Errors
    ///
    /// [`GstError`] when the base price is not positive or turnover is negative.
    pub fn simulate(
        &self,
        inputs: &GstInputs,
    ) -> Result<GstSummary, GstError> {
        if inputs.base_price <= Decimal::ZERO {
            return Err(GstError::NonPositiveBasePrice(inputs.base_price));
        }
        if inputs.annual_turnover < Decimal::ZERO {
            return Err(GstError::NegativeTurnover(inputs.annual_turnover));
        }

        let a = &self.assumptions;
        let rate = inputs.gst_rate_percent;

        let registration_mandatory = inputs.annual_turnover >= a.registration_threshold;

        let gst_per_unit = percent_of(inputs.base_price, rate);
        let final_price = inputs.base_price + gst_per_unit;

        let annual_gst_liability = percent_of(inputs.annual_turnover, rate);
        let estimated_input_credit = percent_of(annual_gst_liability, a.itc_share_percent);
        let net_gst_payable = annual_gst_liability - estimated_input_credit;
        let monthly_cash_flow_impact = -net_gst_payable / dec!(12);

        let profit_per_unit_before_gst = percent_of(inputs.base_price, inputs.profit_margin_percent);
        let cost_price = inputs.base_price - profit_per_unit_before_gst;
        let taxable_inputs = percent_of(cost_price, a.taxable_input_share_percent);
        let input_gst = percent_of(taxable_inputs, rate);
        let net_gst_per_unit = gst_per_unit - input_gst;
        let profit_per_unit_after_gst =
            profit_per_unit_before_gst - percent_of(net_gst_per_unit, a.cash_cost_percent);

        let margin_after_gst_percent = profit_per_unit_after_gst * dec!(100) / inputs.base_price;

        debug!(
            turnover = %inputs.annual_turnover,
            %net_gst_payable,
            registration_mandatory,
            "gst simulated"
        );

        Ok(GstSummary {
            registration_mandatory,
            threshold_distance: a.registration_threshold - inputs.annual_turnover,
            gst_per_unit,
            final_price,
            annual_gst_liability,
            estimated_input_credit,
            net_gst_payable,
            monthly_cash_flow_impact,
            net_gst_per_unit,
            profit_per_unit_before_gst,
            profit_per_unit_after_gst,
            annual_profit_before_gst: percent_of(inputs.annual_turnover, inputs.profit_margin_percent),
            annual_profit_after_gst: percent_of(inputs.annual_turnover, margin_after_gst_percent),
            margin_before_gst_percent: inputs.profit_margin_percent,
            margin_after_gst_percent,
            margin_compression_percent: inputs.profit_margin_percent - margin_after_gst_percent,
        })
    }
}
