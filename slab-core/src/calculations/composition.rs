//! GST Composition Scheme versus regular GST.
//!
//! Regular GST charges the standard rate on sales and refunds input-tax credit
//! on purchases. The composition scheme charges a flat, lower rate on turnover
//! but forfeits that credit, in exchange for lighter compliance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::percent_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Manufacturer,
    #[default]
    Trader,
    Restaurant,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturer => "manufacturer",
            Self::Trader => "trader",
            Self::Restaurant => "restaurant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manufacturer" => Some(Self::Manufacturer),
            "trader" => Some(Self::Trader),
            "restaurant" => Some(Self::Restaurant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionAssumptions {
    /// Turnover ceiling for opting into the scheme.
    pub composition_limit: Decimal,
    /// Turnover at or above which GST registration is required.
    pub gst_threshold: Decimal,
    pub regular_rate_percent: Decimal,
    pub manufacturer_rate_percent: Decimal,
    pub trader_rate_percent: Decimal,
    pub restaurant_rate_percent: Decimal,
    /// Annual cost of monthly returns and detailed records.
    pub regular_compliance_cost: Decimal,
    /// Annual cost of quarterly returns.
    pub composition_compliance_cost: Decimal,
}

impl Default for CompositionAssumptions {
    fn default() -> Self {
        Self {
            composition_limit: dec!(15000000),
            gst_threshold: dec!(4000000),
            regular_rate_percent: dec!(18),
            manufacturer_rate_percent: dec!(1),
            trader_rate_percent: dec!(1),
            restaurant_rate_percent: dec!(5),
            regular_compliance_cost: dec!(48000),
            composition_compliance_cost: dec!(12000),
        }
    }
}

impl CompositionAssumptions {
    pub fn composition_rate(
        &self,
        business_type: BusinessType,
    ) -> Decimal {
        match business_type {
            BusinessType::Manufacturer => self.manufacturer_rate_percent,
            BusinessType::Trader => self.trader_rate_percent,
            BusinessType::Restaurant => self.restaurant_rate_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionInputs {
    pub annual_turnover: Decimal,
    pub business_type: BusinessType,
    /// Purchases as a percentage of turnover.
    pub purchases_percent: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositionStatus {
    BelowThreshold,
    Eligible,
    NotEligible,
}

impl CompositionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowThreshold => "Below GST Threshold",
            Self::Eligible => "Eligible for Composition",
            Self::NotEligible => "Not Eligible for Composition",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSummary {
    pub status: CompositionStatus,
    pub is_eligible: bool,
    pub is_gst_required: bool,
    pub composition_rate_percent: Decimal,

    pub regular_gst_on_sales: Decimal,
    pub input_tax_credit: Decimal,
    pub net_regular_gst: Decimal,
    pub composition_tax: Decimal,
    /// Credit forgone by choosing the scheme.
    pub lost_itc: Decimal,
    /// Net regular GST minus composition tax; negative when regular is cheaper.
    pub composition_benefit: Decimal,
    /// Composition tax is strictly below net regular GST.
    pub composition_cheaper: bool,

    pub regular_compliance_cost: Decimal,
    pub composition_compliance_cost: Decimal,
    pub total_regular_cost: Decimal,
    pub total_composition_cost: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct CompositionSimulator {
    assumptions: CompositionAssumptions,
}

impl CompositionSimulator {
    pub fn new(assumptions: CompositionAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &CompositionAssumptions {
        &self.assumptions
    }

    pub fn simulate(
        &self,
        inputs: &CompositionInputs,
    ) -> CompositionSummary {
        let a = &self.assumptions;
        let turnover = inputs.annual_turnover.max(Decimal::ZERO);

        let is_eligible = turnover <= a.composition_limit;
        let is_gst_required = turnover >= a.gst_threshold;
        let status = if !is_gst_required {
            CompositionStatus::BelowThreshold
        } else if is_eligible {
            CompositionStatus::Eligible
        } else {
            CompositionStatus::NotEligible
        };

        let composition_rate_percent = a.composition_rate(inputs.business_type);

        let regular_gst_on_sales = percent_of(turnover, a.regular_rate_percent);
        let purchases = percent_of(turnover, inputs.purchases_percent);
        let input_tax_credit = percent_of(purchases, a.regular_rate_percent);
        let net_regular_gst = regular_gst_on_sales - input_tax_credit;

        let composition_tax = percent_of(turnover, composition_rate_percent);
        let composition_benefit = net_regular_gst - composition_tax;

        debug!(
            %turnover,
            business_type = inputs.business_type.as_str(),
            %composition_benefit,
            "composition simulated"
        );

        CompositionSummary {
            status,
            is_eligible,
            is_gst_required,
            composition_rate_percent,
            regular_gst_on_sales,
            input_tax_credit,
            net_regular_gst,
            composition_tax,
            lost_itc: input_tax_credit,
            composition_benefit,
            composition_cheaper: composition_tax < net_regular_gst,
            regular_compliance_cost: a.regular_compliance_cost,
            composition_compliance_cost: a.composition_compliance_cost,
            total_regular_cost: net_regular_gst + a.regular_compliance_cost,
            total_composition_cost: composition_tax + a.composition_compliance_cost,
        }
    }
}
