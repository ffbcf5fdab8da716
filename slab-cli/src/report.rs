//! Plain-text reports printed by `slab-sim`.

use std::fmt;

use rust_decimal::Decimal;
use slab_core::calculations::{
    CompositionInputs, CompositionSummary, EligibilityStatus, GstInputs, GstSummary,
    ProjectionYear, RegimeComparison, RegimeOutcome, StartupSummary,
};
use slab_core::{PolicySet, Regime, SlabPolicy, TaxResult};

use crate::format::{format_inr, format_percent, format_rupees};

fn row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    writeln!(f, "  {label:<26}{value}")
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn breakdown(
    f: &mut fmt::Formatter<'_>,
    result: &TaxResult,
) -> fmt::Result {
    if result.rebate_applied {
        return writeln!(
            f,
            "  Rebate applies: {} waived, nothing payable.",
            format_inr(result.rebate_savings())
        );
    }
    if result.breakdown.is_empty() {
        return writeln!(f, "  No taxable income.");
    }
    for entry in &result.breakdown {
        writeln!(
            f,
            "  {:<18}{:>12} @ {:>5}  {:>12}",
            entry.bracket_label,
            format_inr(entry.taxable_amount),
            format_percent(entry.rate_percent),
            format_inr(entry.tax)
        )?;
    }
    Ok(())
}

/// Side-by-side new vs old regime comparison.
pub struct IncomeTaxReport<'a> {
    pub version: &'a str,
    pub comparison: &'a RegimeComparison,
    pub user_deductions: Decimal,
    /// Smallest deduction that makes the old regime cheaper, with the sweep ceiling.
    pub breakeven: (Option<Decimal>, Decimal),
}

impl IncomeTaxReport<'_> {
    fn column(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        new: impl fmt::Display,
        old: impl fmt::Display,
    ) -> fmt::Result {
        writeln!(f, "  {label:<26}{new:>16}{old:>16}")
    }
}

impl fmt::Display for IncomeTaxReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.comparison;
        let (new, old): (&RegimeOutcome, &RegimeOutcome) = (&c.new_regime, &c.old_regime);

        writeln!(f, "Income tax ({})", self.version)?;
        row(f, "Gross income", format_inr(c.gross_income))?;
        row(f, "Declared deductions", format_inr(self.user_deductions))?;
        writeln!(f)?;

        Self::column(f, "", Regime::New.label(), Regime::Old.label())?;
        Self::column(
            f,
            "Taxable income",
            format_inr(new.result.taxable_income),
            format_inr(old.result.taxable_income),
        )?;
        Self::column(
            f,
            "Slab tax",
            format_inr(new.result.base_tax),
            format_inr(old.result.base_tax),
        )?;
        Self::column(
            f,
            "Cess",
            format_inr(new.result.cess_amount),
            format_inr(old.result.cess_amount),
        )?;
        Self::column(
            f,
            "Total tax",
            format_inr(new.result.total_tax),
            format_inr(old.result.total_tax),
        )?;
        Self::column(
            f,
            "Rebate applied",
            yes_no(new.result.rebate_applied),
            yes_no(old.result.rebate_applied),
        )?;
        Self::column(
            f,
            "Marginal rate",
            format_percent(new.marginal_bracket.rate_percent),
            format_percent(old.marginal_bracket.rate_percent),
        )?;
        writeln!(f)?;

        if c.savings.is_zero() {
            writeln!(f, "Both regimes cost the same.")?;
        } else {
            writeln!(
                f,
                "{} saves {}.",
                c.better_regime.label(),
                format_inr(c.savings)
            )?;
        }

        let selected = c.selected_outcome();
        writeln!(f)?;
        writeln!(f, "{} (selected)", c.selected.label())?;
        row(f, "Marginal slab", &selected.marginal_bracket.label)?;
        row(f, "Net income", format_inr(c.net_income))?;
        row(f, "Effective rate", format_percent(c.effective_rate_percent))?;
        row(f, "Monthly take-home", format_inr(c.monthly_take_home))?;
        writeln!(f)?;
        writeln!(f, "Slab breakdown")?;
        breakdown(f, &selected.result)?;
        writeln!(f)?;

        match self.breakeven {
            (Some(deduction), _) => writeln!(
                f,
                "Old regime becomes cheaper with deductions of {} or more.",
                format_inr(deduction)
            ),
            (None, ceiling) => writeln!(
                f,
                "No deduction up to {} makes the old regime cheaper.",
                format_inr(ceiling)
            ),
        }
    }
}

/// Startup tax-holiday summary with an optional year-by-year projection.
pub struct StartupReport<'a> {
    pub version: &'a str,
    pub summary: &'a StartupSummary,
    pub projection: &'a [ProjectionYear],
}

impl fmt::Display for StartupReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = self.summary;
        let eligibility = &s.holiday.eligibility;

        writeln!(f, "Startup profit tax ({})", self.version)?;
        row(f, "Annual profit", format_inr(s.annual_profit))?;
        row(f, "Status", eligibility.status.label())?;
        if let EligibilityStatus::Eligible { years_remaining } = eligibility.status {
            row(f, "Holiday years remaining", years_remaining)?;
        }
        row(f, "Within 10-year window", yes_no(eligibility.is_within_window))?;
        writeln!(f)?;
        row(f, "Tax without holiday", format_inr(s.normal_tax))?;
        row(f, "Tax payable", format_inr(s.holiday.payable_tax))?;
        row(f, "Tax waived", format_inr(s.holiday.waived_tax))?;
        row(f, "Net profit", format_inr(s.net_profit))?;
        row(f, "Effective rate", format_percent(s.effective_tax_rate_percent))?;
        row(f, "Marginal slab", &s.marginal_bracket.label)?;
        row(f, "Potential savings", format_inr(s.total_potential_savings))?;
        row(f, "Remaining savings", format_inr(s.remaining_savings))?;

        if self.projection.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(
            f,
            "  {:<6}{:<9}{:>14}{:>14}{:>14}",
            "Year", "Holiday", "Tax", "Net profit", "Savings"
        )?;
        for year in self.projection {
            writeln!(
                f,
                "  {:<6}{:<9}{:>14}{:>14}{:>14}",
                year.year,
                yes_no(year.holiday_claimed),
                format_inr(year.tax_with_holiday),
                format_inr(year.profit_with_holiday),
                format_inr(year.savings)
            )?;
        }
        let total: Decimal = self.projection.iter().map(|y| y.savings).sum();
        row(f, "Total savings", format_inr(total))
    }
}

/// GST registration impact for one product line.
pub struct GstReport<'a> {
    pub inputs: &'a GstInputs,
    pub summary: &'a GstSummary,
}

impl fmt::Display for GstReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let (i, s) = (self.inputs, self.summary);

        writeln!(f, "GST registration")?;
        row(f, "Annual turnover", format_inr(i.annual_turnover))?;
        row(f, "Registration mandatory", yes_no(s.registration_mandatory))?;
        if s.registration_mandatory {
            row(f, "Above threshold by", format_inr(-s.threshold_distance))?;
        } else {
            row(f, "Headroom to threshold", format_inr(s.threshold_distance))?;
        }
        writeln!(f)?;
        row(f, "Base price", format_inr(i.base_price))?;
        row(f, "GST per unit", format_inr(s.gst_per_unit))?;
        row(f, "Final price", format_inr(s.final_price))?;
        writeln!(f)?;
        row(f, "Annual GST liability", format_inr(s.annual_gst_liability))?;
        row(f, "Estimated input credit", format_inr(s.estimated_input_credit))?;
        row(f, "Net GST payable", format_inr(s.net_gst_payable))?;
        row(f, "Monthly cash flow", format_inr(s.monthly_cash_flow_impact))?;
        writeln!(f)?;
        row(f, "Profit per unit", format_inr(s.profit_per_unit_before_gst))?;
        row(f, "Profit per unit after GST", format_inr(s.profit_per_unit_after_gst))?;
        row(f, "Annual profit", format_inr(s.annual_profit_before_gst))?;
        row(f, "Annual profit after GST", format_inr(s.annual_profit_after_gst))?;
        row(
            f,
            "Margin",
            format!(
                "{} -> {} (-{})",
                format_percent(s.margin_before_gst_percent),
                format_percent(s.margin_after_gst_percent),
                format_percent(s.margin_compression_percent)
            ),
        )
    }
}

/// Regular GST versus the composition scheme.
pub struct CompositionReport<'a> {
    pub inputs: &'a CompositionInputs,
    pub summary: &'a CompositionSummary,
}

impl fmt::Display for CompositionReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let (i, s) = (self.inputs, self.summary);

        writeln!(f, "Composition scheme")?;
        row(f, "Annual turnover", format_inr(i.annual_turnover))?;
        row(f, "Business type", i.business_type.as_str())?;
        row(f, "Status", s.status.label())?;
        row(f, "Composition rate", format_percent(s.composition_rate_percent))?;
        writeln!(f)?;
        row(f, "Regular GST on sales", format_inr(s.regular_gst_on_sales))?;
        row(f, "Input tax credit", format_inr(s.input_tax_credit))?;
        row(f, "Net regular GST", format_inr(s.net_regular_gst))?;
        row(f, "Composition tax", format_inr(s.composition_tax))?;
        row(f, "ITC given up", format_inr(s.lost_itc))?;
        writeln!(f)?;
        row(f, "Total cost, regular", format_inr(s.total_regular_cost))?;
        row(f, "Total cost, composition", format_inr(s.total_composition_cost))?;

        if !s.is_eligible {
            writeln!(f, "Turnover exceeds the composition limit; regular GST applies.")
        } else if s.composition_cheaper {
            writeln!(f, "Composition saves {} in tax.", format_inr(s.composition_benefit))
        } else {
            writeln!(
                f,
                "Regular GST is cheaper by {} in tax.",
                format_inr(-s.composition_benefit)
            )
        }
    }
}

/// Every loaded bracket table with its modifiers.
pub struct SlabsReport<'a> {
    pub set: &'a PolicySet,
}

fn policy_table(
    f: &mut fmt::Formatter<'_>,
    policy: &SlabPolicy,
) -> fmt::Result {
    let m = &policy.modifiers;
    writeln!(f, "{}", policy.name)?;
    for bracket in &policy.table {
        writeln!(f, "  {:<18}{:>8}", bracket.label, format_percent(bracket.rate_percent))?;
    }
    row(f, "Standard deduction", format_rupees(m.standard_deduction))?;
    match m.rebate_threshold {
        Some(threshold) => row(f, "Rebate up to", format_rupees(threshold))?,
        None => row(f, "Rebate up to", "none")?,
    }
    row(f, "Cess", format_percent(m.cess_rate_percent))
}

impl fmt::Display for SlabsReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Policy tables {}", self.set.version)?;
        for policy in self.set.policies() {
            writeln!(f)?;
            policy_table(f, policy)?;
        }
        Ok(())
    }
}
