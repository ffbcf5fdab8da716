//! The largest amount and percentage the parsers accept must flow through
//! every simulator and report without overflowing.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use slab_cli::format::{MAX_AMOUNT, parse_amount, parse_percent};
use slab_cli::report::{CompositionReport, GstReport, IncomeTaxReport, StartupReport};
use slab_core::calculations::{
    BusinessType, CompositionInputs, CompositionSimulator, GstInputs, GstSimulator, HolidayInputs,
    IncomeTaxSimulator, StartupSimulator,
};
use slab_core::{PolicySet, Regime};

fn largest_amount() -> Decimal {
    parse_amount("1,00,00,00,00,00,00,000").expect("limit should parse")
}

#[test]
fn test_income_tax_at_the_limit() {
    let set = PolicySet::builtin().unwrap();
    let simulator = IncomeTaxSimulator::new(&set);
    let income = largest_amount();

    let comparison = simulator.compare(income, income, Regime::Old);
    let breakeven =
        simulator.breakeven_deduction(income, Decimal::from(1_000_000), Decimal::from(10_000));

    assert_eq!(income, MAX_AMOUNT);
    assert!(comparison.new_regime.result.total_tax > Decimal::ZERO);
    let report = IncomeTaxReport {
        version: &set.version,
        comparison: &comparison,
        user_deductions: income,
        breakeven: (breakeven, Decimal::from(1_000_000)),
    };
    assert!(!report.to_string().is_empty());
}

#[test]
fn test_startup_at_the_limit() {
    let set = PolicySet::builtin().unwrap();
    let simulator = StartupSimulator::new(&set);
    let inputs = HolidayInputs {
        years_since_incorporation: u32::MAX,
        holiday_years_already_used: u32::MAX,
        is_recognized: true,
    };

    let summary = simulator.simulate(largest_amount(), &inputs);
    let projection = simulator.project(largest_amount(), &inputs, 5);

    assert_eq!(projection.len(), 5);
    let report = StartupReport {
        version: &set.version,
        summary: &summary,
        projection: &projection,
    };
    assert!(!report.to_string().is_empty());
}

#[test]
fn test_gst_at_the_limit() {
    let inputs = GstInputs {
        annual_turnover: largest_amount(),
        base_price: parse_amount("0.01").unwrap(),
        gst_rate_percent: parse_percent("100%").unwrap(),
        profit_margin_percent: parse_percent("100").unwrap(),
    };

    let summary = GstSimulator::default().simulate(&inputs).unwrap();

    assert_eq!(summary.annual_gst_liability, MAX_AMOUNT);
    let report = GstReport {
        inputs: &inputs,
        summary: &summary,
    };
    assert!(!report.to_string().is_empty());
}

#[test]
fn test_composition_at_the_limit() {
    let inputs = CompositionInputs {
        annual_turnover: largest_amount(),
        business_type: BusinessType::Restaurant,
        purchases_percent: parse_percent("100").unwrap(),
    };

    let summary = CompositionSimulator::default().simulate(&inputs);

    assert!(!summary.is_eligible);
    let report = CompositionReport {
        inputs: &inputs,
        summary: &summary,
    };
    assert!(!report.to_string().is_empty());
}
