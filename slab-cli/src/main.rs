use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use slab_cli::config::{AppConfig, Overrides};
use slab_cli::report::{
    CompositionReport, GstReport, IncomeTaxReport, SlabsReport, StartupReport,
};
use slab_cli::{app, logging, parse_amount, parse_percent};
use slab_core::PolicySet;
use slab_core::Regime;
use slab_core::calculations::{
    BusinessType, CompositionInputs, CompositionSimulator, GstInputs, GstSimulator, HolidayInputs,
    IncomeTaxSimulator, StartupSimulator,
};

/// Deductions swept when looking for the old-regime break-even point.
const BREAKEVEN_CEILING: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const BREAKEVEN_STEP: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian slab-tax simulators: income tax regimes, startup tax holiday,
/// GST registration and the composition scheme.
///
/// Amounts accept plain numbers, `1,20,000` separators and `12L` / `1.5Cr`
/// shorthand.
#[derive(Debug, Parser)]
#[command(name = "slab-sim", version, about, long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Policy table backend (`builtin` or `csv`).
    #[arg(long, global = true)]
    source: Option<String>,

    /// Directory with brackets.csv and modifiers.csv. Implies `--source csv`.
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Log filter, a bare level or an EnvFilter directive.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare the new and old income tax regimes.
    IncomeTax(IncomeTaxArgs),
    /// Startup India tax holiday on business profit.
    Startup(StartupArgs),
    /// Impact of GST registration on price, cash flow and margin.
    Gst(GstArgs),
    /// Regular GST versus the composition scheme.
    Composition(CompositionArgs),
    /// Print the loaded slab tables.
    Slabs,
}

#[derive(Debug, Args)]
struct IncomeTaxArgs {
    /// Gross annual income.
    #[arg(long, value_parser = parse_amount)]
    income: Decimal,

    /// Deductions claimed under the old regime (80C, 80D, HRA, ...).
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    deductions: Decimal,

    /// Regime to report take-home pay for (`new` or `old`).
    #[arg(long, value_parser = parse_regime, default_value = "new")]
    regime: Regime,

    /// Leave 0% slabs out of the breakdown.
    #[arg(long)]
    hide_zero_slabs: bool,
}

#[derive(Debug, Args)]
struct StartupArgs {
    /// Annual business profit.
    #[arg(long, value_parser = parse_amount)]
    profit: Decimal,

    /// Years since incorporation, counting the current one.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 2)]
    years_active: u32,

    /// Holiday years already claimed.
    #[arg(long, default_value_t = 0)]
    holiday_used: u32,

    /// DPIIT-recognised (default).
    #[arg(long, overrides_with = "not_recognized")]
    recognized: bool,

    /// Not DPIIT-recognised.
    #[arg(long, overrides_with = "recognized")]
    not_recognized: bool,

    /// Years to project forward; 0 skips the projection.
    #[arg(long, default_value_t = 5)]
    projection_years: u32,
}

#[derive(Debug, Args)]
struct GstArgs {
    /// Annual turnover.
    #[arg(long, value_parser = parse_amount)]
    turnover: Decimal,

    /// Price per unit before GST.
    #[arg(long, value_parser = parse_amount)]
    base_price: Decimal,

    /// GST rate in percent.
    #[arg(long, value_parser = parse_percent, default_value = "18")]
    rate: Decimal,

    /// Profit margin in percent of the base price.
    #[arg(long, value_parser = parse_percent, default_value = "20")]
    margin: Decimal,
}

#[derive(Debug, Args)]
struct CompositionArgs {
    /// Annual turnover.
    #[arg(long, value_parser = parse_amount)]
    turnover: Decimal,

    /// `manufacturer`, `trader` or `restaurant`.
    #[arg(long, value_parser = parse_business_type, default_value = "trader")]
    business_type: BusinessType,

    /// Purchases as a percent of turnover.
    #[arg(long, value_parser = parse_percent, default_value = "60")]
    purchases: Decimal,
}

fn parse_regime(s: &str) -> Result<Regime, String> {
    Regime::parse(s).ok_or_else(|| format!("unknown regime '{s}' (expected new or old)"))
}

fn parse_business_type(s: &str) -> Result<BusinessType, String> {
    BusinessType::parse(s).ok_or_else(|| {
        format!("unknown business type '{s}' (expected manufacturer, trader or restaurant)")
    })
}

// ─── commands ────────────────────────────────────────────────────────────────

fn income_tax(
    set: &PolicySet,
    config: &AppConfig,
    args: &IncomeTaxArgs,
) {
    let include_zero = config.include_zero_rate_slabs && !args.hide_zero_slabs;
    let simulator = IncomeTaxSimulator::new(set).include_zero_rate_entries(include_zero);

    let comparison = simulator.compare(args.income, args.deductions, args.regime);
    let breakeven = simulator.breakeven_deduction(args.income, BREAKEVEN_CEILING, BREAKEVEN_STEP);

    let report = IncomeTaxReport {
        version: &set.version,
        comparison: &comparison,
        user_deductions: args.deductions,
        breakeven: (breakeven, BREAKEVEN_CEILING),
    };
    print!("{report}");
}

fn startup(
    set: &PolicySet,
    args: &StartupArgs,
) {
    let inputs = HolidayInputs {
        years_since_incorporation: args.years_active,
        holiday_years_already_used: args.holiday_used,
        is_recognized: args.recognized || !args.not_recognized,
    };
    if inputs.holiday_years_already_used > inputs.years_since_incorporation.saturating_add(1) {
        warn!(
            used = inputs.holiday_years_already_used,
            years = inputs.years_since_incorporation,
            "more holiday years claimed than years in operation"
        );
    }

    let simulator = StartupSimulator::new(set);
    let summary = simulator.simulate(args.profit, &inputs);
    let projection = simulator.project(args.profit, &inputs, args.projection_years);

    let report = StartupReport {
        version: &set.version,
        summary: &summary,
        projection: &projection,
    };
    print!("{report}");
}

fn gst(args: &GstArgs) -> Result<()> {
    let inputs = GstInputs {
        annual_turnover: args.turnover,
        base_price: args.base_price,
        gst_rate_percent: args.rate,
        profit_margin_percent: args.margin,
    };
    let summary = GstSimulator::default()
        .simulate(&inputs)
        .context("GST simulation failed")?;

    print!(
        "{}",
        GstReport {
            inputs: &inputs,
            summary: &summary,
        }
    );
    Ok(())
}

fn composition(args: &CompositionArgs) {
    let inputs = CompositionInputs {
        annual_turnover: args.turnover,
        business_type: args.business_type,
        purchases_percent: args.purchases,
    };
    let summary = CompositionSimulator::default().simulate(&inputs);

    print!(
        "{}",
        CompositionReport {
            inputs: &inputs,
            summary: &summary,
        }
    );
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_optional(cli.config.as_deref())?.with_overrides(&Overrides {
        log_level: cli.log_level.clone(),
        log_file: cli.log_file.clone(),
        source: cli.source.clone(),
        tables: cli.tables.clone(),
    });

    logging::init_logging(&config.effective_log_level(), config.log_file.as_deref())?;
    debug!(?config, "configuration resolved");

    // GST and composition do not use slab tables.
    match &cli.command {
        Command::Gst(args) => return gst(args),
        Command::Composition(args) => {
            composition(args);
            return Ok(());
        }
        _ => {}
    }

    let registry = app::build_registry();
    let set = app::load_policies(&registry, &config.source).with_context(|| {
        format!(
            "cannot load policy tables from '{}' backend",
            config.source.backend
        )
    })?;

    match &cli.command {
        Command::IncomeTax(args) => income_tax(&set, &config, args),
        Command::Startup(args) => startup(&set, args),
        Command::Slabs => print!("{}", SlabsReport { set: &set }),
        Command::Gst(_) | Command::Composition(_) => {}
    }

    Ok(())
}
