use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use slab_core::SlabPolicy;
use slab_data::TableLoader;

/// Validate a directory of slab policy tables.
///
/// The directory must contain:
/// - brackets.csv: version, policy, lower_bound, upper_bound, rate_percent, label
/// - modifiers.csv: version, policy, standard_deduction, rebate_threshold, cess_rate_percent
///
/// Exits non-zero when any table is malformed.
#[derive(Parser, Debug)]
#[command(name = "slab-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing brackets.csv and modifiers.csv
    #[arg(short, long, default_value = "slab-data/data/fy2024-25")]
    dir: PathBuf,

    /// Print every bracket, not just the per-policy summary
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking policy tables in: {}", args.dir.display());

    let set = TableLoader::load_dir(&args.dir)
        .with_context(|| format!("Invalid policy tables in: {}", args.dir.display()))?;

    println!("Version {}", set.version);
    for policy in set.policies() {
        print_policy(policy, args.verbose);
    }
    println!("All {} policies are valid.", set.policies().len());

    Ok(())
}

fn print_policy(policy: &SlabPolicy, verbose: bool) {
    let modifiers = &policy.modifiers;
    let rebate = modifiers
        .rebate_threshold
        .map(|t| t.to_string())
        .unwrap_or_else(|| "none".to_string());

    println!(
        "  {:<16} {} brackets, deduction {}, rebate {}, cess {}%",
        policy.name,
        policy.table.len(),
        modifiers.standard_deduction,
        rebate,
        modifiers.cess_rate_percent
    );

    if verbose {
        for bracket in &policy.table {
            println!("    {:<20} {}%", bracket.label, bracket.rate_percent);
        }
    }
}
