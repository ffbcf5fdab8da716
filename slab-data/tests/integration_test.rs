//! Integration tests for loading policy tables from the shipped CSV files.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use slab_core::calculations::{IncomeTaxSimulator, SlabEvaluator};
use slab_core::{
    BracketTableError, PolicyError, PolicySet, Regime, SourceConfig, SourceError, SourceRegistry,
};
use slab_data::{CsvSourceFactory, TableLoader, TableLoaderError};

fn data_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_shipped_tables_match_builtin() {
    let loaded = TableLoader::load_dir(&data_dir("fy2024-25")).expect("Failed to load tables");
    let builtin = PolicySet::builtin().expect("Built-in tables are valid");

    assert_eq!(loaded, builtin);
}

#[test]
fn test_shipped_tables_evaluate_like_builtin() {
    let set = TableLoader::load_dir(&data_dir("fy2024-25")).expect("Failed to load tables");
    let policy = set.regime(Regime::New);

    let result = SlabEvaluator::new(&policy.table).evaluate(dec!(1200000), &policy.modifiers);

    assert_eq!(result.taxable_income, dec!(1125000));
    assert_eq!(result.total_tax, dec!(81900));
}

#[test]
fn test_shipped_tables_drive_regime_comparison() {
    let set = TableLoader::load_dir(&data_dir("fy2024-25")).expect("Failed to load tables");
    let simulator = IncomeTaxSimulator::new(&set);

    let comparison = simulator.compare(dec!(1200000), dec!(0), Regime::New);

    assert_eq!(comparison.better_regime, Regime::New);
}

#[test]
fn test_gap_fixture_is_rejected() {
    let err = TableLoader::load_dir(&fixture_dir("bad-gap")).expect_err("Gap should fail");

    let TableLoaderError::Policy(PolicyError::Table { policy, source }) = err else {
        panic!("Expected Policy table error, got: {:?}", err);
    };
    assert_eq!(policy, "new_regime");
    assert_eq!(
        source,
        BracketTableError::Gap {
            index: 0,
            upper: dec!(300000),
            next_lower: dec!(350000),
        }
    );
}

#[test]
fn test_missing_directory_reports_path() {
    let err = TableLoader::load_dir(&fixture_dir("does-not-exist")).expect_err("Should fail");

    let TableLoaderError::Io { path, .. } = err else {
        panic!("Expected Io error, got: {:?}", err);
    };
    assert!(path.ends_with("brackets.csv"));
}

#[test]
fn test_csv_backend_through_registry() {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(CsvSourceFactory));

    let config = SourceConfig {
        backend: "csv".to_string(),
        location: data_dir("fy2024-25").display().to_string(),
    };
    let source = registry.create(&config).expect("Failed to create source");
    let set = source.load().expect("Failed to load tables");

    assert_eq!(set.version, "FY2024-25");
}

#[test]
fn test_csv_backend_surfaces_policy_errors() {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(CsvSourceFactory));

    let config = SourceConfig {
        backend: "csv".to_string(),
        location: fixture_dir("bad-gap").display().to_string(),
    };
    let source = registry.create(&config).expect("Failed to create source");
    let err = source.load().expect_err("Gap should fail");

    assert!(matches!(err, SourceError::Policy(PolicyError::Table { .. })));
}
