use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use slab_core::policy::{NEW_REGIME, OLD_REGIME, STARTUP_PROFIT};
use slab_core::{PolicyError, PolicyModifiers, PolicySet, SlabPolicy, TaxBracket};
use thiserror::Error;
use tracing::{debug, info};

/// File holding bracket rows inside a table directory.
pub const BRACKETS_FILE: &str = "brackets.csv";

/// File holding modifier rows inside a table directory.
pub const MODIFIERS_FILE: &str = "modifiers.csv";

/// Errors that can occur when loading policy tables.
#[derive(Debug, Error)]
pub enum TableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no bracket rows found")]
    Empty,

    #[error("unknown policy '{0}' (expected new_regime, old_regime or startup_profit)")]
    UnknownPolicy(String),

    #[error("no brackets defined for policy '{0}'")]
    MissingBrackets(String),

    #[error("no modifiers defined for policy '{0}'")]
    MissingModifiers(String),

    #[error("modifiers defined more than once for policy '{0}'")]
    DuplicateModifiers(String),

    #[error("rows mix table versions '{expected}' and '{found}'")]
    MixedVersions { expected: String, found: String },

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl From<csv::Error> for TableLoaderError {
    fn from(err: csv::Error) -> Self {
        TableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of `brackets.csv`.
///
/// - `version`: table version tag (e.g. `FY2024-25`)
/// - `policy`: one of `new_regime`, `old_regime`, `startup_profit`
/// - `lower_bound`: bracket floor
/// - `upper_bound`: bracket ceiling (empty for unbounded)
/// - `rate_percent`: marginal rate in percent (e.g. `5` for 5%)
/// - `label`: display label (empty to derive one from the bounds)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub version: String,
    pub policy: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate_percent: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub label: Option<String>,
}

/// A single row of `modifiers.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModifierRecord {
    pub version: String,
    pub policy: String,
    pub standard_deduction: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub rebate_threshold: Option<Decimal>,
    pub cess_rate_percent: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Loader for policy tables stored as a pair of CSV files.
///
/// Rows are kept in file order, so an unsorted file is reported as a bracket
/// table error rather than silently reordered.
pub struct TableLoader;

impl TableLoader {
    /// Parse bracket rows from any reader (a file or a string slice).
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TableLoaderError> {
        Self::parse(reader)
    }

    /// Parse modifier rows from any reader.
    pub fn parse_modifiers<R: Read>(reader: R) -> Result<Vec<ModifierRecord>, TableLoaderError> {
        Self::parse(reader)
    }

    fn parse<R, T>(reader: R) -> Result<Vec<T>, TableLoaderError>
    where
        R: Read,
        T: for<'de> Deserialize<'de>,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: T = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assemble and validate a [`PolicySet`] from parsed rows.
    ///
    /// Every row must share one version tag, and each of the three policies
    /// needs at least one bracket row and exactly one modifier row.
    pub fn build(
        brackets: &[BracketRecord],
        modifiers: &[ModifierRecord],
    ) -> Result<PolicySet, TableLoaderError> {
        let version = brackets
            .first()
            .map(|r| r.version.clone())
            .ok_or(TableLoaderError::Empty)?;

        let versions = brackets
            .iter()
            .map(|r| &r.version)
            .chain(modifiers.iter().map(|r| &r.version));
        for found in versions {
            if *found != version {
                return Err(TableLoaderError::MixedVersions {
                    expected: version,
                    found: found.clone(),
                });
            }
        }

        let mut grouped: HashMap<&str, Vec<TaxBracket>> = HashMap::new();
        for record in brackets {
            let policy = known_policy(&record.policy)?;
            let bracket = TaxBracket::new(record.lower_bound, record.upper_bound, record.rate_percent);
            let bracket = match &record.label {
                Some(label) => bracket.with_label(label.as_str()),
                None => bracket,
            };
            grouped.entry(policy).or_default().push(bracket);
        }

        let mut modifier_map: HashMap<&str, PolicyModifiers> = HashMap::new();
        for record in modifiers {
            let policy = known_policy(&record.policy)?;
            let previous = modifier_map.insert(
                policy,
                PolicyModifiers {
                    standard_deduction: record.standard_deduction,
                    rebate_threshold: record.rebate_threshold,
                    cess_rate_percent: record.cess_rate_percent,
                },
            );
            if previous.is_some() {
                return Err(TableLoaderError::DuplicateModifiers(policy.to_string()));
            }
        }

        let mut policy = |name: &'static str| -> Result<SlabPolicy, TableLoaderError> {
            let brackets = grouped
                .remove(name)
                .ok_or_else(|| TableLoaderError::MissingBrackets(name.to_string()))?;
            let modifiers = modifier_map
                .remove(name)
                .ok_or_else(|| TableLoaderError::MissingModifiers(name.to_string()))?;
            debug!(policy = name, brackets = brackets.len(), "assembling policy");
            Ok(SlabPolicy::new(name, brackets, modifiers)?)
        };

        Ok(PolicySet {
            new_regime: policy(NEW_REGIME)?,
            old_regime: policy(OLD_REGIME)?,
            startup_profit: policy(STARTUP_PROFIT)?,
            version,
        })
    }

    /// Read `brackets.csv` and `modifiers.csv` from `dir` and build a set.
    pub fn load_dir(dir: &Path) -> Result<PolicySet, TableLoaderError> {
        let brackets = Self::parse_brackets(open(&dir.join(BRACKETS_FILE))?)?;
        let modifiers = Self::parse_modifiers(open(&dir.join(MODIFIERS_FILE))?)?;

        let set = Self::build(&brackets, &modifiers)?;
        info!(
            dir = %dir.display(),
            version = %set.version,
            rows = brackets.len(),
            "loaded policy tables"
        );
        Ok(set)
    }
}

fn known_policy(name: &str) -> Result<&'static str, TableLoaderError> {
    match name {
        NEW_REGIME => Ok(NEW_REGIME),
        OLD_REGIME => Ok(OLD_REGIME),
        STARTUP_PROFIT => Ok(STARTUP_PROFIT),
        other => Err(TableLoaderError::UnknownPolicy(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, TableLoaderError> {
    File::open(path).map_err(|source| TableLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use slab_core::BracketTableError;

    use super::*;

    const BRACKETS_CSV: &str = "\
version,policy,lower_bound,upper_bound,rate_percent,label
T1,new_regime,0,300000,0,Nil
T1,new_regime,300000,,5,
T1,old_regime,0,250000,0,
T1,old_regime,250000,,5,
T1,startup_profit,0,,10,
";

    const MODIFIERS_CSV: &str = "\
version,policy,standard_deduction,rebate_threshold,cess_rate_percent
T1,new_regime,75000,700000,4
T1,old_regime,50000,500000,4
T1,startup_profit,0,,4
";

    fn brackets() -> Vec<BracketRecord> {
        TableLoader::parse_brackets(BRACKETS_CSV.as_bytes()).expect("Failed to parse brackets")
    }

    fn modifiers() -> Vec<ModifierRecord> {
        TableLoader::parse_modifiers(MODIFIERS_CSV.as_bytes()).expect("Failed to parse modifiers")
    }

    #[test]
    fn test_parse_bracket_row() {
        let records = brackets();

        assert_eq!(records.len(), 5);
        assert_eq!(
            records[0],
            BracketRecord {
                version: "T1".to_string(),
                policy: "new_regime".to_string(),
                lower_bound: dec!(0),
                upper_bound: Some(dec!(300000)),
                rate_percent: dec!(0),
                label: Some("Nil".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_unbounded_and_unlabelled_row() {
        let records = brackets();

        assert_eq!(records[1].upper_bound, None);
        assert_eq!(records[1].label, None);
    }

    #[test]
    fn test_parse_modifier_without_rebate() {
        let records = modifiers();

        assert_eq!(records[2].policy, "startup_profit");
        assert_eq!(records[2].rebate_threshold, None);
        assert_eq!(records[0].rebate_threshold, Some(dec!(700000)));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "version,policy,lower_bound\nT1,new_regime,0";

        let err = TableLoader::parse_brackets(csv.as_bytes()).expect_err("Should fail");

        let TableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_decimal() {
        let csv = "version,policy,lower_bound,upper_bound,rate_percent,label\nT1,new_regime,abc,,5,";

        let err = TableLoader::parse_brackets(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, TableLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_build_assembles_all_policies() {
        let set = TableLoader::build(&brackets(), &modifiers()).expect("Failed to build");

        assert_eq!(set.version, "T1");
        assert_eq!(set.new_regime.table.len(), 2);
        assert_eq!(set.new_regime.table.brackets()[0].label, "Nil");
        assert_eq!(set.new_regime.table.brackets()[1].label, "Above 300000");
        assert_eq!(set.old_regime.modifiers.standard_deduction, dec!(50000));
        assert_eq!(set.startup_profit.table.brackets()[0].rate_percent, dec!(10));
    }

    #[test]
    fn test_build_rejects_empty_input() {
        let err = TableLoader::build(&[], &modifiers()).expect_err("Should fail");

        assert!(matches!(err, TableLoaderError::Empty));
    }

    #[test]
    fn test_build_rejects_unknown_policy() {
        let mut records = brackets();
        records[4].policy = "gst".to_string();

        let err = TableLoader::build(&records, &modifiers()).expect_err("Should fail");

        let TableLoaderError::UnknownPolicy(name) = err else {
            panic!("Expected UnknownPolicy error, got: {:?}", err);
        };
        assert_eq!(name, "gst");
    }

    #[test]
    fn test_build_rejects_missing_brackets() {
        let records: Vec<_> = brackets()
            .into_iter()
            .filter(|r| r.policy != "startup_profit")
            .collect();

        let err = TableLoader::build(&records, &modifiers()).expect_err("Should fail");

        assert!(matches!(err, TableLoaderError::MissingBrackets(ref p) if p == "startup_profit"));
    }

    #[test]
    fn test_build_rejects_missing_modifiers() {
        let records: Vec<_> = modifiers()
            .into_iter()
            .filter(|r| r.policy != "old_regime")
            .collect();

        let err = TableLoader::build(&brackets(), &records).expect_err("Should fail");

        assert!(matches!(err, TableLoaderError::MissingModifiers(ref p) if p == "old_regime"));
    }

    #[test]
    fn test_build_rejects_duplicate_modifiers() {
        let mut records = modifiers();
        records.push(records[0].clone());

        let err = TableLoader::build(&brackets(), &records).expect_err("Should fail");

        assert!(matches!(err, TableLoaderError::DuplicateModifiers(ref p) if p == "new_regime"));
    }

    #[test]
    fn test_build_rejects_mixed_versions() {
        let mut records = modifiers();
        records[1].version = "T2".to_string();

        let err = TableLoader::build(&brackets(), &records).expect_err("Should fail");

        let TableLoaderError::MixedVersions { expected, found } = err else {
            panic!("Expected MixedVersions error, got: {:?}", err);
        };
        assert_eq!(expected, "T1");
        assert_eq!(found, "T2");
    }

    #[test]
    fn test_build_reports_unsorted_rows_as_table_error() {
        let mut records = brackets();
        records.swap(0, 1);

        let err = TableLoader::build(&records, &modifiers()).expect_err("Should fail");

        let TableLoaderError::Policy(PolicyError::Table { policy, source }) = err else {
            panic!("Expected Policy table error, got: {:?}", err);
        };
        assert_eq!(policy, "new_regime");
        assert_eq!(source, BracketTableError::FirstLowerBoundNotZero(dec!(300000)));
    }

    #[test]
    fn test_build_reports_negative_modifier() {
        let mut records = modifiers();
        records[0].cess_rate_percent = dec!(-1);

        let err = TableLoader::build(&brackets(), &records).expect_err("Should fail");

        assert!(matches!(
            err,
            TableLoaderError::Policy(PolicyError::Modifiers { .. })
        ));
    }
}
