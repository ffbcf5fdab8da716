use serde::{Deserialize, Serialize};

/// Personal income-tax regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    #[default]
    New,
    Old,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Old => "old",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New Regime",
            Self::Old => "Old Regime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "old" => Some(Self::Old),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_codes() {
        for regime in [Regime::New, Regime::Old] {
            assert_eq!(Regime::parse(regime.as_str()), Some(regime));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Regime::parse(" OLD "), Some(Regime::Old));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(Regime::parse("flat"), None);
    }
}
