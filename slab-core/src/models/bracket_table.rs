use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::TaxBracket;

/// Reasons a bracket table is rejected at construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstLowerBoundNotZero(Decimal),

    #[error("bracket {index} has upper bound {upper} below its lower bound {lower}")]
    InvertedRange {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("gap between bracket {index} (ends {upper}) and the next bracket (starts {next_lower})")]
    Gap {
        index: usize,
        upper: Decimal,
        next_lower: Decimal,
    },

    #[error("bracket {index} (ends {upper}) overlaps the next bracket (starts {next_lower})")]
    Overlap {
        index: usize,
        upper: Decimal,
        next_lower: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeLast(usize),

    #[error("last bracket must be unbounded")]
    BoundedLastBracket,

    #[error("bracket {index} has negative rate {rate}%")]
    NegativeRate { index: usize, rate: Decimal },
}

/// An ordered, contiguous partition of `[0, ∞)` into tax brackets.
///
/// The only way to obtain one is [`BracketTable::new`], so every table in
/// circulation already satisfies the contiguity rules and evaluation never
/// has to re-check them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates and wraps `brackets`.
    ///
    /// # Errors
    ///
    /// Returns the first [`BracketTableError`] found, scanning brackets in order.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        let first = brackets.first().ok_or(BracketTableError::Empty)?;
        if first.lower_bound != Decimal::ZERO {
            return Err(BracketTableError::FirstLowerBoundNotZero(
                first.lower_bound,
            ));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate_percent < Decimal::ZERO {
                return Err(BracketTableError::NegativeRate {
                    index,
                    rate: bracket.rate_percent,
                });
            }

            let next = brackets.get(index + 1);
            match (bracket.upper_bound, next) {
                (Some(upper), _) if upper < bracket.lower_bound => {
                    return Err(BracketTableError::InvertedRange {
                        index,
                        lower: bracket.lower_bound,
                        upper,
                    });
                }
                (Some(upper), Some(next)) if next.lower_bound > upper => {
                    return Err(BracketTableError::Gap {
                        index,
                        upper,
                        next_lower: next.lower_bound,
                    });
                }
                (Some(upper), Some(next)) if next.lower_bound < upper => {
                    return Err(BracketTableError::Overlap {
                        index,
                        upper,
                        next_lower: next.lower_bound,
                    });
                }
                (Some(_), None) => return Err(BracketTableError::BoundedLastBracket),
                (None, Some(_)) => return Err(BracketTableError::UnboundedBeforeLast(index)),
                _ => {}
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// The bracket that sets the marginal rate for the next unit of income.
    ///
    /// This is the highest-indexed bracket whose lower bound lies strictly below
    /// `taxable_income`, or the first bracket when none does (zero or negative
    /// income).
    pub fn effective_bracket(
        &self,
        taxable_income: Decimal,
    ) -> &TaxBracket {
        self.brackets
            .iter()
            .rev()
            .find(|b| b.lower_bound < taxable_income)
            .unwrap_or(&self.brackets[0])
    }
}

impl<'a> IntoIterator for &'a BracketTable {
    type Item = &'a TaxBracket;
    type IntoIter = std::slice::Iter<'a, TaxBracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.brackets.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket::new(lower, upper, rate)
    }

    fn three_slabs() -> Vec<TaxBracket> {
        vec![
            bracket(dec!(0), Some(dec!(250000)), dec!(0)),
            bracket(dec!(250000), Some(dec!(500000)), dec!(5)),
            bracket(dec!(500000), None, dec!(20)),
        ]
    }

    // =========================================================================
    // validation
    // =========================================================================

    #[test]
    fn new_accepts_contiguous_table() {
        let table = BracketTable::new(three_slabs()).unwrap();

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn new_accepts_single_unbounded_bracket() {
        let table = BracketTable::new(vec![bracket(dec!(0), None, dec!(10))]);

        assert!(table.is_ok());
    }

    #[test]
    fn new_accepts_zero_width_bracket() {
        let table = BracketTable::new(vec![
            bracket(dec!(0), Some(dec!(100)), dec!(0)),
            bracket(dec!(100), Some(dec!(100)), dec!(50)),
            bracket(dec!(100), None, dec!(10)),
        ]);

        assert!(table.is_ok());
    }

    #[test]
    fn new_accepts_non_monotonic_rates() {
        let table = BracketTable::new(vec![
            bracket(dec!(0), Some(dec!(100)), dec!(20)),
            bracket(dec!(100), None, dec!(10)),
        ]);

        assert!(table.is_ok());
    }

    #[test]
    fn new_rejects_empty_table() {
        assert_eq!(BracketTable::new(vec![]), Err(BracketTableError::Empty));
    }

    #[test]
    fn new_rejects_nonzero_start() {
        let result = BracketTable::new(vec![bracket(dec!(1), None, dec!(10))]);

        assert_eq!(
            result,
            Err(BracketTableError::FirstLowerBoundNotZero(dec!(1)))
        );
    }

    #[test]
    fn new_rejects_gap() {
        let mut slabs = three_slabs();
        slabs[1].lower_bound = dec!(260000);

        let result = BracketTable::new(slabs);

        assert_eq!(
            result,
            Err(BracketTableError::Gap {
                index: 0,
                upper: dec!(250000),
                next_lower: dec!(260000),
            })
        );
    }

    #[test]
    fn new_rejects_overlap() {
        let mut slabs = three_slabs();
        slabs[2].lower_bound = dec!(400000);

        let result = BracketTable::new(slabs);

        assert_eq!(
            result,
            Err(BracketTableError::Overlap {
                index: 1,
                upper: dec!(500000),
                next_lower: dec!(400000),
            })
        );
    }

    #[test]
    fn new_rejects_unsorted_brackets() {
        let mut slabs = three_slabs();
        slabs.swap(0, 1);

        let result = BracketTable::new(slabs);

        assert_eq!(
            result,
            Err(BracketTableError::FirstLowerBoundNotZero(dec!(250000)))
        );
    }

    #[test]
    fn new_rejects_inverted_range() {
        let result = BracketTable::new(vec![
            bracket(dec!(0), Some(dec!(100)), dec!(0)),
            bracket(dec!(100), Some(dec!(50)), dec!(5)),
            bracket(dec!(50), None, dec!(10)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::InvertedRange {
                index: 1,
                lower: dec!(100),
                upper: dec!(50),
            })
        );
    }

    #[test]
    fn new_rejects_bounded_last_bracket() {
        let result = BracketTable::new(vec![bracket(dec!(0), Some(dec!(100)), dec!(0))]);

        assert_eq!(result, Err(BracketTableError::BoundedLastBracket));
    }

    #[test]
    fn new_rejects_unbounded_middle_bracket() {
        let mut slabs = three_slabs();
        slabs[1].upper_bound = None;

        let result = BracketTable::new(slabs);

        assert_eq!(result, Err(BracketTableError::UnboundedBeforeLast(1)));
    }

    #[test]
    fn new_rejects_negative_rate() {
        let mut slabs = three_slabs();
        slabs[2].rate_percent = dec!(-1);

        let result = BracketTable::new(slabs);

        assert_eq!(
            result,
            Err(BracketTableError::NegativeRate {
                index: 2,
                rate: dec!(-1),
            })
        );
    }

    // =========================================================================
    // effective_bracket
    // =========================================================================

    #[test]
    fn effective_bracket_zero_income_is_first() {
        let table = BracketTable::new(three_slabs()).unwrap();

        assert_eq!(table.effective_bracket(dec!(0)).rate_percent, dec!(0));
    }

    #[test]
    fn effective_bracket_negative_income_is_first() {
        let table = BracketTable::new(three_slabs()).unwrap();

        assert_eq!(table.effective_bracket(dec!(-5000)).lower_bound, dec!(0));
    }

    #[test]
    fn effective_bracket_on_boundary_stays_in_lower_bracket() {
        let table = BracketTable::new(three_slabs()).unwrap();

        assert_eq!(table.effective_bracket(dec!(250000)).rate_percent, dec!(0));
        assert_eq!(table.effective_bracket(dec!(250001)).rate_percent, dec!(5));
    }

    #[test]
    fn effective_bracket_top_slab() {
        let table = BracketTable::new(three_slabs()).unwrap();

        assert_eq!(table.effective_bracket(dec!(9000000)).rate_percent, dec!(20));
    }
}
