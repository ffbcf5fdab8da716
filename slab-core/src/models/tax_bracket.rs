use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slab of a progressive schedule.
///
/// `upper_bound` of `None` means the slab is unbounded above. The upper bound is
/// the ceiling of this slab and the floor of the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate_percent: Decimal,
    pub label: String,
}

impl TaxBracket {
    /// Creates a bracket with a plain numeric label such as `"300000 - 600000"`.
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate_percent: Decimal,
    ) -> Self {
        let label = match upper_bound {
            Some(upper) => format!("{} - {}", lower_bound.normalize(), upper.normalize()),
            None => format!("Above {}", lower_bound.normalize()),
        };

        Self {
            lower_bound,
            upper_bound,
            rate_percent,
            label,
        }
    }

    pub fn with_label(
        mut self,
        label: impl Into<String>,
    ) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }

    /// Portion of `taxable_income` that falls inside this bracket.
    ///
    /// Income exactly on the upper bound is fully counted here, so a boundary
    /// value belongs to the lower of the two brackets that share it.
    pub fn overlap(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let ceiling = match self.upper_bound {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };

        (ceiling - self.lower_bound).max(Decimal::ZERO)
    }
}
