mod bracket_table;
mod policy_modifiers;
mod regime;
mod tax_bracket;
mod tax_result;

pub use bracket_table::{BracketTable, BracketTableError};
pub use policy_modifiers::{ModifierError, PolicyModifiers};
pub use regime::Regime;
pub use tax_bracket::TaxBracket;
pub use tax_result::{BracketBreakdown, TaxResult};
