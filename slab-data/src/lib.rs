pub mod loader;
pub mod source;

pub use loader::{BracketRecord, ModifierRecord, TableLoader, TableLoaderError};
pub use source::{CsvSource, CsvSourceFactory};
