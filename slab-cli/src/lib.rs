pub mod app;
pub mod config;
pub mod format;
pub mod logging;
pub mod report;

pub use config::{AppConfig, ConfigError, Overrides};
pub use format::{ParseAmountError, format_inr, parse_amount, parse_percent};
