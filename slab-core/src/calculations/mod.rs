//! Tax calculations for the four simulated policies.
//!
//! [`slab`] holds the progressive evaluator shared by the income-tax and
//! startup simulators; [`holiday`] is the 80-IAC overlay applied on top of it.
//! [`gst`] and [`composition`] are flat-rate calculators that do not use slabs.

pub mod common;
pub mod composition;
pub mod gst;
pub mod holiday;
pub mod income_tax;
pub mod slab;
pub mod startup;

pub use composition::{
    BusinessType, CompositionAssumptions, CompositionInputs, CompositionSimulator,
    CompositionStatus, CompositionSummary,
};
pub use gst::{GstAssumptions, GstError, GstInputs, GstSimulator, GstSummary};
pub use holiday::{
    EligibilityStatus, HolidayEligibility, HolidayInputs, HolidayOutcome, HolidayOverlay,
    HolidayRules, ELIGIBILITY_WINDOW_YEARS, MAX_HOLIDAY_YEARS,
};
pub use income_tax::{IncomeTaxSimulator, RegimeComparison, RegimeOutcome};
pub use slab::{EvaluationError, SlabEvaluator};
pub use startup::{ProjectionYear, StartupSimulator, StartupSummary};
