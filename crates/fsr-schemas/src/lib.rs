//! fsr-schemas
//!
//! Shared vocabulary for the reconciliation workspace:
//! - tank / shift identifiers and the shift ordering
//! - delivery, nozzle and allocation inputs as the station submits them
//! - `ThresholdConfig` and `PriceBook`, always passed explicitly
//! - the single rounding policy and tolerance constants (`rounding`)
//!
//! Plain data. No IO.

mod pricing;
pub mod rounding;
mod thresholds;
mod types;

pub use pricing::PriceBook;
pub use thresholds::ThresholdConfig;
pub use types::*;
