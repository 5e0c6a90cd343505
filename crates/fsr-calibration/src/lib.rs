//! fsr-calibration
//!
//! Calibration Converter: dip height <-> volume per tank.
//!
//! - Each tank owns an immutable, sorted breakpoint chart built once
//! - Piecewise-linear interpolation between bracketing breakpoints
//! - volume(0) = 0, volume capped at capacity beyond the last breakpoint
//! - Dips outside the chart are a RangeError; low dips are an advisory only
//!
//! Pure deterministic logic. No IO.

mod engine;
mod registry;
mod types;

pub use engine::{dip_to_volume, validate_dip, volume_to_dip};
pub use registry::TankRegistry;
pub use types::*;
