//! fsr-reconcile
//!
//! Tank movement, variance classification and three-way reconciliation.
//!
//! Architectural decisions:
//! - Movement formula selected by explicit match on `DeliveryVolumes`
//! - Unset closing (<= 0) yields zero movement flagged incomplete, never a
//!   negative consumption
//! - Classification thresholds always come from the caller's `ThresholdConfig`
//! - Root cause comes from a fixed 2^3 table over pairwise outcomes
//! - A FAIL / CRITICAL outcome is a result, not an error
//!
//! Deterministic, pure logic. No IO.

mod movement;
mod three_way;
mod types;
mod variance;

pub use movement::tank_movement;
pub use three_way::{analyze, root_cause_for};
pub use types::*;
pub use variance::{classify, classify_labeled};
