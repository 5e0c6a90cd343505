//! fsr-delivery
//!
//! Delivery Validator + Delivery Timeline Reconstructor.
//!
//! - Deliveries are re-sorted by timestamp before anything else looks at them
//! - Impossible deliveries (after <= before, above capacity) are FAIL issues
//! - Sequencing gaps, stated/invoice mismatches and large drops are warnings
//! - The timeline walks opening -> deliveries -> closing and attributes sales
//!   to each interval; a negative interval is an error, or a warning for
//!   rises ahead of a delivery when the caller asks for `InteriorRise::Warn`
//!
//! Deterministic, pure logic. No IO.

mod timeline;
mod types;
mod validator;

pub use timeline::{reconstruct_timeline, reconstruct_timeline_with};
pub use types::*;
pub use validator::{sort_chronologically, validate_deliveries};
