//! Rounding policy and tolerance constants.
//!
//! Every engine in the workspace rounds volumes with [`round2`] and compares
//! against the constants below. Keeping them here makes segment-sum
//! cross-checks reproducible: two callers summing the same timeline get the
//! same answer to the cent-liter.

/// Agreement tolerance for volume arithmetic (stated vs computed delivery
/// volume, timeline segment sum vs movement, clamping of tiny negatives).
pub const VOLUME_EPSILON_L: f64 = 0.1;

/// Slack allowed between one delivery's after-volume and the next delivery's
/// before-volume, and between the shift opening and the first delivery.
pub const DELIVERY_SLACK_L: f64 = 100.0;

/// Tolerance for customer allocations summing to the electronic total.
pub const ALLOCATION_TOLERANCE_L: f64 = 0.5;

/// Fixed 2-decimal rounding (half away from zero).
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `true` when `a` and `b` agree within `tol` (inclusive).
#[inline]
pub fn within(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// `|part| / whole * 100`, or `None` when `whole` is zero.
///
/// The zero-denominator case is left to the caller: the classifier maps it to
/// WARNING, the three-way analyzer to a 0% fallback.
#[inline]
pub fn abs_percent_of(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        None
    } else {
        Some(part.abs() / whole.abs() * 100.0)
    }
}
