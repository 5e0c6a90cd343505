//! fsr-daily
//!
//! Daily Aggregator for one tank shift:
//! - Per-source nozzle totals (electronic / mechanical)
//! - Expected cash and cash difference at the shift price
//! - Loss percent of electronic sales against tank movement
//! - Per-pump average value
//! - Running cumulative totals carried from the previous period
//! - Diesel customer allocation
//!
//! Deterministic, pure logic. No IO.

mod aggregate;
mod types;

pub mod allocation;
pub mod cumulative;

pub use aggregate::{aggregate, financials, loss_percent, nozzle_totals, pump_averages};
pub use allocation::{allocate, AllocationError};
pub use cumulative::accumulate;
pub use types::*;
