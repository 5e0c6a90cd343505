//! fsr-testkit
//!
//! Fixtures and helpers for end-to-end scenarios:
//! - calibrated tank fixtures and a matching price book
//! - `SubmissionBuilder` for shift payloads
//! - `ShiftChain` to run successive shifts of one tank the way the station
//!   would (previous record feeds the next, corrections supersede)
//! - JSON loaders for submission and record files

mod builders;
mod chain;
mod fixtures;

pub use builders::{delivery, nozzle, SubmissionBuilder};
pub use chain::ShiftChain;
pub use fixtures::{diesel_tank, petrol_tank, price_book, registry, DIESEL_PRICE, PETROL_PRICE};

use anyhow::{Context, Result};
use fsr_engine::{ReconciliationRecord, SubmissionInput};
use std::fs;

pub fn load_submission_json(path: &str) -> Result<SubmissionInput> {
    let s = fs::read_to_string(path).with_context(|| format!("read submission: {path}"))?;
    let input: SubmissionInput = serde_json::from_str(&s).context("parse submission json")?;
    Ok(input)
}

pub fn load_record_json(path: &str) -> Result<ReconciliationRecord> {
    let s = fs::read_to_string(path).with_context(|| format!("read record: {path}"))?;
    let rec: ReconciliationRecord = serde_json::from_str(&s).context("parse record json")?;
    Ok(rec)
}
