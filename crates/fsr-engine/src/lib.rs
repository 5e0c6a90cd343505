//! fsr-engine
//!
//! The submission pipeline: one shift's client payload in, one immutable
//! `ReconciliationRecord` out.
//!
//! `Draft` -> `Validated` is a typestate: a `Validated` only exists once
//! every input check has passed and every figure has been computed. Storing
//! the record is the caller's job.
//!
//! Collaborators (tank registry, prior records, thresholds, prices, the
//! authorization decision) are passed in through `SubmissionContext`.
//!
//! Deterministic, no IO. Emits `tracing` events; installs no subscriber.

mod error;
mod levels;
mod submission;
mod types;

pub use error::SubmissionError;
pub use submission::{record_id, submit, Draft, Validated};
pub use types::*;
