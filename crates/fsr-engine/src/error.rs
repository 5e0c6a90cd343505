use fsr_calibration::CalibrationError;
use fsr_daily::AllocationError;
use fsr_delivery::{DeliveryIssue, TimelineError};

/// Why a submission was rejected. Nothing is computed or stored on error.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission not authorized: {0}")]
    Unauthorized(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("delivery validation failed: {}", summarize(.issues))]
    InvalidDelivery { issues: Vec<DeliveryIssue> },

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error("delivery timeline rejected: {0}")]
    Timeline(#[from] TimelineError),

    #[error("customer allocation rejected: {0}")]
    Allocation(#[from] AllocationError),
}

fn summarize(issues: &[DeliveryIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl SubmissionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
