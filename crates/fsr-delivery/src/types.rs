use chrono::NaiveDateTime;
use fsr_schemas::{Delivery, TankId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The tank-side facts a delivery sequence is checked against.
#[derive(Clone, Debug, PartialEq)]
pub struct TankWindow {
    pub tank_id: TankId,
    pub capacity_l: f64,
    pub opening_l: f64,
    pub closing_l: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Warning,
    Fail,
}

/// Stable issue codes. Ordering here is the reporting order within one
/// delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryIssueCode {
    // FAIL
    WrongTank,
    InvalidVolume,
    NonPositiveDelivery,
    CapacityExceeded,

    // WARNING
    StatedVolumeMismatch,
    InvoiceVolumeMismatch,
    LargeDelivery,
    SequenceGap,
    OpeningMismatch,
    ClosingMismatch,
}

impl DeliveryIssueCode {
    pub fn severity(&self) -> Severity {
        match self {
            DeliveryIssueCode::WrongTank
            | DeliveryIssueCode::InvalidVolume
            | DeliveryIssueCode::NonPositiveDelivery
            | DeliveryIssueCode::CapacityExceeded => Severity::Fail,
            _ => Severity::Warning,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryIssue {
    pub severity: Severity,
    pub code: DeliveryIssueCode,
    /// Index into the time-sorted delivery list; `None` for shift-level checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub message: String,
}

impl DeliveryIssue {
    pub(crate) fn new(code: DeliveryIssueCode, index: Option<usize>, message: String) -> Self {
        Self {
            severity: code.severity(),
            code,
            index,
            message,
        }
    }
}

/// Result of validating one shift's deliveries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// Deliveries in chronological order (stable on equal timestamps).
    pub deliveries: Vec<Delivery>,
    /// True when the input was not already in chronological order.
    pub reordered: bool,
    pub issues: Vec<DeliveryIssue>,
    /// Σ (after − before) over all deliveries.
    pub total_delivered_l: f64,
}

impl DeliveryReport {
    /// No FAIL issues.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Fail)
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeliveryIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Fail)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DeliveryIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_code(&self, code: DeliveryIssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

/// A point on the shift's timeline that bounds a sales interval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "at", rename_all = "snake_case")]
pub enum Boundary {
    ShiftOpen,
    Delivery {
        index: usize,
        delivered_at: NaiveDateTime,
    },
    ShiftClose,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::ShiftOpen => f.write_str("shift open"),
            Boundary::Delivery {
                index,
                delivered_at,
            } => write!(f, "delivery #{} ({})", index + 1, delivered_at),
            Boundary::ShiftClose => f.write_str("shift close"),
        }
    }
}

/// Sales attributed to one interval between boundaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesSegment {
    pub from: Boundary,
    pub to: Boundary,
    pub start_level_l: f64,
    pub end_level_l: f64,
    pub sales_l: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEvent {
    pub index: usize,
    pub delivered_at: NaiveDateTime,
    pub supplier: String,
    pub volume_before_l: f64,
    pub volume_after_l: f64,
    pub delivered_l: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    Sales(SalesSegment),
    Delivery(DeliveryEvent),
}

/// Reconstructed shift: alternating sales intervals and deliveries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    /// Σ segment sales.
    pub total_sales_l: f64,
    pub total_delivered_l: f64,
    /// `(opening − closing) + Σ delivered`, rounded.
    pub expected_movement_l: f64,
    /// Segment sum agrees with the expected movement within the volume epsilon.
    pub cross_check_ok: bool,
    pub warnings: Vec<String>,
}

impl Timeline {
    pub fn sales_segments(&self) -> impl Iterator<Item = &SalesSegment> {
        self.events.iter().filter_map(|e| match e {
            TimelineEvent::Sales(s) => Some(s),
            TimelineEvent::Delivery(_) => None,
        })
    }
}

/// How a level rise before a delivery (shift open -> first delivery, or
/// between deliveries) is treated. A rise after the last delivery is always
/// an error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InteriorRise {
    #[default]
    Reject,
    /// Keep the negative segment and add a `LEVEL_RISE` warning.
    Warn,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error("tank level rose by {rise_l:.2} L between {from} and {to} without a recorded delivery")]
    NegativeSales {
        from: Boundary,
        to: Boundary,
        rise_l: f64,
    },

    #[error("non-finite volume in timeline input: {0}")]
    NonFinite(&'static str),
}
