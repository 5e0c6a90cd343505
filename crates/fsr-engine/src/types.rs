use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fsr_calibration::Tank;
use fsr_daily::DailySummary;
use fsr_delivery::{DeliveryIssue, Timeline};
use fsr_reconcile::{TankMovement, ThreeWayAnalysis, ValidationStatus, VarianceResult};
use fsr_schemas::{
    CustomerAllocation, Delivery, DeliveryInput, FuelType, NozzleReading, PriceBook, ShiftKey,
    ShiftPeriod, TankId, TankLevel, ThresholdConfig,
};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One shift's readings as the station submits them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionInput {
    pub tank_id: TankId,
    pub date: NaiveDate,
    pub period: ShiftPeriod,
    pub submitted_by: String,
    /// Seeded from the previous period's closing when omitted.
    #[serde(default)]
    pub opening: Option<TankLevel>,
    pub closing: TankLevel,
    #[serde(default)]
    pub deliveries: DeliveryInput,
    pub nozzles: Vec<NozzleReading>,
    #[serde(default)]
    pub actual_cash: Option<f64>,
    /// Overrides the price book for this shift.
    #[serde(default)]
    pub price_per_l: Option<f64>,
    #[serde(default)]
    pub allocations: Vec<CustomerAllocation>,
}

impl SubmissionInput {
    pub fn shift_key(&self) -> ShiftKey {
        ShiftKey::new(self.tank_id.clone(), self.date, self.period)
    }
}

/// Decision made by the caller's access control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied { reason: String },
}

/// Records for the same tank the caller already holds.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorRecords<'a> {
    /// The record for the period before this one (opening seed, cumulative
    /// totals).
    pub previous_period: Option<&'a ReconciliationRecord>,
    /// The current record for this same shift, when this submission corrects it.
    pub superseded: Option<&'a ReconciliationRecord>,
}

/// Everything a submission is evaluated against.
#[derive(Clone, Debug)]
pub struct SubmissionContext<'a> {
    pub tank: &'a Tank,
    pub thresholds: &'a ThresholdConfig,
    pub prices: &'a PriceBook,
    pub prior: PriorRecords<'a>,
    pub authorization: Authorization,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryCode {
    LowFuel,
    DeliveryWarning,
    TimelineMismatch,
    OpeningContinuity,
    IncompleteData,
    AllocationImbalance,
    MechanicalFallback,
}

/// Non-blocking finding attached to a record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub code: AdvisoryCode,
    pub message: String,
}

impl Advisory {
    pub fn new(code: AdvisoryCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A tank level after calibration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dip_cm: Option<f64>,
    pub volume_l: f64,
    /// Taken from the previous period's closing rather than submitted.
    #[serde(default)]
    pub seeded_from_previous: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryForm {
    None,
    Legacy,
    Many,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliverySummary {
    pub form: DeliveryForm,
    /// Legacy offload levels, when that form was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_offload: Option<LevelSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_offload: Option<LevelSummary>,
    /// Chronological order.
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_delivered_l: Option<f64>,
    /// Warnings raised by the validator (failures reject the submission).
    #[serde(default)]
    pub issues: Vec<DeliveryIssue>,
}

/// The immutable result of one accepted submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRecord {
    pub record_id: Uuid,
    pub shift: ShiftKey,
    pub fuel_type: FuelType,
    pub submitted_by: String,
    /// 1 for the first submission of a shift; +1 per correction.
    pub sequence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersedes: Option<Uuid>,

    pub opening: LevelSummary,
    pub closing: LevelSummary,
    pub deliveries: DeliverySummary,
    pub movement: TankMovement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,

    /// Tank movement vs electronic total; decides `validation_status`.
    pub electronic_variance: VarianceResult,
    pub mechanical_variance: VarianceResult,
    pub validation_status: ValidationStatus,

    pub daily: DailySummary,
    pub three_way: ThreeWayAnalysis,

    pub messages: Vec<String>,
    pub advisories: Vec<Advisory>,
    pub thresholds: ThresholdConfig,
}

impl ReconciliationRecord {
    pub fn has_advisory(&self, code: AdvisoryCode) -> bool {
        self.advisories.iter().any(|a| a.code == code)
    }
}
