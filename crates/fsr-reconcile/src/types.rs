use fsr_schemas::Delivery;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Delivery volumes after calibration, one variant per movement formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeliveryVolumes<'a> {
    None,
    /// Historically recorded single delivery with offload levels.
    Legacy {
        before_offload_l: Option<f64>,
        after_offload_l: f64,
    },
    Many(&'a [Delivery]),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementFormula {
    /// opening − closing
    NoDelivery,
    /// (opening − before_offload) + (after_offload − closing)
    LegacyOffload,
    /// after_offload − closing
    LegacyAfterOffloadOnly,
    /// (opening − closing) + Σ delivered
    MultipleDeliveries,
    /// closing unset; movement forced to 0
    IncompleteClosing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TankMovement {
    pub movement_l: f64,
    pub formula: MovementFormula,
    /// Σ delivered when it is known from the input.
    pub delivered_l: Option<f64>,
    /// Closing was unset (<= 0); the movement is not a consumption figure.
    pub incomplete: bool,
}

// ---------------------------------------------------------------------------
// Variance classification
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Pass,
    Warning,
    Fail,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Pass => "PASS",
            ValidationStatus::Warning => "WARNING",
            ValidationStatus::Fail => "FAIL",
        }
    }
}

/// Names used when rendering a classification message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VarianceLabels<'a> {
    pub reference: &'a str,
    pub comparison: &'a str,
}

impl Default for VarianceLabels<'_> {
    fn default() -> Self {
        Self {
            reference: "reference",
            comparison: "comparison",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarianceResult {
    pub reference: f64,
    pub comparison: f64,
    /// comparison − reference, unrounded.
    pub variance: f64,
    /// Signed variance as a percentage of the reference; `None` when the
    /// reference is zero.
    pub percent: Option<f64>,
    pub status: ValidationStatus,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Three-way reconciliation
// ---------------------------------------------------------------------------

/// Independent measurement of the dispensed volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    /// Tank dips.
    Physical,
    /// Nozzle meters.
    Operational,
    /// Banked cash.
    Financial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKind {
    TankVsNozzle,
    TankVsCash,
    NozzleVsCash,
}

impl PairKind {
    /// The source this pair does not look at.
    pub fn excluded_source(&self) -> Source {
        match self {
            PairKind::TankVsNozzle => Source::Financial,
            PairKind::TankVsCash => Source::Operational,
            PairKind::NozzleVsCash => Source::Physical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PairKind::TankVsNozzle => "tank vs nozzle",
            PairKind::TankVsCash => "tank vs cash",
            PairKind::NozzleVsCash => "nozzle vs cash",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairUnit {
    Liters,
    Currency,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PairStatus {
    WithinTolerance,
    RequiresInvestigation,
    Critical,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairComparison {
    pub pair: PairKind,
    pub unit: PairUnit,
    pub reference: f64,
    pub comparison: f64,
    /// comparison − reference, rounded.
    pub difference: f64,
    /// |difference| / |reference| × 100; 0 when the reference is zero.
    pub percent: f64,
    pub abs_breached: bool,
    pub pct_breached: bool,
    pub status: PairStatus,
    pub message: String,
}

impl PairComparison {
    pub fn is_within(&self) -> bool {
        self.status == PairStatus::WithinTolerance
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Balanced,
    VarianceMinor,
    VarianceInvestigation,
    DiscrepancyCritical,
    IncompleteData,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Balanced => "BALANCED",
            OverallStatus::VarianceMinor => "VARIANCE_MINOR",
            OverallStatus::VarianceInvestigation => "VARIANCE_INVESTIGATION",
            OverallStatus::DiscrepancyCritical => "DISCREPANCY_CRITICAL",
            OverallStatus::IncompleteData => "INCOMPLETE_DATA",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RootCauseCategory {
    Physical,
    Operational,
    Financial,
    Multiple,
    Unknown,
}

impl From<Source> for RootCauseCategory {
    fn from(s: Source) -> Self {
        match s {
            Source::Physical => RootCauseCategory::Physical,
            Source::Operational => RootCauseCategory::Operational,
            Source::Financial => RootCauseCategory::Financial,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootCause {
    pub category: RootCauseCategory,
    pub likely_causes: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NozzleSource {
    Electronic,
    Mechanical,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreeWayInput {
    pub tank_movement_l: f64,
    pub electronic_total_l: f64,
    pub mechanical_total_l: f64,
    pub actual_cash: Option<f64>,
    pub price_per_l: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreeWayAnalysis {
    pub nozzle_total_l: f64,
    pub nozzle_source: NozzleSource,
    pub tank_vs_nozzle: PairComparison,
    pub tank_vs_cash: Option<PairComparison>,
    pub nozzle_vs_cash: Option<PairComparison>,
    pub overall: OverallStatus,
    /// `None` when nothing disagrees, or when cash is absent and tank and
    /// nozzle agree.
    pub root_cause: Option<RootCause>,
    pub messages: Vec<String>,
}

impl ThreeWayAnalysis {
    /// Pairs that were actually computed.
    pub fn pairs(&self) -> impl Iterator<Item = &PairComparison> {
        std::iter::once(&self.tank_vs_nozzle)
            .chain(self.tank_vs_cash.iter())
            .chain(self.nozzle_vs_cash.iter())
    }
}
