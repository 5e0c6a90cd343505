use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tank identity (stable string: e.g. T1, DSL-02).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TankId(pub String);

impl TankId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Petrol,
    Diesel,
    Kerosene,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "PETROL",
            FuelType::Diesel => "DIESEL",
            FuelType::Kerosene => "KEROSENE",
        }
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PETROL" | "PMS" => Ok(FuelType::Petrol),
            "DIESEL" | "AGO" => Ok(FuelType::Diesel),
            "KEROSENE" | "DPK" => Ok(FuelType::Kerosene),
            other => Err(format!(
                "unknown fuel type '{other}'. expected one of: PETROL | DIESEL | KEROSENE"
            )),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two half-day shifts per station day. `Am` sorts before `Pm`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftPeriod {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl ShiftPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftPeriod::Am => "AM",
            ShiftPeriod::Pm => "PM",
        }
    }
}

/// One reconciliation slot: a tank, a date and a period.
///
/// Ordering is (tank, date, period), so for a single tank keys sort
/// chronologically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftKey {
    pub tank_id: TankId,
    pub date: NaiveDate,
    pub period: ShiftPeriod,
}

impl ShiftKey {
    pub fn new(tank_id: TankId, date: NaiveDate, period: ShiftPeriod) -> Self {
        Self {
            tank_id,
            date,
            period,
        }
    }

    /// The slot that follows this one for the same tank.
    pub fn next(&self) -> Option<Self> {
        match self.period {
            ShiftPeriod::Am => Some(Self::new(self.tank_id.clone(), self.date, ShiftPeriod::Pm)),
            ShiftPeriod::Pm => self
                .date
                .checked_add_days(Days::new(1))
                .map(|d| Self::new(self.tank_id.clone(), d, ShiftPeriod::Am)),
        }
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.tank_id, self.date, self.period.as_str())
    }
}

/// A tank level as measured: a dip height (converted through the tank's
/// calibration chart) or a volume read directly off a gauge.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TankLevel {
    DipCm(f64),
    VolumeL(f64),
}

/// A fuel delivery recorded against a tank during a shift.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub tank_id: TankId,
    pub delivered_at: NaiveDateTime,
    pub volume_before_l: f64,
    pub volume_after_l: f64,
    pub supplier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_ref: Option<String>,
    /// Volume on the supplier's invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_volume_l: Option<f64>,
    /// Volume the attendant wrote down as delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stated_volume_l: Option<f64>,
}

impl Delivery {
    /// Volume actually received, from the tank levels.
    pub fn volume_delivered_l(&self) -> f64 {
        self.volume_after_l - self.volume_before_l
    }
}

/// How deliveries were recorded for the shift.
///
/// `Legacy` is the historical single-delivery form that only captured the
/// tank level either side of one offload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum DeliveryInput {
    #[default]
    None,
    Legacy {
        #[serde(default)]
        before_offload: Option<TankLevel>,
        after_offload: TankLevel,
    },
    Many {
        deliveries: Vec<Delivery>,
    },
}

/// Opening/closing counter of one nozzle meter.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    pub opening: f64,
    pub closing: f64,
}

impl MeterReading {
    pub fn new(opening: f64, closing: f64) -> Self {
        Self { opening, closing }
    }

    pub fn movement(&self) -> f64 {
        self.closing - self.opening
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NozzleReading {
    /// `<pump>-<nozzle>`, e.g. `P1-A`. The part before the first `-` groups
    /// nozzles into pumps.
    pub nozzle_id: String,
    pub attendant: String,
    pub electronic: MeterReading,
    pub mechanical: MeterReading,
}

impl NozzleReading {
    pub fn pump_id(&self) -> &str {
        self.nozzle_id
            .split_once('-')
            .map(|(pump, _)| pump)
            .unwrap_or(&self.nozzle_id)
    }
}

/// Volume of the shift's sales attributed to one credit customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerAllocation {
    pub customer: String,
    pub volume_l: f64,
    /// Negotiated price; the station price applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_l: Option<f64>,
}
