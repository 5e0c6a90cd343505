use serde::{Deserialize, Serialize};

use fsr_schemas::{CustomerAllocation, FuelType, NozzleReading};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NozzleTotals {
    pub electronic_l: f64,
    pub mechanical_l: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    pub price_per_l: f64,
    /// electronic total × price
    pub expected_cash: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cash: Option<f64>,
    /// actual − expected; negative is a shortage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_difference: Option<f64>,
}

/// Average of electronic and mechanical movement over one pump's nozzles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PumpAverage {
    pub pump_id: String,
    pub nozzle_count: usize,
    pub average_volume_l: f64,
    pub value: f64,
}

/// Totals carried from one period's record to the next for the same tank.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeTotals {
    pub shift_count: u32,
    pub volume_sold_l: f64,
    /// Σ (electronic − tank movement)
    pub variance_l: f64,
    pub tank_movement_l: f64,
    /// Recomputed from the accumulated variance and movement.
    pub loss_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerShare {
    pub customer: String,
    pub volume_l: f64,
    pub price_per_l: f64,
    pub revenue: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub allocated_l: f64,
    pub electronic_l: f64,
    /// electronic − allocated; positive means volume left unallocated.
    pub balance_l: f64,
    /// |balance| within the allocation tolerance.
    pub balanced: bool,
    pub customers: Vec<CustomerShare>,
    pub total_revenue: f64,
}

/// Everything the aggregator needs for one shift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DailyInput<'a> {
    pub fuel_type: FuelType,
    pub nozzles: &'a [NozzleReading],
    pub tank_movement_l: f64,
    pub price_per_l: f64,
    pub actual_cash: Option<f64>,
    pub allocations: &'a [CustomerAllocation],
    /// Cumulative totals from the previous period's record, if any.
    pub previous: Option<&'a CumulativeTotals>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub totals: NozzleTotals,
    pub financials: Financials,
    /// electronic − tank movement
    pub electronic_vs_tank_l: f64,
    pub loss_percent: f64,
    pub pumps: Vec<PumpAverage>,
    pub cumulative: CumulativeTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<AllocationReport>,
}
