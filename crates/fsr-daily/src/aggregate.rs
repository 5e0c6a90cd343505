use std::collections::BTreeMap;

use fsr_schemas::rounding::round2;
use fsr_schemas::NozzleReading;

use crate::{
    accumulate, allocate, AllocationError, DailyInput, DailySummary, Financials, NozzleTotals,
    PumpAverage,
};

/// Σ movement per meter source.
pub fn nozzle_totals(nozzles: &[NozzleReading]) -> NozzleTotals {
    let (electronic, mechanical) = nozzles.iter().fold((0.0, 0.0), |(e, m), n| {
        (e + n.electronic.movement(), m + n.mechanical.movement())
    });
    NozzleTotals {
        electronic_l: round2(electronic),
        mechanical_l: round2(mechanical),
    }
}

pub fn financials(electronic_l: f64, price_per_l: f64, actual_cash: Option<f64>) -> Financials {
    let expected_cash = round2(electronic_l * price_per_l);
    Financials {
        price_per_l,
        expected_cash,
        actual_cash,
        cash_difference: actual_cash.map(|actual| round2(actual - expected_cash)),
    }
}

/// (electronic − tank) / tank × 100; 0 when the tank did not move.
pub fn loss_percent(electronic_l: f64, tank_movement_l: f64) -> f64 {
    if tank_movement_l == 0.0 {
        return 0.0;
    }
    round2((electronic_l - tank_movement_l) / tank_movement_l * 100.0)
}

/// Per pump: Σ over its nozzles of (electronic + mechanical) / 2, valued at
/// `price_per_l`. Pumps come out sorted by id.
pub fn pump_averages(nozzles: &[NozzleReading], price_per_l: f64) -> Vec<PumpAverage> {
    let mut by_pump: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for n in nozzles {
        let avg = (n.electronic.movement() + n.mechanical.movement()) / 2.0;
        let slot = by_pump.entry(n.pump_id()).or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += avg;
    }

    by_pump
        .into_iter()
        .map(|(pump_id, (nozzle_count, volume))| PumpAverage {
            pump_id: pump_id.to_string(),
            nozzle_count,
            average_volume_l: round2(volume),
            value: round2(volume * price_per_l),
        })
        .collect()
}

/// Aggregate one shift. Fails only on an invalid customer allocation.
pub fn aggregate(input: &DailyInput<'_>) -> Result<DailySummary, AllocationError> {
    let totals = nozzle_totals(input.nozzles);
    let financials = financials(totals.electronic_l, input.price_per_l, input.actual_cash);
    let electronic_vs_tank_l = round2(totals.electronic_l - input.tank_movement_l);

    let allocation = if input.allocations.is_empty() {
        None
    } else {
        Some(allocate(
            input.fuel_type,
            totals.electronic_l,
            input.price_per_l,
            input.allocations,
        )?)
    };

    Ok(DailySummary {
        totals,
        financials,
        electronic_vs_tank_l,
        loss_percent: loss_percent(totals.electronic_l, input.tank_movement_l),
        pumps: pump_averages(input.nozzles, input.price_per_l),
        cumulative: accumulate(
            input.previous,
            totals.electronic_l,
            electronic_vs_tank_l,
            input.tank_movement_l,
        ),
        allocation,
    })
}
