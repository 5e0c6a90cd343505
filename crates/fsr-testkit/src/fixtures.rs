use fsr_calibration::{Breakpoint, Tank, TankRegistry};
use fsr_schemas::{FuelType, PriceBook, TankId};

pub const PETROL_PRICE: f64 = 650.0;
pub const DIESEL_PRICE: f64 = 700.0;

fn tank(id: &str, fuel: FuelType, capacity_l: f64, rows: &[(f64, f64)]) -> Tank {
    let points = rows.iter().map(|&(d, v)| Breakpoint::new(d, v)).collect();
    Tank::new(TankId::new(id), fuel, capacity_l, points).expect("fixture chart is valid")
}

/// T1: 33,000 L petrol tank, chart to 230 cm.
pub fn petrol_tank() -> Tank {
    tank(
        "T1",
        FuelType::Petrol,
        33_000.0,
        &[
            (20.0, 1_500.0),
            (50.0, 5_200.0),
            (100.0, 12_800.0),
            (150.0, 21_000.0),
            (200.0, 28_900.0),
            (230.0, 33_000.0),
        ],
    )
}

/// T2: 20,000 L diesel tank, chart to 195 cm.
pub fn diesel_tank() -> Tank {
    tank(
        "T2",
        FuelType::Diesel,
        20_000.0,
        &[
            (25.0, 1_200.0),
            (75.0, 5_800.0),
            (125.0, 11_600.0),
            (175.0, 17_400.0),
            (195.0, 20_000.0),
        ],
    )
}

pub fn registry() -> TankRegistry {
    TankRegistry::new([petrol_tank(), diesel_tank()]).expect("fixture ids are unique")
}

pub fn price_book() -> PriceBook {
    PriceBook::default()
        .with_price(FuelType::Petrol, PETROL_PRICE)
        .with_price(FuelType::Diesel, DIESEL_PRICE)
}
