use chrono::{NaiveDate, NaiveDateTime};
use fsr_engine::SubmissionInput;
use fsr_schemas::{
    CustomerAllocation, Delivery, DeliveryInput, MeterReading, NozzleReading, ShiftPeriod, TankId,
    TankLevel,
};

/// Nozzle with `(opening, closing)` for each meter.
pub fn nozzle(id: &str, electronic: (f64, f64), mechanical: (f64, f64)) -> NozzleReading {
    NozzleReading {
        nozzle_id: id.to_string(),
        attendant: "attendant-1".to_string(),
        electronic: MeterReading::new(electronic.0, electronic.1),
        mechanical: MeterReading::new(mechanical.0, mechanical.1),
    }
}

/// Delivery at `at` (`YYYY-MM-DDTHH:MM:SS`).
pub fn delivery(tank_id: &str, at: &str, before_l: f64, after_l: f64) -> Delivery {
    let delivered_at: NaiveDateTime = at.parse().expect("fixture timestamp");
    Delivery {
        tank_id: TankId::new(tank_id),
        delivered_at,
        volume_before_l: before_l,
        volume_after_l: after_l,
        supplier: "Depot A".to_string(),
        invoice_ref: None,
        expected_volume_l: None,
        stated_volume_l: Some(after_l - before_l),
    }
}

/// Fluent builder for a shift payload. Starts with no levels, no deliveries
/// and no nozzles.
#[derive(Clone, Debug)]
pub struct SubmissionBuilder {
    input: SubmissionInput,
}

impl SubmissionBuilder {
    pub fn new(tank_id: &str, date: &str, period: ShiftPeriod) -> Self {
        let date: NaiveDate = date.parse().expect("fixture date");
        Self {
            input: SubmissionInput {
                tank_id: TankId::new(tank_id),
                date,
                period,
                submitted_by: "supervisor".to_string(),
                opening: None,
                closing: TankLevel::VolumeL(0.0),
                deliveries: DeliveryInput::None,
                nozzles: Vec::new(),
                actual_cash: None,
                price_per_l: None,
                allocations: Vec::new(),
            },
        }
    }

    pub fn submitted_by(mut self, who: &str) -> Self {
        self.input.submitted_by = who.to_string();
        self
    }

    pub fn opening_l(mut self, v: f64) -> Self {
        self.input.opening = Some(TankLevel::VolumeL(v));
        self
    }

    pub fn opening_dip(mut self, cm: f64) -> Self {
        self.input.opening = Some(TankLevel::DipCm(cm));
        self
    }

    pub fn closing_l(mut self, v: f64) -> Self {
        self.input.closing = TankLevel::VolumeL(v);
        self
    }

    pub fn closing_dip(mut self, cm: f64) -> Self {
        self.input.closing = TankLevel::DipCm(cm);
        self
    }

    pub fn deliveries(mut self, deliveries: Vec<Delivery>) -> Self {
        self.input.deliveries = DeliveryInput::Many { deliveries };
        self
    }

    pub fn legacy_offload(mut self, before: Option<TankLevel>, after: TankLevel) -> Self {
        self.input.deliveries = DeliveryInput::Legacy {
            before_offload: before,
            after_offload: after,
        };
        self
    }

    pub fn nozzle(mut self, n: NozzleReading) -> Self {
        self.input.nozzles.push(n);
        self
    }

    /// One nozzle `P1-A` selling `electronic_l` / `mechanical_l` from zero.
    pub fn sold(self, electronic_l: f64, mechanical_l: f64) -> Self {
        self.nozzle(nozzle("P1-A", (0.0, electronic_l), (0.0, mechanical_l)))
    }

    pub fn cash(mut self, amount: f64) -> Self {
        self.input.actual_cash = Some(amount);
        self
    }

    pub fn price(mut self, per_l: f64) -> Self {
        self.input.price_per_l = Some(per_l);
        self
    }

    pub fn allocation(mut self, customer: &str, volume_l: f64, price_per_l: Option<f64>) -> Self {
        self.input.allocations.push(CustomerAllocation {
            customer: customer.to_string(),
            volume_l,
            price_per_l,
        });
        self
    }

    pub fn build(self) -> SubmissionInput {
        self.input
    }
}
