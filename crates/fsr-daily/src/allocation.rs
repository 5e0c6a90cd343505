//! Customer volume allocation (diesel only).
//!
//! Credit customers take part of a shift's diesel sales. The allocated
//! volumes must account for the electronic total within
//! `ALLOCATION_TOLERANCE_L`; an imbalance is reported, not rejected.

use fsr_schemas::rounding::{round2, ALLOCATION_TOLERANCE_L};
use fsr_schemas::{CustomerAllocation, FuelType};

use crate::{AllocationReport, CustomerShare};

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum AllocationError {
    /// Allocations are only recorded against diesel tanks.
    NotDiesel(FuelType),
    /// Customer name is empty.
    EmptyCustomer,
    /// Volume is negative, NaN or infinite.
    InvalidVolume { customer: String, volume_l: f64 },
    /// Negotiated price is not a positive finite number.
    InvalidPrice { customer: String, price_per_l: f64 },
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDiesel(fuel) => {
                write!(f, "customer allocation is only accepted for DIESEL, not {fuel}")
            }
            Self::EmptyCustomer => write!(f, "allocation customer must not be empty"),
            Self::InvalidVolume { customer, volume_l } => {
                write!(f, "invalid allocation volume {volume_l} for customer '{customer}'")
            }
            Self::InvalidPrice {
                customer,
                price_per_l,
            } => write!(
                f,
                "invalid negotiated price {price_per_l} for customer '{customer}'"
            ),
        }
    }
}

impl std::error::Error for AllocationError {}

// ─── Allocation ──────────────────────────────────────────────────────────────

/// Split the electronic total across customers.
///
/// Revenue per customer uses the customer's negotiated price when present,
/// otherwise `station_price_per_l`.
pub fn allocate(
    fuel_type: FuelType,
    electronic_l: f64,
    station_price_per_l: f64,
    allocations: &[CustomerAllocation],
) -> Result<AllocationReport, AllocationError> {
    if fuel_type != FuelType::Diesel {
        return Err(AllocationError::NotDiesel(fuel_type));
    }

    let mut customers = Vec::with_capacity(allocations.len());
    for a in allocations {
        if a.customer.trim().is_empty() {
            return Err(AllocationError::EmptyCustomer);
        }
        if !a.volume_l.is_finite() || a.volume_l < 0.0 {
            return Err(AllocationError::InvalidVolume {
                customer: a.customer.clone(),
                volume_l: a.volume_l,
            });
        }
        let price_per_l = match a.price_per_l {
            Some(p) if p.is_finite() && p > 0.0 => p,
            Some(p) => {
                return Err(AllocationError::InvalidPrice {
                    customer: a.customer.clone(),
                    price_per_l: p,
                })
            }
            None => station_price_per_l,
        };
        customers.push(CustomerShare {
            customer: a.customer.clone(),
            volume_l: a.volume_l,
            price_per_l,
            revenue: round2(a.volume_l * price_per_l),
        });
    }

    let allocated_l = round2(customers.iter().map(|c| c.volume_l).sum());
    let balance_l = round2(electronic_l - allocated_l);
    let total_revenue = round2(customers.iter().map(|c| c.revenue).sum());

    Ok(AllocationReport {
        allocated_l,
        electronic_l,
        balance_l,
        balanced: balance_l.abs() <= ALLOCATION_TOLERANCE_L,
        customers,
        total_revenue,
    })
}
