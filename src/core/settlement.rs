use chrono::TimeDelta;

use crate::{
    core::{appliance::ApplianceDescriptor, point::PricePoint},
    quantity::{cost::Cost, energy::KilowattHours, price::KilowattHourPrice},
};

/// Consumption within a single hour.
#[derive(Copy, Clone, Debug)]
pub struct Slice {
    pub point: PricePoint,
    pub minutes: i32,
    pub energy: KilowattHours,
    pub cost: Cost,
}

impl Slice {
    #[must_use]
    pub fn label(&self) -> String {
        self.point.label()
    }
}

/// Ordered per-hour cost breakdown of one appliance run.
#[must_use]
#[derive(Clone, Debug, Default, derive_more::Deref, derive_more::IntoIterator)]
pub struct Schedule(#[into_iterator(owned, ref)] Vec<Slice>);

impl Schedule {
    pub fn total_cost(&self) -> Cost {
        self.iter().map(|slice| slice.cost).sum()
    }

    pub fn total_energy(&self) -> KilowattHours {
        self.iter().map(|slice| slice.energy).sum()
    }

    #[must_use]
    pub fn total_minutes(&self) -> i32 {
        self.iter().map(|slice| slice.minutes).sum()
    }

    /// `(HH:MM, cost)` pairs.
    #[must_use]
    pub fn breakdown(&self) -> Vec<(String, Cost)> {
        self.iter().map(|slice| (slice.label(), slice.cost)).collect()
    }
}

/// Walk the hours in the given order, spending up to an hour of the run in each.
///
/// Stops once the run is complete. If the hours run out first, the schedule covers
/// only a part of the run.
pub fn settle(
    hours: impl IntoIterator<Item = PricePoint>,
    appliance: &ApplianceDescriptor,
) -> Schedule {
    let mut remaining_minutes = appliance.usage_minutes;
    let mut slices = Vec::new();
    for point in hours {
        if remaining_minutes <= 0 {
            break;
        }
        let minutes = remaining_minutes.min(60);
        let energy = appliance.power * TimeDelta::minutes(i64::from(minutes));
        slices.push(Slice {
            point,
            minutes,
            energy,
            cost: energy * KilowattHourPrice::from(point.price),
        });
        remaining_minutes -= minutes;
    }
    Schedule(slices)
}
