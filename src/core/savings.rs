use crate::{
    core::{series::PriceSeries, settlement::Schedule},
    quantity::{cost::Cost, price::KilowattHourPrice},
};

/// How much a schedule saves compared to running in the most expensive hour of the day.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Savings {
    pub cost: Cost,

    /// Same energy at the day's maximum price.
    pub reference_cost: Cost,
}

impl Savings {
    /// Daily runs over four weeks.
    pub const RUNS_PER_MONTH: f64 = 28.0;

    /// Typical household monthly bill to relate the savings to.
    pub const REFERENCE_MONTHLY_BILL: Cost = Cost(60.0);

    /// [`None`] when there is nothing to compare.
    pub fn estimate(schedule: &Schedule, series: &PriceSeries) -> Option<Self> {
        if schedule.is_empty() {
            return None;
        }
        let max_price = KilowattHourPrice::from(series.max_price()?);
        Some(Self {
            cost: schedule.total_cost(),
            reference_cost: schedule.total_energy() * max_price,
        })
    }

    pub fn per_run(self) -> Cost {
        self.reference_cost - self.cost
    }

    pub fn monthly(self) -> Cost {
        self.per_run() * Self::RUNS_PER_MONTH
    }

    /// Monthly savings as a share of [`Self::REFERENCE_MONTHLY_BILL`].
    #[must_use]
    pub fn share_of_monthly_bill(self) -> f64 {
        self.monthly().0 / Self::REFERENCE_MONTHLY_BILL.0
    }

    /// Whether the savings are worth mentioning.
    #[must_use]
    pub fn is_noticeable(self) -> bool {
        self.monthly() > Cost::ONE_CENT
    }
}
