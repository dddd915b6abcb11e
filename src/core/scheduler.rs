use std::ops::RangeInclusive;

use bon::Builder;
use chrono::{DateTime, FixedOffset, Timelike};
use itertools::Itertools;

use crate::{
    core::{
        appliance::ApplianceDescriptor,
        point::PricePoint,
        series::PriceSeries,
        settlement::{Schedule, settle},
        strategy::Strategy,
    },
    prelude::*,
    quantity::price::MegawattHourPrice,
};

/// Finds the cheapest hours to run an appliance in.
#[derive(Builder)]
pub struct Scheduler<'a> {
    series: &'a PriceSeries,
    appliance: ApplianceDescriptor,
    now: DateTime<FixedOffset>,
}

impl Scheduler<'_> {
    /// Evening hours [`Strategy::AvoidPeak`] never starts in.
    const AVOIDED_HOURS: RangeInclusive<u32> = 18..=20;

    #[instrument(skip_all, fields(strategy = %strategy, date = %self.series.date))]
    pub fn schedule(&self, strategy: Strategy) -> Schedule {
        if !self.appliance.is_valid() {
            warn!(
                power = %self.appliance.power,
                usage_minutes = self.appliance.usage_minutes,
                "nothing to schedule",
            );
            return Schedule::default();
        }

        let hours = self.series.chronological();
        let eligible = hours
            .iter()
            .filter(|point| self.appliance.priority.allows(point.hour()))
            .copied()
            .collect_vec();
        debug!(n_hours = hours.len(), n_eligible = eligible.len(), "filtered");

        let schedule = match strategy {
            Strategy::CheapestHour => self.run_from(&hours, cheapest(&eligible)),

            Strategy::NearestCheapest => {
                let current_hour = self.now.hour();
                let upcoming = eligible.iter().filter(|point| point.hour() >= current_hour);
                self.run_from(&hours, cheapest(upcoming))
            }

            Strategy::TopThreeCheapest => {
                let top = eligible
                    .iter()
                    .copied()
                    .sorted_by_key(|point| point.price)
                    .take(3)
                    .sorted_by_key(|point| point.timestamp);
                settle(top, &self.appliance)
            }

            Strategy::AvoidPeak => {
                let off_peak =
                    eligible.iter().filter(|point| !Self::AVOIDED_HOURS.contains(&point.hour()));
                self.run_from(&hours, cheapest(off_peak))
            }

            Strategy::Window2 | Strategy::Window3 | Strategy::Window5 => strategy
                .window_size()
                .and_then(|size| self.cheapest_window(&eligible, size))
                .map_or_else(Schedule::default, |window| {
                    settle(window.iter().copied(), &self.appliance)
                }),

            Strategy::Chronological => settle(eligible, &self.appliance),
        };

        if schedule.is_empty() {
            warn!("no suitable hours found");
        } else {
            info!(
                n_slices = schedule.len(),
                start = %schedule[0].label(),
                total_cost = %schedule.total_cost(),
                "scheduled",
            );
        }
        schedule
    }

    /// Run through the consecutive hours from the start until the run completes,
    /// the day ends, or an hour falls out of the allowed window.
    fn run_from(&self, hours: &[PricePoint], start: Option<&PricePoint>) -> Schedule {
        let Some(start) = start else {
            return Schedule::default();
        };
        let hours = hours
            .iter()
            .skip_while(|point| point.timestamp != start.timestamp)
            .take_while(|point| self.appliance.priority.allows(point.hour()))
            .copied();
        settle(hours, &self.appliance)
    }

    /// Contiguous window with the lowest total price that has not ended yet.
    /// Ties go to the earliest window.
    fn cheapest_window<'p>(
        &self,
        eligible: &'p [PricePoint],
        size: usize,
    ) -> Option<&'p [PricePoint]> {
        eligible
            .windows(size)
            .filter(|window| window.last().is_some_and(|last| last.end() > self.now))
            .min_by_key(|window| window_price(window))
    }
}

fn cheapest<'p>(points: impl IntoIterator<Item = &'p PricePoint>) -> Option<&'p PricePoint> {
    points.into_iter().min_by_key(|point| point.price)
}

fn window_price(window: &[PricePoint]) -> MegawattHourPrice {
    window.iter().map(|point| point.price).sum()
}
