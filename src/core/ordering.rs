use std::cmp::Reverse;

use itertools::Itertools;

use crate::core::{band::Band, point::PricePoint, series::PriceSeries};

/// How to list the prices of a day.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Ordering {
    /// All hours in order.
    #[default]
    Chronological,

    /// Cheapest hours first.
    Cheapest,

    /// Most expensive hours first.
    MostExpensive,

    /// Only off-peak hours.
    OffPeak,

    /// Only mid-peak hours.
    MidPeak,

    /// Only peak hours.
    Peak,
}

impl Ordering {
    pub fn apply(self, series: &PriceSeries) -> Vec<PricePoint> {
        let points = series.chronological();
        match self {
            Self::Chronological => points,
            Self::Cheapest => points.into_iter().sorted_by_key(|point| point.price).collect(),
            Self::MostExpensive => {
                points.into_iter().sorted_by_key(|point| Reverse(point.price)).collect()
            }
            Self::OffPeak => Self::only(points, Band::OffPeak),
            Self::MidPeak => Self::only(points, Band::MidPeak),
            Self::Peak => Self::only(points, Band::Peak),
        }
    }

    fn only(points: Vec<PricePoint>, band: Band) -> Vec<PricePoint> {
        points.into_iter().filter(|point| point.band().effective() == band).collect()
    }
}
