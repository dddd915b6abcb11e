use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{core::point::PricePoint, quantity::price::MegawattHourPrice};

/// Which source tier produced a price series.
#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The published regulated tariff.
    OfficialTariff,

    /// Estimated tariff as published by the market operator.
    ApiEstimatedTariff,

    /// Estimate synthesized earlier and read back from the local store.
    LocallyCachedEstimatedTariff,

    /// Estimate synthesized from the wholesale prices during this resolution.
    SynthesizedFromSpot,

    /// Bare day-ahead wholesale prices.
    WholesaleSpot,

    /// Nothing usable was found.
    Unavailable,
}

impl Display for Provenance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OfficialTariff => write!(f, "PVPC"),
            Self::ApiEstimatedTariff => write!(f, "PVPC (estimated)"),
            Self::LocallyCachedEstimatedTariff => write!(f, "PVPC (cached estimate)"),
            Self::SynthesizedFromSpot => write!(f, "PVPC (estimated from spot)"),
            Self::WholesaleSpot => write!(f, "Spot"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// Hourly prices of one calendar day.
#[must_use]
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PriceSeries {
    pub date: NaiveDate,
    pub provenance: Provenance,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub const fn new(date: NaiveDate, provenance: Provenance, points: Vec<PricePoint>) -> Self {
        Self { date, provenance, points }
    }

    pub const fn unavailable(date: NaiveDate) -> Self {
        Self::new(date, Provenance::Unavailable, Vec::new())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Same points under another provenance.
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Points in chronological order.
    ///
    /// Payloads normally arrive sorted, but nothing downstream relies on it.
    pub fn chronological(&self) -> Vec<PricePoint> {
        self.points.iter().copied().sorted_by_key(|point| point.timestamp).collect()
    }

    #[must_use]
    pub fn max_price(&self) -> Option<MegawattHourPrice> {
        self.points.iter().map(|point| point.price).max()
    }

    #[must_use]
    pub fn min_price(&self) -> Option<MegawattHourPrice> {
        self.points.iter().map(|point| point.price).min()
    }

    /// Whether the series has the usual 23–25 hourly points.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        (23..=25).contains(&self.len())
    }
}

#[cfg(test)]
impl PriceSeries {
    /// Build a series starting at midnight CET with one point per price.
    pub fn from_hourly_prices(date: NaiveDate, provenance: Provenance, prices: &[f64]) -> Self {
        use chrono::FixedOffset;

        let offset = FixedOffset::east_opt(3600).unwrap();
        let points = prices
            .iter()
            .zip(0..)
            .map(|(price, hour)| {
                let timestamp = date
                    .and_hms_opt(hour, 0, 0)
                    .unwrap()
                    .and_local_timezone(offset)
                    .unwrap();
                PricePoint::new(timestamp, MegawattHourPrice(*price))
            })
            .collect();
        Self::new(date, provenance, points)
    }
}
