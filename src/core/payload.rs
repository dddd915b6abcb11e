use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::core::{
    point::PricePoint,
    series::{PriceSeries, Provenance},
};

/// Kind of an included series, tagged once at ingestion.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SeriesKind {
    OfficialTariff,
    EstimatedTariff,
    Spot,
}

#[derive(Clone, Debug)]
pub struct IncludedSeries {
    pub kind: SeriesKind,
    pub id: String,
    pub title: String,
    pub last_update: Option<DateTime<FixedOffset>>,
    pub points: Vec<PricePoint>,
}

/// Everything the market operator returned for one day.
#[must_use]
#[derive(Clone, Debug)]
pub struct DayPayload {
    pub date: NaiveDate,
    pub series: Vec<IncludedSeries>,
}

impl DayPayload {
    pub const fn empty(date: NaiveDate) -> Self {
        Self { date, series: Vec::new() }
    }

    /// First non-empty series of the kind.
    #[must_use]
    pub fn find(&self, kind: SeriesKind) -> Option<&IncludedSeries> {
        self.series.iter().find(|series| series.kind == kind && !series.points.is_empty())
    }

    /// The wholesale prices as a series of their own, if present.
    #[must_use]
    pub fn spot(&self) -> Option<PriceSeries> {
        self.find(SeriesKind::Spot).map(|series| {
            PriceSeries::new(self.date, Provenance::WholesaleSpot, series.points.clone())
        })
    }
}
