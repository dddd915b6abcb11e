use bon::Builder;
use chrono::NaiveDate;

use crate::{
    core::{
        payload::{DayPayload, SeriesKind},
        point::PricePoint,
        series::{PriceSeries, Provenance},
    },
    prelude::*,
    quantity::price::MegawattHourPrice,
};

/// Grid tolls and retail margin missing from the wholesale price, used to synthesize
/// a tariff estimate from the spot prices.
pub const DEFAULT_SYNTHESIS_OFFSET: MegawattHourPrice = MegawattHourPrice(64.04);

/// Storage of the single most recent synthesized estimate.
pub trait EstimateStore {
    /// Get the stored estimate. It may be dated for another day.
    fn get(&self, on: NaiveDate) -> Result<Option<PriceSeries>>;

    /// Overwrite the stored estimate.
    fn put(&mut self, estimate: &PriceSeries) -> Result;
}

/// Picks the one price series to trust for a day.
#[derive(Builder)]
pub struct Resolver<'s> {
    store: &'s mut dyn EstimateStore,

    #[builder(default = DEFAULT_SYNTHESIS_OFFSET)]
    synthesis_offset: MegawattHourPrice,
}

impl Resolver<'_> {
    /// Resolve the canonical series, first match wins:
    ///
    /// 1. Official tariff.
    /// 2. Estimated tariff from the API.
    /// 3. Stored estimate for the same day.
    /// 4. Estimate synthesized from the spot prices, which is then stored.
    /// 5. Nothing.
    #[instrument(skip_all, fields(date = %payload.date))]
    pub fn resolve(&mut self, payload: &DayPayload) -> PriceSeries {
        if let Some(official) = payload.find(SeriesKind::OfficialTariff) {
            info!(
                len = official.points.len(),
                id = %official.id,
                title = %official.title,
                last_update = ?official.last_update,
                "using the official tariff",
            );
            return PriceSeries::new(
                payload.date,
                Provenance::OfficialTariff,
                official.points.clone(),
            );
        }

        if let Some(estimated) = payload.find(SeriesKind::EstimatedTariff) {
            info!(
                len = estimated.points.len(),
                id = %estimated.id,
                title = %estimated.title,
                last_update = ?estimated.last_update,
                "using the estimated tariff",
            );
            return PriceSeries::new(
                payload.date,
                Provenance::ApiEstimatedTariff,
                estimated.points.clone(),
            );
        }

        if let Some(cached) = self.cached(payload.date) {
            info!(len = cached.len(), "using the cached estimate");
            return cached.with_provenance(Provenance::LocallyCachedEstimatedTariff);
        }

        if let Some(spot) = payload.find(SeriesKind::Spot) {
            let estimate = synthesize(payload.date, &spot.points, self.synthesis_offset);
            info!(
                len = estimate.len(),
                id = %spot.id,
                title = %spot.title,
                last_update = ?spot.last_update,
                offset = %self.synthesis_offset,
                "synthesized from spot",
            );
            if let Err(error) = self.store.put(&estimate) {
                error!("failed to store the estimate: {error:#}");
            }
            return estimate;
        }

        warn!("no price data available");
        PriceSeries::unavailable(payload.date)
    }

    fn cached(&self, on: NaiveDate) -> Option<PriceSeries> {
        match self.store.get(on) {
            Ok(Some(estimate)) if estimate.date == on && !estimate.is_empty() => Some(estimate),
            Ok(Some(estimate)) => {
                debug!(stored = %estimate.date, len = estimate.len(), "ignoring the stale estimate");
                None
            }
            Ok(None) => None,
            Err(error) => {
                warn!("failed to read the cached estimate: {error:#}");
                None
            }
        }
    }
}

/// Shift every spot price by the offset, keeping the timestamps.
pub fn synthesize(
    date: NaiveDate,
    spot: &[PricePoint],
    offset: MegawattHourPrice,
) -> PriceSeries {
    let points = spot
        .iter()
        .map(|point| PricePoint { price: point.price + offset, ..*point })
        .collect();
    PriceSeries::new(date, Provenance::SynthesizedFromSpot, points)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::payload::IncludedSeries;

    #[derive(Default)]
    struct MemoryStore {
        estimate: Option<PriceSeries>,
        n_writes: usize,
        is_broken: bool,
    }

    impl EstimateStore for MemoryStore {
        fn get(&self, _on: NaiveDate) -> Result<Option<PriceSeries>> {
            ensure!(!self.is_broken, "broken store");
            Ok(self.estimate.clone())
        }

        fn put(&mut self, estimate: &PriceSeries) -> Result {
            ensure!(!self.is_broken, "broken store");
            self.estimate = Some(estimate.clone());
            self.n_writes += 1;
            Ok(())
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn included(kind: SeriesKind, prices: &[f64]) -> IncludedSeries {
        IncludedSeries {
            kind,
            id: format!("{kind:?}"),
            title: String::new(),
            last_update: None,
            points: PriceSeries::from_hourly_prices(date(), Provenance::Unavailable, prices).points,
        }
    }

    fn payload(series: Vec<IncludedSeries>) -> DayPayload {
        DayPayload { date: date(), series }
    }

    #[test]
    fn test_official_tariff_wins() {
        let mut store = MemoryStore {
            estimate: Some(PriceSeries::from_hourly_prices(
                date(),
                Provenance::SynthesizedFromSpot,
                &[1.0; 24],
            )),
            ..MemoryStore::default()
        };
        let payload = payload(vec![
            included(SeriesKind::Spot, &[50.0; 24]),
            included(SeriesKind::EstimatedTariff, &[110.0; 24]),
            included(SeriesKind::OfficialTariff, &[120.0; 24]),
        ]);
        let series = Resolver::builder().store(&mut store).build().resolve(&payload);
        assert_eq!(series.provenance, Provenance::OfficialTariff);
        assert_eq!(series.points[0].price, MegawattHourPrice(120.0));
        assert_eq!(store.n_writes, 0);
    }

    #[test]
    fn test_empty_official_tariff_falls_through() {
        let mut store = MemoryStore::default();
        let payload = payload(vec![
            included(SeriesKind::OfficialTariff, &[]),
            included(SeriesKind::EstimatedTariff, &[110.0; 24]),
        ]);
        let series = Resolver::builder().store(&mut store).build().resolve(&payload);
        assert_eq!(series.provenance, Provenance::ApiEstimatedTariff);
        assert_eq!(series.len(), 24);
        assert_eq!(store.n_writes, 0);
    }

    #[test]
    fn test_cached_estimate_before_spot() {
        let cached =
            PriceSeries::from_hourly_prices(date(), Provenance::SynthesizedFromSpot, &[7.0; 24]);
        let mut store = MemoryStore { estimate: Some(cached.clone()), ..MemoryStore::default() };
        let payload = payload(vec![included(SeriesKind::Spot, &[50.0; 24])]);
        let series = Resolver::builder().store(&mut store).build().resolve(&payload);
        assert_eq!(series.provenance, Provenance::LocallyCachedEstimatedTariff);
        assert_eq!(series.points, cached.points);
        assert_eq!(store.n_writes, 0);
    }

    #[test]
    fn test_stale_cached_estimate_is_ignored() {
        let yesterday = date().pred_opt().unwrap();
        let mut store = MemoryStore {
            estimate: Some(PriceSeries::from_hourly_prices(
                yesterday,
                Provenance::SynthesizedFromSpot,
                &[7.0; 24],
            )),
            ..MemoryStore::default()
        };
        let payload = payload(vec![included(SeriesKind::Spot, &[50.0; 24])]);
        let series = Resolver::builder().store(&mut store).build().resolve(&payload);
        assert_eq!(series.provenance, Provenance::SynthesizedFromSpot);
        assert_eq!(store.estimate.unwrap().date, date());
    }

    #[test]
    fn test_synthesis_from_spot() {
        let spot: Vec<f64> = (0..24).map(f64::from).collect();
        let mut store = MemoryStore::default();
        let payload = payload(vec![included(SeriesKind::Spot, &spot)]);
        let series = Resolver::builder()
            .store(&mut store)
            .synthesis_offset(MegawattHourPrice(59.9))
            .build()
            .resolve(&payload);

        assert_eq!(series.provenance, Provenance::SynthesizedFromSpot);
        let spot = &payload.series[0].points;
        assert_eq!(series.len(), spot.len());
        for (synthesized, spot) in series.points.iter().zip(spot) {
            assert_eq!(synthesized.timestamp, spot.timestamp);
            assert_abs_diff_eq!(synthesized.price.0, spot.price.0 + 59.9, epsilon = 1e-12);
        }
        assert_eq!(store.n_writes, 1);
        assert_eq!(store.estimate, Some(series));
    }

    #[test]
    fn test_cache_round_trip() {
        let mut store = MemoryStore::default();
        let synthesized = Resolver::builder()
            .store(&mut store)
            .build()
            .resolve(&payload(vec![included(SeriesKind::Spot, &[40.0; 24])]));

        // Later the same day the operator returns nothing at all:
        let series = Resolver::builder().store(&mut store).build().resolve(&payload(vec![]));
        assert_eq!(series.provenance, Provenance::LocallyCachedEstimatedTariff);
        assert_eq!(series.points, synthesized.points);
        assert_eq!(store.n_writes, 1);
    }

    #[test]
    fn test_unavailable() {
        let mut store = MemoryStore::default();
        let series = Resolver::builder().store(&mut store).build().resolve(&payload(vec![]));
        assert_eq!(series.provenance, Provenance::Unavailable);
        assert!(series.is_empty());
        assert_eq!(store.n_writes, 0);
    }

    #[test]
    fn test_broken_store_does_not_fail_resolution() {
        let mut store = MemoryStore { is_broken: true, ..MemoryStore::default() };
        let payload = payload(vec![included(SeriesKind::Spot, &[40.0; 24])]);
        let series = Resolver::builder().store(&mut store).build().resolve(&payload);
        assert_eq!(series.provenance, Provenance::SynthesizedFromSpot);
        assert_abs_diff_eq!(series.points[0].price.0, 104.04, epsilon = 1e-12);
    }
}
