use std::path::PathBuf;

use chrono::NaiveDate;

use crate::{
    core::{resolver::EstimateStore, series::PriceSeries},
    prelude::*,
};

/// Keeps the last synthesized estimate in a single JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EstimateStore for FileStore {
    #[instrument(skip_all, fields(path = %self.path.display(), on = %on))]
    fn get(&self, on: NaiveDate) -> Result<Option<PriceSeries>> {
        if !self.path.is_file() {
            debug!("no cached estimate");
            return Ok(None);
        }
        let body = std::fs::read(&self.path).context("failed to read the cached estimate")?;
        let estimate: PriceSeries =
            serde_json::from_slice(&body).context("failed to deserialize the cached estimate")?;
        Ok(Some(estimate))
    }

    #[instrument(skip_all, fields(path = %self.path.display(), on = %estimate.date))]
    fn put(&mut self, estimate: &PriceSeries) -> Result {
        let body = serde_json::to_vec(estimate)?;
        std::fs::write(&self.path, body).context("failed to write the cached estimate")?;
        debug!(n_points = estimate.len(), "cached the estimate");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::Provenance;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 21).unwrap()
    }

    #[test]
    fn test_missing_file() -> Result {
        let directory = tempfile::tempdir()?;
        let store = FileStore::new(directory.path().join("estimate.json"));
        assert!(store.get(date())?.is_none());
        Ok(())
    }

    #[test]
    fn test_put_get() -> Result {
        let directory = tempfile::tempdir()?;
        let mut store = FileStore::new(directory.path().join("estimate.json"));
        let estimate = PriceSeries::from_hourly_prices(
            date(),
            Provenance::SynthesizedFromSpot,
            &[100.0, 110.0, 120.0],
        );
        store.put(&estimate)?;
        assert_eq!(store.get(date())?, Some(estimate));
        Ok(())
    }

    #[test]
    fn test_overwrite() -> Result {
        let directory = tempfile::tempdir()?;
        let mut store = FileStore::new(directory.path().join("estimate.json"));
        let next_day = date().succ_opt().unwrap();
        store.put(&PriceSeries::from_hourly_prices(
            date(),
            Provenance::SynthesizedFromSpot,
            &[1.0],
        ))?;
        store.put(&PriceSeries::from_hourly_prices(
            next_day,
            Provenance::SynthesizedFromSpot,
            &[2.0],
        ))?;
        let stored = store.get(date())?.unwrap();
        assert_eq!(stored.date, next_day, "only the last estimate is kept");
        assert_eq!(stored.len(), 1);
        Ok(())
    }

    #[test]
    fn test_corrupted_file() -> Result {
        let directory = tempfile::tempdir()?;
        let path = directory.path().join("estimate.json");
        std::fs::write(&path, "{not json")?;
        assert!(FileStore::new(path).get(date()).is_err());
        Ok(())
    }
}
