use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use clap::Parser;
use reqwest::Url;

use crate::{
    api::{PriceSource, file::PayloadFile, ree},
    cache::FileStore,
    core::{payload::DayPayload, resolver::Resolver, series::PriceSeries},
    prelude::*,
    quantity::price::MegawattHourPrice,
};

/// Local hour from which the next day's prices are expected to be published.
const PUBLICATION_HOUR: u32 = 20;

#[derive(Parser)]
pub struct SourceArgs {
    /// Market operator API base URL.
    #[clap(long = "ree-base-url", env = "REE_BASE_URL", default_value = ree::DEFAULT_BASE_URL)]
    base_url: Url,

    /// Read a saved market operator response instead of calling the API.
    #[clap(long = "payload-file", env = "PAYLOAD_FILE")]
    payload_file: Option<PathBuf>,

    /// File to keep the last estimate synthesized from the spot prices in.
    #[clap(
        long = "estimate-cache-path",
        env = "ESTIMATE_CACHE_PATH",
        default_value = "estimate.json"
    )]
    cache_path: PathBuf,

    /// Euro per megawatt-hour added to the spot prices when synthesizing an estimate.
    #[clap(long = "synthesis-offset", env = "SYNTHESIS_OFFSET", default_value = "64.04")]
    synthesis_offset: MegawattHourPrice,

    /// Day to load. Defaults to today, or tomorrow in the evening.
    #[clap(long, env = "DATE")]
    date: Option<NaiveDate>,
}

impl SourceArgs {
    pub fn target_day(&self, now: DateTime<FixedOffset>) -> NaiveDate {
        self.date.unwrap_or_else(|| target_day(now))
    }

    /// Fetch the day's raw series.
    ///
    /// A failed fetch is logged and yields an empty payload, so the stored estimate
    /// may still be used.
    pub async fn fetch(&self, on: NaiveDate) -> DayPayload {
        let result = match self.source() {
            Ok(source) => source.get_day(on).await,
            Err(error) => Err(error),
        };
        result.unwrap_or_else(|error| {
            warn!("failed to fetch the prices: {error:#}");
            DayPayload::empty(on)
        })
    }

    pub fn resolve(&self, payload: &DayPayload) -> PriceSeries {
        let mut store = FileStore::new(&self.cache_path);
        Resolver::builder()
            .store(&mut store)
            .synthesis_offset(self.synthesis_offset)
            .build()
            .resolve(payload)
    }

    fn source(&self) -> Result<Box<dyn PriceSource>> {
        match &self.payload_file {
            Some(path) => Ok(Box::new(PayloadFile(path.clone()))),
            None => Ok(Box::new(ree::Api::new(self.base_url.clone())?)),
        }
    }
}

/// Today, or tomorrow once the next day's prices are out.
fn target_day(now: DateTime<FixedOffset>) -> NaiveDate {
    let today = now.date_naive();
    if now.hour() >= PUBLICATION_HOUR { today.succ_opt().unwrap_or(today) } else { today }
}
