pub mod file;
pub mod ree;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{core::payload::DayPayload, prelude::*};

/// Where the day's raw price series come from.
#[async_trait]
pub trait PriceSource: Sync {
    async fn get_day(&self, on: NaiveDate) -> Result<DayPayload>;
}
