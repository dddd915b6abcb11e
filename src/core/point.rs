use chrono::{DateTime, FixedOffset, TimeDelta, Timelike};

use crate::{core::band::Band, quantity::price::MegawattHourPrice};

/// Single hourly price.
#[derive(Copy, Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PricePoint {
    /// Start of the hour in the market's local time.
    pub timestamp: DateTime<FixedOffset>,

    pub price: MegawattHourPrice,

    /// Share of the day's total, as published.
    #[serde(default)]
    pub percentage: f64,
}

impl PricePoint {
    pub const DURATION: TimeDelta = TimeDelta::hours(1);

    #[must_use]
    pub const fn new(timestamp: DateTime<FixedOffset>, price: MegawattHourPrice) -> Self {
        Self { timestamp, price, percentage: 0.0 }
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    #[must_use]
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.timestamp + Self::DURATION
    }

    #[must_use]
    pub fn band(&self) -> Band {
        Band::classify(self.hour())
    }

    /// `HH:MM` label of the hour start.
    #[must_use]
    pub fn label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
