//! [REData](https://www.ree.es/es/apidatos) market prices client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_with::{DefaultOnError, VecSkipError, serde_as};

use crate::{
    api::PriceSource,
    core::{
        payload::{DayPayload, IncludedSeries, SeriesKind},
        point::PricePoint,
    },
    prelude::*,
    quantity::price::MegawattHourPrice,
};

pub const DEFAULT_BASE_URL: &str = "https://apidatos.ree.es/es/datos/";

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl PriceSource for Api {
    /// Get all hourly series of the specified day.
    #[instrument(skip_all, fields(on = %on))]
    async fn get_day(&self, on: NaiveDate) -> Result<DayPayload> {
        info!("fetching…");
        let url = self.base_url.join("mercados/precios-mercados-tiempo-real")?;
        let payload = self
            .client
            .get(url)
            .query(&[
                ("start_date", format!("{on}T00:00")),
                ("end_date", format!("{on}T23:59")),
                ("time_trunc", "hour".to_owned()),
            ])
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<Response>()
            .await
            .context("failed to deserialize the response")?
            .into_payload(on);
        info!(n_series = payload.series.len(), "fetched");
        Ok(payload)
    }
}

/// Decode a raw response body, for example one saved to a file.
pub fn decode(body: &[u8], on: NaiveDate) -> Result<DayPayload> {
    let response: Response =
        serde_json::from_slice(body).context("failed to deserialize the payload")?;
    Ok(response.into_payload(on))
}

/// Tag a series by its labels.
///
/// The explicit estimate marker is checked before the bare tariff label which it contains.
#[must_use]
pub fn classify<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<SeriesKind> {
    let labels = labels.into_iter().map(str::to_lowercase).collect::<Vec<_>>();
    let any = |needle: &str| labels.iter().any(|label| label.contains(needle));
    if any("pvpc-estimado") {
        Some(SeriesKind::EstimatedTariff)
    } else if any("pvpc") {
        Some(SeriesKind::OfficialTariff)
    } else if any("spot") || any("mercado") {
        Some(SeriesKind::Spot)
    } else {
        None
    }
}

#[serde_as]
#[derive(Deserialize)]
struct Response {
    /// Undecodable series are skipped one by one.
    #[serde_as(deserialize_as = "DefaultOnError<Option<VecSkipError<_>>>")]
    #[serde(default)]
    included: Option<Vec<Included>>,
}

impl Response {
    fn into_payload(self, date: NaiveDate) -> DayPayload {
        let series = self.included.into_iter().flatten().filter_map(Included::into_series).collect();
        DayPayload { date, series }
    }
}

#[serde_as]
#[derive(Deserialize)]
struct Included {
    #[serde(default, rename = "type")]
    type_: Option<String>,

    #[serde(default)]
    id: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    attributes: Option<Attributes>,
}

impl Included {
    fn into_series(self) -> Option<IncludedSeries> {
        let id = self.id.unwrap_or_default();
        let Some(attributes) = self.attributes else {
            warn!(id = %id, "skipping a series without attributes");
            return None;
        };
        let title = attributes.title.unwrap_or_default();
        let type_ = self.type_.unwrap_or_default();
        let Some(kind) = classify([type_.as_str(), id.as_str(), title.as_str()]) else {
            debug!(id = %id, type_ = %type_, title = %title, "ignoring an unknown series");
            return None;
        };
        let points = attributes.values.into_iter().filter_map(Value::into_point).collect();
        let last_update = attributes
            .last_update
            .as_deref()
            .and_then(|last_update| DateTime::parse_from_rfc3339(last_update).ok());
        Some(IncludedSeries { kind, id, title, last_update, points })
    }
}

#[serde_as]
#[derive(Deserialize)]
struct Attributes {
    #[serde(default)]
    title: Option<String>,

    #[serde(default, rename = "last-update", alias = "lastUpdate")]
    last_update: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    values: Vec<Value>,
}

#[serde_as]
#[derive(Deserialize)]
struct Value {
    /// Euro per megawatt-hour.
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    value: Option<f64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    percentage: Option<f64>,

    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    datetime: Option<String>,
}

impl Value {
    fn into_point(self) -> Option<PricePoint> {
        let (Some(value), Some(datetime)) = (self.value, self.datetime) else {
            warn!("dropping a point without a value or timestamp");
            return None;
        };
        match DateTime::<FixedOffset>::parse_from_rfc3339(&datetime) {
            Ok(timestamp) => Some(PricePoint {
                timestamp,
                price: MegawattHourPrice(value),
                percentage: self.percentage.unwrap_or_default(),
            }),
            Err(error) => {
                warn!(datetime = %datetime, "dropping a point with a malformed timestamp: {error:#}");
                None
            }
        }
    }
}
