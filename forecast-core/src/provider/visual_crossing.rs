use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::ProviderConfig,
    error::FetchError,
    model::{DailyObservation, Forecast, ForecastQuery},
};

use super::WeatherFetcher;

/// Visual Crossing forecast endpoint, reached through RapidAPI.
#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    host: String,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String, settings: &ProviderConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            host: settings.host.clone(),
            http,
        })
    }
}

#[async_trait]
impl WeatherFetcher for VisualCrossingProvider {
    #[instrument(skip(self, query), fields(place = %query.place))]
    async fn fetch(&self, query: &ForecastQuery) -> Result<Forecast, FetchError> {
        let url = format!("{}/forecast", self.base_url);
        debug!(%url, "requesting 24h aggregated forecast");

        let res = self
            .http
            .get(&url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .query(&[
                ("aggregateHours", "24"),
                ("location", query.place.as_str()),
                ("contentType", "json"),
                ("unitGroup", "metric"),
                ("shortColumnNames", "0"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Provider { status, body: truncate_body(&body) });
        }

        let parsed: VcResponse = serde_json::from_str(&body)?;
        let forecast = normalize(parsed)?;

        debug!(
            location = forecast.location_label(),
            days = forecast.days().len(),
            "forecast normalized"
        );

        Ok(forecast)
    }
}

#[derive(Debug, Deserialize)]
struct VcResponse {
    /// Keyed by the location as queried; document order is kept.
    #[serde(default)]
    locations: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct VcLocation {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    values: Option<Vec<VcValue>>,
}

#[derive(Debug, Deserialize)]
struct VcValue {
    /// Epoch milliseconds in practice; strings are tolerated.
    #[serde(default)]
    datetime: Option<Value>,
    #[serde(rename = "datetimeStr", default)]
    datetime_str: Option<String>,
    temp: f64,
    mint: f64,
    maxt: f64,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default)]
    wspd: Option<f64>,
    #[serde(default)]
    wdir: Option<f64>,
    #[serde(default)]
    conditions: Option<String>,
}

fn normalize(response: VcResponse) -> Result<Forecast, FetchError> {
    let (key, first) = response
        .locations
        .and_then(|locations| locations.into_iter().next())
        .ok_or(FetchError::NotFound)?;

    let location: VcLocation = serde_json::from_value(first)?;
    let label = location.address.unwrap_or(key);

    let days = location
        .values
        .unwrap_or_default()
        .into_iter()
        .map(into_observation)
        .collect::<Result<Vec<_>, _>>()?;

    match Forecast::new(label.clone(), days) {
        Some(forecast) => Ok(forecast),
        None => Err(FetchError::NoDays { location: label }),
    }
}

fn into_observation(value: VcValue) -> Result<DailyObservation, FetchError> {
    let timestamp = observation_time(&value)?;

    Ok(DailyObservation {
        timestamp,
        temperature: value.temp,
        min_temperature: value.mint,
        max_temperature: value.maxt,
        humidity: value.humidity,
        wind_speed: value.wspd,
        wind_direction_degrees: value.wdir,
        condition_text: value.conditions.unwrap_or_default(),
    })
}

/// `datetimeStr` carries the location's offset, so it is preferred over the
/// epoch value, which would put the date in UTC.
fn observation_time(value: &VcValue) -> Result<DateTime<FixedOffset>, FetchError> {
    if let Some(ts) = value
        .datetime_str
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    {
        return Ok(ts);
    }

    let parsed = match &value.datetime {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(from_epoch_millis),
        Some(Value::String(s)) => parse_text_time(s),
        _ => None,
    };

    parsed.ok_or_else(|| {
        FetchError::Malformed(format!(
            "entry has no usable timestamp (datetime: {:?}, datetimeStr: {:?})",
            value.datetime, value.datetime_str
        ))
    })
}

fn from_epoch_millis(ms: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.fixed_offset())
}

fn parse_text_time(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ms) = s.trim().parse::<i64>() {
        return from_epoch_millis(ms);
    }

    DateTime::parse_from_rfc3339(s).ok().or_else(|| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|ndt| ndt.and_utc().fixed_offset())
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
