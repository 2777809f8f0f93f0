use crate::{Config, FetchError, Forecast, ForecastQuery, provider::visual_crossing::VisualCrossingProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod visual_crossing;

/// One request, one normalized forecast. Implementations never retry.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, query: &ForecastQuery) -> Result<Forecast, FetchError>;
}

/// Construct the weather fetcher from config.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    fetcher_with_key(config, config.api_key())
}

fn fetcher_with_key(
    config: &Config,
    api_key: Option<String>,
) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `forecast configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = VisualCrossingProvider::new(api_key, &config.provider)?;
    Ok(Box::new(provider))
}
