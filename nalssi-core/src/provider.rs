use crate::{
    Config, Forecast, ProviderError, Query, WeatherReading,
    provider::openweather::{OpenWeatherProvider, OpenWeatherSettings},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Transport seam between the service and a concrete weather API.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<WeatherReading, ProviderError>;

    async fn forecast(&self, query: &Query) -> Result<Forecast, ProviderError>;

    /// Lightweight request used by the health monitor. Returns the HTTP
    /// status; errors are reserved for timeouts and transport failures.
    async fn probe(&self) -> Result<u16, ProviderError>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `nalssi configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider =
        OpenWeatherProvider::new(api_key.to_owned(), OpenWeatherSettings::from(config))?;

    Ok(Box::new(provider))
}
