//! Startup gate: decide between the setup guide and a ready service before
//! anything touches the network.

use crate::{Config, provider::provider_from_config, service::WeatherService};

pub const SETUP_GUIDE: &str = "\
🔑 No OpenWeather API key is configured.

1. Sign up at https://openweathermap.org/api and confirm your e-mail.
2. Open the \"API Keys\" page and copy the default key.
3. Store it with one of:
     nalssi configure
     export OPENWEATHER_API_KEY=your_actual_api_key_here

Free accounts are limited to 1,000 calls a day, and a new key can take up
to two hours to activate. Until then lookups fall back to demo data.";

#[derive(Debug)]
pub enum Startup {
    /// No usable key; show [`SETUP_GUIDE`] and stop.
    SetupGuide,
    Ready(WeatherService),
}

impl Startup {
    /// Builds no HTTP client and sends no request when the key is missing.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if !config.is_configured() {
            tracing::info!("No API key configured; showing setup guide");
            return Ok(Startup::SetupGuide);
        }

        let provider = provider_from_config(config)?;
        Ok(Startup::Ready(WeatherService::new(provider)))
    }
}
