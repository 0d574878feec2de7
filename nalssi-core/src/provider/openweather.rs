use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    Config, ProviderError,
    model::{Forecast, ForecastEntry, Query, UNITS, WeatherReading},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// City used by the health probe.
const PROBE_CITY: &str = "London";

#[derive(Debug, Clone)]
pub struct OpenWeatherSettings {
    pub base_url: String,
    pub lang: String,
    pub timeout: Duration,
}

impl Default for OpenWeatherSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "kr".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl From<&Config> for OpenWeatherSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            lang: config.lang.clone(),
            timeout: config.request_timeout(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    settings: OpenWeatherSettings,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, settings: OpenWeatherSettings) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            api_key,
            settings,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn location_params(query: &Query) -> Vec<(&'static str, String)> {
        match query {
            Query::City(name) => vec![("q", name.clone())],
            Query::Coordinates(coords) => vec![
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
            ],
        }
    }

    /// GET `path` for `query` and return the body of a 2xx response.
    async fn fetch(&self, path: &str, query: &Query) -> Result<String, ProviderError> {
        let mut params = Self::location_params(query);
        params.push(("appid", self.api_key.clone()));
        params.push(("units", UNITS.to_string()));
        params.push(("lang", self.settings.lang.clone()));

        let res = self
            .http
            .get(self.endpoint(path))
            .query(&params)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        debug!(path, %query, status = status.as_u16(), "OpenWeather response");

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }

        Ok(body)
    }
}

/// Parse a current-weather body into a reading.
pub fn parse_current(body: &str) -> Result<WeatherReading, ProviderError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

/// Parse a 5-day/3-hour forecast body.
pub fn parse_forecast(body: &str) -> Result<Forecast, ProviderError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    humidity: u8,
    #[serde(default)]
    pressure: Option<u32>,
    #[serde(default)]
    temp_min: Option<f64>,
    #[serde(default)]
    temp_max: Option<f64>,
}

/// Older payloads used `desc`; it is folded into `description` here and
/// nowhere else.
#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(alias = "desc")]
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    sunrise: Option<i64>,
    #[serde(default)]
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

impl From<OwCurrentResponse> for WeatherReading {
    fn from(ow: OwCurrentResponse) -> Self {
        let (description, icon) = first_condition(ow.weather);

        WeatherReading {
            city: ow.name,
            country: ow.sys.country.unwrap_or_default(),
            temperature: ow.main.temp,
            feels_like: ow.main.feels_like.unwrap_or(ow.main.temp),
            humidity_pct: ow.main.humidity,
            pressure_hpa: ow.main.pressure.unwrap_or_default(),
            wind_speed: ow.wind.speed,
            description,
            icon,
            sunrise: ow.sys.sunrise.and_then(unix_to_utc),
            sunset: ow.sys.sunset.and_then(unix_to_utc),
            temp_min: ow.main.temp_min,
            temp_max: ow.main.temp_max,
        }
    }
}

impl From<OwForecastResponse> for Forecast {
    fn from(ow: OwForecastResponse) -> Self {
        let entries = ow
            .list
            .into_iter()
            .filter_map(|e| {
                let at = unix_to_utc(e.dt)?;
                let (description, icon) = first_condition(e.weather);
                Some(ForecastEntry {
                    at,
                    temperature: e.main.temp,
                    temp_min: e.main.temp_min,
                    temp_max: e.main.temp_max,
                    humidity_pct: e.main.humidity,
                    wind_speed: e.wind.speed,
                    description,
                    icon,
                })
            })
            .collect();

        Forecast {
            city: ow.city.name,
            country: ow.city.country.unwrap_or_default(),
            entries,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &Query) -> Result<WeatherReading, ProviderError> {
        let body = self.fetch("weather", query).await?;
        parse_current(&body)
    }

    async fn forecast(&self, query: &Query) -> Result<Forecast, ProviderError> {
        let body = self.fetch("forecast", query).await?;
        parse_forecast(&body)
    }

    async fn probe(&self) -> Result<u16, ProviderError> {
        let res = self
            .http
            .get(self.endpoint("weather"))
            .query(&[
                ("q", PROBE_CITY),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await?;

        Ok(res.status().as_u16())
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEOUL_JSON: &str = r#"{
        "name": "Seoul",
        "sys": {"country": "KR", "sunrise": 1698106800, "sunset": 1698145200},
        "main": {"temp": 18.5, "feels_like": 17.2, "humidity": 65, "pressure": 1013,
                 "temp_min": 15.0, "temp_max": 22.0},
        "weather": [{"description": "구름조금", "icon": "02d"}],
        "wind": {"speed": 2.5},
        "cod": 200
    }"#;

    #[test]
    fn parses_current_weather() {
        let reading = parse_current(SEOUL_JSON).expect("parse");
        assert_eq!(reading.city, "Seoul");
        assert_eq!(reading.country, "KR");
        assert_eq!(reading.pressure_hpa, 1013);
        assert_eq!(reading.description, "구름조금");
        assert_eq!(reading.temp_max, Some(22.0));
        assert_eq!(reading.sunset.map(|t| t.timestamp()), Some(1698145200));
    }

    #[test]
    fn legacy_desc_key_is_normalized() {
        let body = r#"{
            "name": "Busan", "sys": {"country": "KR"},
            "main": {"temp": 20.1, "humidity": 72},
            "weather": [{"desc": "맑음", "icon": "01d"}],
            "wind": {"speed": 3.1}
        }"#;
        let reading = parse_current(body).expect("parse");
        assert_eq!(reading.description, "맑음");
        assert_eq!(reading.feels_like, 20.1);
        assert_eq!(reading.sunrise, None);
    }

    #[test]
    fn parses_forecast_list() {
        let body = r#"{
            "cod": "200", "cnt": 2,
            "city": {"name": "Tokyo", "country": "JP"},
            "list": [
                {"dt": 1700000000, "main": {"temp": 21.0, "humidity": 58},
                 "weather": [{"description": "맑음", "icon": "01d"}], "wind": {"speed": 1.8}},
                {"dt": 1700010800, "main": {"temp": 19.5, "humidity": 60, "temp_min": 18.0},
                 "weather": [{"description": "비", "icon": "10d"}], "wind": {"speed": 2.0}}
            ]
        }"#;
        let forecast = parse_forecast(body).expect("parse");
        assert_eq!(forecast.city, "Tokyo");
        assert_eq!(forecast.entries.len(), 2);
        assert_eq!(forecast.entries[1].description, "비");
        assert_eq!(forecast.entries[1].temp_min, Some(18.0));
    }

    #[test]
    fn malformed_body_is_reported() {
        let err = parse_current("{\"name\": 1}").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn coordinates_become_lat_lon_params() {
        let params = OpenWeatherProvider::location_params(&Query::coordinates(37.5, 127.0));
        assert_eq!(
            params,
            vec![("lat", "37.5".to_string()), ("lon", "127".to_string())]
        );
    }

    #[test]
    fn settings_never_use_a_zero_timeout() {
        let cfg = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        let settings = OpenWeatherSettings::from(&cfg);
        assert_eq!(settings.timeout, Duration::from_secs(1));
        assert_eq!(settings.lang, "kr");
    }
}
