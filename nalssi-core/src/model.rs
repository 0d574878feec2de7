use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The API is always queried in metric units; every threshold and label in
/// the crate assumes Celsius and metres per second.
pub const UNITS: &str = "metric";
pub const TEMPERATURE_UNIT: &str = "°C";
pub const SPEED_UNIT: &str = "m/s";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// What the caller asked for: a free-text city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl Query {
    pub fn city(name: impl Into<String>) -> Self {
        Query::City(name.into())
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Query::Coordinates(Coordinates::new(lat, lon))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::City(name) => f.write_str(name),
            Query::Coordinates(coords) => coords.fmt(f),
        }
    }
}

/// Current conditions for one location, in whatever unit system was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

impl WeatherReading {
    /// Case-insensitive substring test against the description.
    pub fn description_has(&self, needle: &str) -> bool {
        self.description.to_lowercase().contains(needle)
    }

    pub fn is_clear(&self) -> bool {
        self.description_has("맑")
    }

    pub fn is_rainy(&self) -> bool {
        self.description_has("비")
    }

    pub fn is_foggy(&self) -> bool {
        self.description_has("안개")
    }
}

/// One three-hour slot of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub at: DateTime<Utc>,
    pub temperature: f64,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub country: String,
    pub entries: Vec<ForecastEntry>,
}
