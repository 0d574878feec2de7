//! Core library for the `nalssi` weather CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap provider and the fetcher that falls back to demo data
//! - A cached API health monitor
//! - Korean city name resolution, map markers and forecast summaries
//! - The rule-based weather assistant, everyday advice and the weather diary
//!
//! It is used by `nalssi-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod app;
pub mod assistant;
pub mod config;
pub mod diary;
pub mod error;
pub mod fallback;
pub mod geoip;
pub mod health;
pub mod map;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod service;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use app::Startup;
pub use config::Config;
pub use diary::{DiaryDay, DiaryEntry, DiaryStore};
pub use error::{DiaryError, ProviderError};
pub use health::{Clock, HealthMonitor, HealthStatus, ManualClock, SystemClock};
pub use model::{Coordinates, Forecast, ForecastEntry, Query, WeatherReading};
pub use provider::WeatherProvider;
pub use service::{FallbackReason, Lookup, Outcome, WeatherService};
