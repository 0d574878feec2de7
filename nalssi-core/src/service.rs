//! The weather fetcher: resolve the location, consult the health monitor,
//! try the live API once, and fall back to demo data otherwise.

use rand::Rng;
use std::fmt;
use tracing::{info, warn};

use crate::{
    Forecast, ProviderError, Query, WeatherReading, fallback,
    health::{HealthMonitor, HealthState, HealthStatus},
    provider::WeatherProvider,
    resolver,
};

/// Why demo data is being shown instead of live data.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The location always uses its own demo record.
    Dedicated,
    /// The API was not healthy, so no request was made.
    Health(HealthStatus),
    /// The request was made and failed.
    Provider(ProviderError),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Dedicated => f.write_str("this location uses dedicated demo data"),
            FallbackReason::Health(HealthStatus::Invalid) => f.write_str("the API key is invalid"),
            FallbackReason::Health(HealthStatus::NetworkError) => {
                f.write_str("the weather API could not be reached")
            }
            FallbackReason::Health(status) => write!(f, "the weather API status is {status}"),
            FallbackReason::Provider(ProviderError::Timeout) => {
                f.write_str("the request timed out")
            }
            FallbackReason::Provider(err) => write!(f, "the API request failed: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Live(T),
    Demo {
        data: T,
        reason: FallbackReason,
    },
    /// The API answered 404 for a city lookup. No fallback is attempted.
    CityNotFound,
    /// Fallback was needed but there is no demo data for this location.
    NoData {
        supported: &'static [&'static str],
    },
}

impl<T> Outcome<T> {
    fn from_fallback(data: Option<T>, reason: FallbackReason) -> Self {
        match data {
            Some(data) => Outcome::Demo { data, reason },
            None => Outcome::NoData {
                supported: fallback::SUPPORTED_CITIES,
            },
        }
    }
}

/// Result of a fetch, with enough context for the caller to explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<T> {
    /// What the caller asked for, as they wrote it.
    pub requested: String,
    /// English name used for the request when the input was translated.
    pub resolved_as: Option<String>,
    pub outcome: Outcome<T>,
}

impl<T> Lookup<T> {
    pub fn data(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Live(data) | Outcome::Demo { data, .. } => Some(data),
            Outcome::CityNotFound | Outcome::NoData { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self.outcome {
            Outcome::Live(data) | Outcome::Demo { data, .. } => Some(data),
            Outcome::CityNotFound | Outcome::NoData { .. } => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.outcome, Outcome::Live(_))
    }
}

/// A query after name resolution.
struct Target {
    requested: String,
    resolved_as: Option<String>,
    api_query: Query,
    demo_key: String,
    dedicated: bool,
}

impl Target {
    fn new(query: &Query) -> Self {
        match query {
            Query::City(input) => {
                if let Some(key) = resolver::dedicated_demo_key(input) {
                    return Self {
                        requested: input.trim().to_string(),
                        resolved_as: None,
                        api_query: query.clone(),
                        demo_key: key.to_string(),
                        dedicated: true,
                    };
                }

                let resolved = resolver::resolve_city(input);
                Self {
                    requested: input.trim().to_string(),
                    resolved_as: resolved.converted.then(|| resolved.name.clone()),
                    api_query: Query::City(resolved.name.clone()),
                    demo_key: resolved.name,
                    dedicated: false,
                }
            }
            Query::Coordinates(coords) => Self {
                requested: coords.to_string(),
                resolved_as: None,
                api_query: query.clone(),
                demo_key: fallback::DEFAULT_LOCATION.to_string(),
                dedicated: false,
            },
        }
    }

    fn is_city(&self) -> bool {
        matches!(self.api_query, Query::City(_))
    }

    fn finish<T>(self, outcome: Outcome<T>) -> Lookup<T> {
        Lookup {
            requested: self.requested,
            resolved_as: self.resolved_as,
            outcome,
        }
    }
}

enum Step<T> {
    Done(Outcome<T>),
    Fallback(FallbackReason),
}

#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
    health: HealthMonitor,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self::with_health(provider, HealthMonitor::new())
    }

    pub fn with_health(provider: Box<dyn WeatherProvider>, health: HealthMonitor) -> Self {
        Self { provider, health }
    }

    /// Cached API status, probing if the cache has expired.
    pub async fn api_status(&self) -> HealthStatus {
        self.health.status(self.provider.as_ref()).await
    }

    pub async fn health_snapshot(&self) -> HealthState {
        self.health.snapshot().await
    }

    pub async fn current(&self, query: &Query) -> Lookup<WeatherReading> {
        let target = Target::new(query);
        let step = self.current_step(&target).await;

        match step {
            Step::Done(outcome) => target.finish(outcome),
            Step::Fallback(reason) => {
                warn!(
                    requested = %target.requested,
                    demo = %target.demo_key,
                    %reason,
                    "Using demo weather"
                );
                let data = fallback::demo_reading(&target.demo_key);
                target.finish(Outcome::from_fallback(data, reason))
            }
        }
    }

    pub async fn forecast(&self, query: &Query) -> Lookup<Forecast> {
        let target = Target::new(query);
        let step = self.forecast_step(&target).await;
        let mut rng = rand::rng();
        self.finish_forecast(target, step, &mut rng)
    }

    /// Like [`forecast`](Self::forecast) with a caller-supplied RNG for the
    /// demo generator.
    pub async fn forecast_with_rng<R: Rng + ?Sized>(
        &self,
        query: &Query,
        rng: &mut R,
    ) -> Lookup<Forecast> {
        let target = Target::new(query);
        let step = self.forecast_step(&target).await;
        self.finish_forecast(target, step, rng)
    }

    async fn live_allowed(&self) -> Result<(), FallbackReason> {
        match self.api_status().await {
            HealthStatus::Active => Ok(()),
            other => Err(FallbackReason::Health(other)),
        }
    }

    async fn current_step(&self, target: &Target) -> Step<WeatherReading> {
        if target.dedicated {
            return Step::Fallback(FallbackReason::Dedicated);
        }
        if let Err(reason) = self.live_allowed().await {
            return Step::Fallback(reason);
        }

        match self.provider.current(&target.api_query).await {
            Ok(reading) => {
                info!(requested = %target.requested, city = %reading.city, "Live weather fetched");
                Step::Done(Outcome::Live(reading))
            }
            Err(ProviderError::NotFound) if target.is_city() => {
                warn!(requested = %target.requested, "City not found");
                Step::Done(Outcome::CityNotFound)
            }
            Err(err) => Step::Fallback(FallbackReason::Provider(err)),
        }
    }

    async fn forecast_step(&self, target: &Target) -> Step<Forecast> {
        if target.dedicated {
            return Step::Fallback(FallbackReason::Dedicated);
        }
        if let Err(reason) = self.live_allowed().await {
            return Step::Fallback(reason);
        }

        match self.provider.forecast(&target.api_query).await {
            Ok(forecast) => {
                info!(
                    requested = %target.requested,
                    entries = forecast.entries.len(),
                    "Live forecast fetched"
                );
                Step::Done(Outcome::Live(forecast))
            }
            Err(err) => Step::Fallback(FallbackReason::Provider(err)),
        }
    }

    fn finish_forecast<R: Rng + ?Sized>(
        &self,
        target: Target,
        step: Step<Forecast>,
        rng: &mut R,
    ) -> Lookup<Forecast> {
        match step {
            Step::Done(outcome) => target.finish(outcome),
            Step::Fallback(reason) => {
                warn!(
                    requested = %target.requested,
                    demo = %target.demo_key,
                    %reason,
                    "Using demo forecast"
                );
                let now = self.health.clock().now();
                let data = fallback::demo_forecast(&target.demo_key, now, rng);
                target.finish(Outcome::from_fallback(data, reason))
            }
        }
    }
}
