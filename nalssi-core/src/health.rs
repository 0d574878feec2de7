//! Cached classification of whether the live API is usable.
//!
//! The monitor probes at most once per TTL window. It owns its state and its
//! clock, so callers share it by reference and tests can move time by hand.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::{
    fmt,
    sync::{Arc, Mutex as StdMutex, PoisonError},
};
use tokio::sync::Mutex;
use tracing::info;

use crate::{ProviderError, provider::WeatherProvider};

pub const HEALTH_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    Unknown,
    Active,
    Invalid,
    Error,
    NetworkError,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "unknown",
            HealthStatus::Active => "active",
            HealthStatus::Invalid => "invalid",
            HealthStatus::Error => "error",
            HealthStatus::NetworkError => "network_error",
        }
    }

    /// 200 → active, 401 → invalid, any other status → error, no response →
    /// network error.
    pub fn classify(probe: &Result<u16, ProviderError>) -> Self {
        match probe {
            Ok(200) => HealthStatus::Active,
            Ok(401) => HealthStatus::Invalid,
            Ok(_) => HealthStatus::Error,
            Err(_) => HealthStatus::NetworkError,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<StdMutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(StdMutex::new(start)),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HealthState {
    pub status: HealthStatus,
    pub last_checked: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct HealthMonitor {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    state: Mutex<HealthState>,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            ttl: TimeDelta::seconds(HEALTH_TTL_SECS),
            state: Mutex::new(HealthState::default()),
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Current status, probing through `provider` only if the cached value
    /// is older than the TTL (or was never set).
    ///
    /// The lock is held across the probe so concurrent callers share one
    /// probe.
    pub async fn status(&self, provider: &dyn WeatherProvider) -> HealthStatus {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some(last) = state.last_checked {
            if now - last < self.ttl {
                return state.status;
            }
        }

        let probe = provider.probe().await;
        let status = HealthStatus::classify(&probe);

        match &probe {
            Ok(code) => info!(status = %status, http_status = code, "API health probed"),
            Err(err) => info!(status = %status, error = %err, "API health probe failed"),
        }

        state.status = status;
        state.last_checked = Some(now);
        status
    }

    /// Cached state without probing.
    pub async fn snapshot(&self) -> HealthState {
        *self.state.lock().await
    }
}
