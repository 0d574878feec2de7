//! In-process provider double for unit tests.

use async_trait::async_trait;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    Forecast, ProviderError, Query, WeatherReading, fallback, provider::WeatherProvider,
};

#[derive(Debug)]
pub struct ScriptedProvider {
    probe: Result<u16, ProviderError>,
    current: Result<WeatherReading, ProviderError>,
    forecast: Result<Forecast, ProviderError>,
    probes: AtomicUsize,
    requests: AtomicUsize,
    queries: Mutex<Vec<Query>>,
}

impl ScriptedProvider {
    /// Probe answers 200; data calls return a "live" Tokyo reading.
    pub fn healthy() -> Self {
        let mut live = fallback::demo_reading("tokyo").expect("tokyo demo");
        live.temperature = 25.0;
        live.description = "실시간".into();

        Self {
            probe: Ok(200),
            current: Ok(live),
            forecast: Ok(Forecast {
                city: "Tokyo".into(),
                country: "JP".into(),
                entries: Vec::new(),
            }),
            probes: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_probe(mut self, probe: Result<u16, ProviderError>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_current(mut self, current: Result<WeatherReading, ProviderError>) -> Self {
        self.current = current;
        self
    }

    pub fn with_forecast(mut self, forecast: Result<Forecast, ProviderError>) -> Self {
        self.forecast = forecast;
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().expect("queries lock").clone()
    }

    fn record(&self, query: &Query) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut queries = self.queries.lock().expect("queries lock");
        queries.push(query.clone());
    }
}

#[async_trait]
impl WeatherProvider for ScriptedProvider {
    async fn current(&self, query: &Query) -> Result<WeatherReading, ProviderError> {
        self.record(query);
        self.current.clone()
    }

    async fn forecast(&self, query: &Query) -> Result<Forecast, ProviderError> {
        self.record(query);
        self.forecast.clone()
    }

    async fn probe(&self) -> Result<u16, ProviderError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.probe.clone()
    }
}
