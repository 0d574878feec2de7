//! Approximate location from the caller's public IP (ip-api.com, no key
//! required).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::model::Coordinates;

pub const IP_API_URL: &str = "http://ip-api.com/json/";
const REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpLocation {
    pub coordinates: Coordinates,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    country: Option<String>,
}

/// Look up the current public IP's location at `url`.
/// Returns `None` on any failure; the caller can ask for a city instead.
pub async fn locate_by_ip(url: &str) -> Option<IpLocation> {
    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create geolocation client: {}", e);
            return None;
        }
    };

    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("IP geolocation request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("IP geolocation returned status {}", response.status());
        return None;
    }

    let body: IpApiResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("IP geolocation parse error: {}", e);
            return None;
        }
    };

    if body.status != "success" {
        tracing::debug!("IP geolocation status: {}", body.status);
        return None;
    }

    let location = IpLocation {
        coordinates: Coordinates::new(body.lat?, body.lon?),
        city: body.city.unwrap_or_default(),
        country: body.country.unwrap_or_default(),
    };

    tracing::info!("Located by IP: {}, {}", location.city, location.country);
    Some(location)
}
