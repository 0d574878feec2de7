//! Canned demo data used whenever the live API can't be used.
//!
//! The records mirror the shape of real OpenWeatherMap responses. The
//! forecast generator produces illustrative numbers only.

use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, seq::IndexedRandom};

use crate::model::{Forecast, ForecastEntry, WeatherReading};

/// Demo key used when a coordinate lookup has to fall back.
pub const DEFAULT_LOCATION: &str = "seoul";

/// Names shown to the user when a city has no demo data.
pub const SUPPORTED_CITIES: &[&str] = &[
    "서울", "부산", "인천", "대구", "대전", "광주", "울산", "수원", "춘천", "청주", "전주", "제주",
    "김포", "Tokyo", "New York", "London", "Paris",
];

pub const FORECAST_DAYS: usize = 5;
pub const SLOTS_PER_DAY: usize = 8;
const SLOT_HOURS: i64 = 3;

struct DemoCity {
    key: &'static str,
    name: &'static str,
    country: &'static str,
    sunrise: i64,
    sunset: i64,
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
    temp_min: f64,
    temp_max: f64,
    description: &'static str,
    icon: &'static str,
    wind: f64,
}

#[rustfmt::skip]
const DEMO_CITIES: &[DemoCity] = &[
    DemoCity { key: "seoul", name: "Seoul", country: "KR", sunrise: 1698106800, sunset: 1698145200, temp: 18.5, feels_like: 17.2, humidity: 65, pressure: 1013, temp_min: 15.0, temp_max: 22.0, description: "구름조금", icon: "02d", wind: 2.5 },
    DemoCity { key: "busan", name: "Busan", country: "KR", sunrise: 1698106900, sunset: 1698145300, temp: 20.1, feels_like: 19.8, humidity: 72, pressure: 1015, temp_min: 17.0, temp_max: 23.0, description: "맑음", icon: "01d", wind: 3.1 },
    DemoCity { key: "incheon", name: "Incheon", country: "KR", sunrise: 1698106750, sunset: 1698145150, temp: 17.8, feels_like: 16.9, humidity: 68, pressure: 1012, temp_min: 14.0, temp_max: 21.0, description: "흐림", icon: "04d", wind: 2.8 },
    DemoCity { key: "daegu", name: "Daegu", country: "KR", sunrise: 1698107000, sunset: 1698145400, temp: 19.3, feels_like: 18.7, humidity: 61, pressure: 1016, temp_min: 16.0, temp_max: 22.0, description: "맑음", icon: "01d", wind: 2.2 },
    DemoCity { key: "daejeon", name: "Daejeon", country: "KR", sunrise: 1698106850, sunset: 1698145250, temp: 18.7, feels_like: 17.9, humidity: 64, pressure: 1014, temp_min: 15.0, temp_max: 21.0, description: "구름조금", icon: "02d", wind: 2.1 },
    DemoCity { key: "gwangju", name: "Gwangju", country: "KR", sunrise: 1698107100, sunset: 1698145500, temp: 20.5, feels_like: 19.8, humidity: 70, pressure: 1013, temp_min: 17.0, temp_max: 23.0, description: "맑음", icon: "01d", wind: 2.9 },
    DemoCity { key: "ulsan", name: "Ulsan", country: "KR", sunrise: 1698107050, sunset: 1698145450, temp: 19.8, feels_like: 19.2, humidity: 69, pressure: 1015, temp_min: 16.0, temp_max: 22.0, description: "구름많음", icon: "03d", wind: 3.3 },
    DemoCity { key: "suwon", name: "Suwon", country: "KR", sunrise: 1698106780, sunset: 1698145180, temp: 18.2, feels_like: 17.5, humidity: 66, pressure: 1013, temp_min: 15.0, temp_max: 21.0, description: "구름조금", icon: "02d", wind: 2.4 },
    DemoCity { key: "chuncheon", name: "Chuncheon", country: "KR", sunrise: 1698106700, sunset: 1698145100, temp: 16.1, feels_like: 15.3, humidity: 71, pressure: 1011, temp_min: 12.0, temp_max: 19.0, description: "안개", icon: "50d", wind: 1.8 },
    DemoCity { key: "cheongju", name: "Cheongju", country: "KR", sunrise: 1698106820, sunset: 1698145220, temp: 17.9, feels_like: 17.1, humidity: 67, pressure: 1012, temp_min: 14.0, temp_max: 20.0, description: "구름많음", icon: "03d", wind: 2.3 },
    DemoCity { key: "jeonju", name: "Jeonju", country: "KR", sunrise: 1698107050, sunset: 1698145450, temp: 19.4, feels_like: 18.8, humidity: 68, pressure: 1014, temp_min: 16.0, temp_max: 22.0, description: "맑음", icon: "01d", wind: 2.6 },
    DemoCity { key: "jeju", name: "Jeju", country: "KR", sunrise: 1698107200, sunset: 1698145600, temp: 22.3, feels_like: 21.9, humidity: 75, pressure: 1016, temp_min: 19.0, temp_max: 25.0, description: "구름조금", icon: "02d", wind: 4.1 },
    DemoCity { key: "kimpo", name: "김포", country: "KR", sunrise: 1698106770, sunset: 1698145170, temp: 17.5, feels_like: 16.8, humidity: 67, pressure: 1012, temp_min: 14.0, temp_max: 20.0, description: "구름많음", icon: "03d", wind: 2.6 },
    DemoCity { key: "tokyo", name: "Tokyo", country: "JP", sunrise: 1698106200, sunset: 1698144600, temp: 21.3, feels_like: 20.8, humidity: 58, pressure: 1018, temp_min: 18.0, temp_max: 24.0, description: "맑음", icon: "01d", wind: 1.8 },
    DemoCity { key: "new york", name: "New York", country: "US", sunrise: 1698142800, sunset: 1698180000, temp: 16.2, feels_like: 15.1, humidity: 72, pressure: 1010, temp_min: 12.0, temp_max: 19.0, description: "흐림", icon: "04d", wind: 3.2 },
    DemoCity { key: "london", name: "London", country: "GB", sunrise: 1698142200, sunset: 1698179400, temp: 12.8, feels_like: 11.5, humidity: 78, pressure: 1008, temp_min: 9.0, temp_max: 15.0, description: "비", icon: "10d", wind: 4.2 },
    DemoCity { key: "paris", name: "Paris", country: "FR", sunrise: 1698142500, sunset: 1698179700, temp: 14.6, feels_like: 13.9, humidity: 68, pressure: 1012, temp_min: 11.0, temp_max: 17.0, description: "구름많음", icon: "03d", wind: 2.8 },
];

/// Conditions the forecast generator picks from: (icon, description).
const WEATHER_PATTERNS: &[(&str, &str)] = &[
    ("01d", "맑음"),
    ("02d", "구름조금"),
    ("03d", "구름많음"),
    ("04d", "흐림"),
    ("09d", "소나기"),
    ("10d", "비"),
    ("13d", "눈"),
    ("50d", "안개"),
];

fn find(city: &str) -> Option<&'static DemoCity> {
    let key = city.trim().to_lowercase();
    DEMO_CITIES.iter().find(|c| c.key == key)
}

/// Canned current conditions for `city`, matched case-insensitively against
/// the English demo keys.
pub fn demo_reading(city: &str) -> Option<WeatherReading> {
    let c = find(city)?;

    Some(WeatherReading {
        city: c.name.to_string(),
        country: c.country.to_string(),
        temperature: c.temp,
        feels_like: c.feels_like,
        humidity_pct: c.humidity,
        pressure_hpa: c.pressure,
        wind_speed: c.wind,
        description: c.description.to_string(),
        icon: c.icon.to_string(),
        sunrise: DateTime::from_timestamp(c.sunrise, 0),
        sunset: DateTime::from_timestamp(c.sunset, 0),
        temp_min: Some(c.temp_min),
        temp_max: Some(c.temp_max),
    })
}

/// Synthesize a five-day, three-hourly forecast around the city's demo
/// temperature.
///
/// Each day gets one offset in [-3, 3] and each slot a further offset in
/// [-2, 2]. Day `i` starts at `now + (i + 1)` days.
pub fn demo_forecast<R: Rng + ?Sized>(
    city: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<Forecast> {
    let base = find(city)?;
    let mut entries = Vec::with_capacity(FORECAST_DAYS * SLOTS_PER_DAY);

    for day in 0..FORECAST_DAYS {
        let date = now + TimeDelta::days(day as i64 + 1);
        let day_offset = rng.random_range(-3.0..=3.0);

        for slot in 0..SLOTS_PER_DAY {
            let temperature = base.temp + day_offset + rng.random_range(-2.0..=2.0);
            let (icon, description) = *WEATHER_PATTERNS.choose(rng).unwrap_or(&WEATHER_PATTERNS[0]);

            entries.push(ForecastEntry {
                at: date + TimeDelta::hours(slot as i64 * SLOT_HOURS),
                temperature: round1(temperature),
                temp_min: Some(round1(temperature - 2.0)),
                temp_max: Some(round1(temperature + 2.0)),
                humidity_pct: rng.random_range(50..=80),
                wind_speed: round1(rng.random_range(1.0..=5.0)),
                description: description.to_string(),
                icon: icon.to_string(),
            });
        }
    }

    Some(Forecast {
        city: base.name.to_string(),
        country: base.country.to_string(),
        entries,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
