//! Marker set for the nationwide weather map.
//!
//! Markers always use demo data so the map can be drawn without spending API
//! calls on thirteen cities at once.

use serde::Serialize;

use crate::{fallback, model::Coordinates};

/// Marker cities: (Korean name, lat, lon, English demo key).
pub const KOREAN_CITY_COORDINATES: &[(&str, f64, f64, &str)] = &[
    ("서울", 37.5665, 126.9780, "Seoul"),
    ("부산", 35.1796, 129.0756, "Busan"),
    ("인천", 37.4563, 126.7052, "Incheon"),
    ("대구", 35.8714, 128.6014, "Daegu"),
    ("대전", 36.3504, 127.3845, "Daejeon"),
    ("광주", 35.1595, 126.8526, "Gwangju"),
    ("울산", 35.5384, 129.3114, "Ulsan"),
    ("수원", 37.2636, 127.0286, "Suwon"),
    ("춘천", 37.8813, 127.7298, "Chuncheon"),
    ("청주", 36.6424, 127.4890, "Cheongju"),
    ("전주", 35.8242, 127.1480, "Jeonju"),
    ("제주", 33.4996, 126.5312, "Jeju"),
    ("김포", 37.6158, 126.7159, "Kimpo"),
];

pub const KOREA_CENTER: Coordinates = Coordinates {
    lat: 36.5,
    lon: 127.5,
};
pub const NATIONWIDE_ZOOM: u8 = 7;
pub const CITY_ZOOM: u8 = 10;

/// Colour band used for a marker fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendBand {
    pub color: &'static str,
    pub label: &'static str,
}

#[rustfmt::skip]
pub const LEGEND: [LegendBand; 6] = [
    LegendBand { color: "#0000FF", label: "0°C 미만 (매우 추움)" },
    LegendBand { color: "#4169E1", label: "0-10°C (추움)" },
    LegendBand { color: "#32CD32", label: "10-20°C (선선함)" },
    LegendBand { color: "#FFD700", label: "20-25°C (적당함)" },
    LegendBand { color: "#FF8C00", label: "25-30°C (더움)" },
    LegendBand { color: "#FF0000", label: "30°C 이상 (매우 더움)" },
];

pub fn temperature_color(temp: f64) -> &'static str {
    let band = match temp {
        t if t < 0.0 => 0,
        t if t < 10.0 => 1,
        t if t < 20.0 => 2,
        t if t < 25.0 => 3,
        t if t < 30.0 => 4,
        _ => 5,
    };
    LEGEND[band].color
}

/// Symbolic label for an OpenWeather icon code.
pub fn icon_label(icon: &str) -> &'static str {
    match icon {
        "01d" => "SUN",
        "01n" => "MOON",
        "02d" => "PARTLY_CLOUDY",
        "02n" | "03d" | "03n" | "04d" | "04n" => "CLOUDY",
        "09d" | "09n" | "10d" | "10n" => "RAIN",
        "11d" | "11n" => "STORM",
        "13d" | "13n" => "SNOW",
        "50d" | "50n" => "FOG",
        _ => "CLEAR",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMarker {
    pub city: &'static str,
    pub position: Coordinates,
    pub temperature: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub icon_label: &'static str,
    pub selected: bool,
    pub radius: u8,
    pub weight: u8,
    pub border_color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<CityMarker>,
    pub legend: &'static [LegendBand],
}

impl MapView {
    pub fn selected(&self) -> Option<&CityMarker> {
        self.markers.iter().find(|m| m.selected)
    }
}

fn coordinates_of(city: &str) -> Option<Coordinates> {
    KOREAN_CITY_COORDINATES
        .iter()
        .find(|(name, ..)| *name == city)
        .map(|&(_, lat, lon, _)| Coordinates::new(lat, lon))
}

/// Build the nationwide map, optionally centred on one of the marker cities
/// (by Korean name). An unknown centre city falls back to the national view.
pub fn korea_weather_map(center_city: Option<&str>) -> MapView {
    let center_city = center_city.map(str::trim);
    let (center, zoom) = match center_city.and_then(coordinates_of) {
        Some(coords) => (coords, CITY_ZOOM),
        None => (KOREA_CENTER, NATIONWIDE_ZOOM),
    };

    let markers = KOREAN_CITY_COORDINATES
        .iter()
        .filter_map(|&(city, lat, lon, english)| {
            let reading = fallback::demo_reading(english)?;
            let selected = center_city == Some(city);

            Some(CityMarker {
                city,
                position: Coordinates::new(lat, lon),
                temperature: reading.temperature,
                icon_label: icon_label(&reading.icon),
                humidity_pct: reading.humidity_pct,
                selected,
                radius: if selected { 20 } else { 15 },
                weight: if selected { 4 } else { 2 },
                border_color: if selected { "#FFD700" } else { "white" },
                fill_color: temperature_color(reading.temperature),
                fill_opacity: if selected { 0.9 } else { 0.8 },
                tooltip: format!("{city}: {}°C", reading.temperature),
                description: reading.description,
            })
        })
        .collect();

    MapView {
        center,
        zoom,
        markers,
        legend: &LEGEND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_bands_have_inclusive_lower_bounds() {
        assert_eq!(temperature_color(-0.1), "#0000FF");
        assert_eq!(temperature_color(0.0), "#4169E1");
        assert_eq!(temperature_color(10.0), "#32CD32");
        assert_eq!(temperature_color(20.0), "#FFD700");
        assert_eq!(temperature_color(25.0), "#FF8C00");
        assert_eq!(temperature_color(29.9), "#FF8C00");
        assert_eq!(temperature_color(30.0), "#FF0000");
    }

    #[test]
    fn icon_labels() {
        assert_eq!(icon_label("01n"), "MOON");
        assert_eq!(icon_label("02d"), "PARTLY_CLOUDY");
        assert_eq!(icon_label("02n"), "CLOUDY");
        assert_eq!(icon_label("11d"), "STORM");
        assert_eq!(icon_label("99x"), "CLEAR");
    }

    #[test]
    fn nationwide_view_has_every_city_unselected() {
        let map = korea_weather_map(None);
        assert_eq!(map.center, KOREA_CENTER);
        assert_eq!(map.zoom, NATIONWIDE_ZOOM);
        assert_eq!(map.markers.len(), KOREAN_CITY_COORDINATES.len());
        assert!(map.selected().is_none());
        for m in &map.markers {
            assert_eq!((m.radius, m.border_color), (15, "white"));
        }
    }

    #[test]
    fn selected_city_is_highlighted_and_centred() {
        let map = korea_weather_map(Some("제주"));
        assert_eq!(map.zoom, CITY_ZOOM);
        assert_eq!(map.center, Coordinates::new(33.4996, 126.5312));

        let jeju = map.selected().expect("selected marker");
        assert_eq!(jeju.city, "제주");
        assert_eq!((jeju.radius, jeju.weight), (20, 4));
        assert_eq!(jeju.border_color, "#FFD700");
        assert_eq!(jeju.fill_color, "#FFD700");
        assert_eq!(jeju.tooltip, "제주: 22.3°C");
        assert_eq!(map.markers.iter().filter(|m| m.selected).count(), 1);
    }

    #[test]
    fn unknown_centre_uses_national_view() {
        let map = korea_weather_map(Some("평양"));
        assert_eq!(map.center, KOREA_CENTER);
        assert!(map.selected().is_none());
    }

    #[test]
    fn kimpo_marker_uses_dedicated_record() {
        let map = korea_weather_map(None);
        let mut markers = map.markers.iter();
        let kimpo = markers.find(|m| m.city == "김포").expect("kimpo");
        assert_eq!(kimpo.temperature, 17.5);
        assert_eq!(kimpo.icon_label, "CLOUDY");
        assert_eq!(kimpo.fill_color, "#32CD32");
    }
}
