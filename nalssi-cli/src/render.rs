//! Plain-text rendering of core results.

use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

use nalssi_core::{
    DiaryDay, ForecastEntry, HealthStatus, Lookup, Outcome, WeatherReading,
    map::MapView,
    model::{SPEED_UNIT, TEMPERATURE_UNIT as T},
    summary::{DailySummary, TrendPoint, date_label},
};

fn local_hm(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

pub fn status(status: HealthStatus, last_checked: Option<DateTime<Utc>>) -> String {
    let label = match status {
        HealthStatus::Active => "🟢 API active",
        HealthStatus::Invalid => "🔴 API key invalid",
        HealthStatus::Error => "🟠 API error",
        HealthStatus::NetworkError => "🔴 API unreachable",
        HealthStatus::Unknown => "⚪ API status unknown",
    };

    match last_checked {
        Some(at) => format!(
            "{label} (checked {})",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => label.to_string(),
    }
}

/// Lines explaining how a lookup was resolved and where its data came from.
pub fn lookup_notices<T>(lookup: &Lookup<T>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(english) = &lookup.resolved_as {
        lines.push(format!("🔄 '{}' → '{english}'", lookup.requested));
    }

    match &lookup.outcome {
        Outcome::Live(_) => {}
        Outcome::Demo { reason, .. } => {
            lines.push(format!("⚠️  Showing demo data: {reason}"));
        }
        Outcome::CityNotFound => {
            lines.push(format!(
                "❌ City '{}' not found. Check the spelling or try the English name.",
                lookup.requested
            ));
        }
        Outcome::NoData { supported } => {
            lines.push(format!("❌ No data available for '{}'.", lookup.requested));
            lines.push(format!("   Demo data exists for: {}", supported.join(", ")));
        }
    }

    lines
}

pub fn reading(w: &WeatherReading) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🌤️  {}, {}  {}", w.city, w.country, w.description);
    let _ = writeln!(
        out,
        "   Temperature: {}{T} (feels like {}{T})",
        w.temperature, w.feels_like
    );
    if let (Some(min), Some(max)) = (w.temp_min, w.temp_max) {
        let _ = writeln!(out, "   Min / Max:   {min}{T} / {max}{T}");
    }
    let _ = writeln!(out, "   Humidity:    {}%", w.humidity_pct);
    let _ = writeln!(out, "   Wind:        {} {SPEED_UNIT}", w.wind_speed);
    let _ = write!(out, "   Pressure:    {} hPa", w.pressure_hpa);
    if let (Some(rise), Some(set)) = (w.sunrise, w.sunset) {
        let (rise, set) = (local_hm(rise), local_hm(set));
        let _ = write!(out, "\n   Sun:         ↑ {rise}  ↓ {set}");
    }

    out
}

pub fn advice(lines: &[&str]) -> String {
    let mut out = String::from("💡 Advice");
    for line in lines {
        let _ = write!(out, "\n   {line}");
    }
    out
}

pub fn daily_summary(day: &DailySummary) -> String {
    let mut out = format!(
        "{}  {}  {:.1}{T} / {:.1}{T}  💧 {}%  🌪️ {:.1} {SPEED_UNIT}",
        date_label(day.date),
        day.description,
        day.max_temperature,
        day.min_temperature,
        day.avg_humidity_pct,
        day.avg_wind_speed,
    );
    for period in &day.periods {
        let _ = write!(
            out,
            "\n     {}  {:.1}{T}  {}",
            period.period.label(),
            period.avg_temperature,
            period.description
        );
    }
    out
}

/// Temperature and humidity at the first reading of each day, as two lines.
pub fn trend(points: &[TrendPoint]) -> String {
    let mut temperatures = Vec::new();
    let mut humidity = Vec::new();
    for p in points {
        temperatures.push(format!("{:.1}{T}", p.temperature));
        humidity.push(format!("{}%", p.humidity_pct));
    }

    let (temperatures, humidity) = (temperatures.join(" → "), humidity.join(" → "));
    format!("📈 Trend\n   기온  {temperatures}\n   습도  {humidity}")
}

pub fn hourly_entry(entry: &ForecastEntry) -> String {
    format!(
        "   {}  {:.1}{T}  {}  💧 {}%",
        entry.at.with_timezone(&Local).format("%m/%d %H:%M"),
        entry.temperature,
        entry.description,
        entry.humidity_pct
    )
}

pub fn map(view: &MapView) -> String {
    let mut out = format!("🗺️  Center {} (zoom {})", view.center, view.zoom);

    for m in &view.markers {
        let marker = if m.selected { "◉" } else { "●" };
        let _ = write!(
            out,
            "\n {marker} {:<4} {:>5}°C  {:<13} {:<8} {}%  [{}]",
            m.city, m.temperature, m.icon_label, m.description, m.humidity_pct, m.fill_color
        );
    }

    out.push_str("\n온도 범례");
    for band in view.legend {
        let _ = write!(out, "\n   {}  {}", band.color, band.label);
    }
    out
}

pub fn diary_day(day: &DiaryDay) -> String {
    format!("📔 {}\n{}", day.date, day.content.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalssi_core::{FallbackReason, ProviderError, fallback, map::korea_weather_map};

    fn lookup<T>(outcome: Outcome<T>, resolved_as: Option<&str>) -> Lookup<T> {
        Lookup {
            requested: "서울".into(),
            resolved_as: resolved_as.map(str::to_string),
            outcome,
        }
    }

    #[test]
    fn live_lookup_only_mentions_translation() {
        let notices = lookup(Outcome::Live(()), Some("Seoul"));
        assert_eq!(lookup_notices(&notices), vec!["🔄 '서울' → 'Seoul'"]);
    }

    #[test]
    fn demo_lookup_explains_reason() {
        let l = lookup(
            Outcome::Demo {
                data: (),
                reason: FallbackReason::Provider(ProviderError::Timeout),
            },
            None,
        );
        assert_eq!(
            lookup_notices(&l),
            vec!["⚠️  Showing demo data: the request timed out"]
        );
    }

    #[test]
    fn no_data_lists_supported_cities() {
        let l: Lookup<()> = lookup(
            Outcome::NoData {
                supported: fallback::SUPPORTED_CITIES,
            },
            None,
        );
        let notices = lookup_notices(&l);
        assert_eq!(notices.len(), 2);
        assert!(notices[1].contains("서울, 부산"));
    }

    #[test]
    fn reading_block_has_core_metrics() {
        let seoul = fallback::demo_reading("seoul").expect("seoul");
        let text = reading(&seoul);
        assert!(text.starts_with("🌤️  Seoul, KR  구름조금"));
        assert!(text.contains("Temperature: 18.5°C (feels like 17.2°C)"));
        assert!(text.contains("Min / Max:   15°C / 22°C"));
        assert!(text.contains("Wind:        2.5 m/s"));
    }

    #[test]
    fn map_lists_every_marker_and_legend() {
        let text = map(&korea_weather_map(Some("부산")));
        assert!(text.contains("◉ 부산"));
        assert_eq!(text.matches('●').count(), 12);
        assert!(text.ends_with("#FF0000  30°C 이상 (매우 더움)"));
    }

    #[test]
    fn unknown_status_has_no_timestamp() {
        assert_eq!(status(HealthStatus::Unknown, None), "⚪ API status unknown");
    }

    #[test]
    fn trend_joins_daily_points() {
        let date = chrono::NaiveDate::from_ymd_opt(2023, 10, 24).expect("date");
        let points = [
            TrendPoint {
                date,
                temperature: 18.5,
                humidity_pct: 65,
            },
            TrendPoint {
                date: date.succ_opt().expect("next day"),
                temperature: 20.04,
                humidity_pct: 70,
            },
        ];
        assert_eq!(
            trend(&points),
            "📈 Trend\n   기온  18.5°C → 20.0°C\n   습도  65% → 70%"
        );
    }

    #[test]
    fn temperatures_are_always_celsius() {
        let seoul = fallback::demo_reading("seoul").expect("seoul");
        let text = reading(&seoul);
        assert!(!text.contains("°F"));
        assert!(text.contains("Wind:        2.5 m/s"));
    }
}
