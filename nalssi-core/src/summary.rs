//! Day-by-day digest of a three-hourly forecast.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Forecast, ForecastEntry};

pub const SUMMARY_DAYS: usize = 5;
pub const NEXT_HOURS_ENTRIES: usize = 8;

const UNKNOWN_DESCRIPTION: &str = "알 수 없음";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPeriod {
    Dawn,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Dawn,
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
    ];

    pub fn of_hour(hour: u32) -> Self {
        match hour {
            0..6 => DayPeriod::Dawn,
            6..12 => DayPeriod::Morning,
            12..18 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Dawn => "🌅 새벽 (00-06시)",
            DayPeriod::Morning => "☀️ 오전 (06-12시)",
            DayPeriod::Afternoon => "🌞 오후 (12-18시)",
            DayPeriod::Evening => "🌙 저녁 (18-24시)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: DayPeriod,
    pub avg_temperature: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_temperature: f64,
    pub max_temperature: f64,
    /// Most frequent description of the day; ties go to the one seen first.
    pub description: String,
    pub icon: String,
    pub avg_humidity_pct: u8,
    pub avg_wind_speed: f64,
    /// Only periods that have at least one entry.
    pub periods: Vec<PeriodSummary>,
}

/// One point per day for a trend line: the first entry of each date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity_pct: u8,
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}

fn description_of(entry: &ForecastEntry) -> &str {
    if entry.description.is_empty() {
        UNKNOWN_DESCRIPTION
    } else {
        &entry.description
    }
}

/// Most frequent description, first-seen wins on ties.
fn most_common<'a>(entries: &[&'a ForecastEntry]) -> Option<&'a ForecastEntry> {
    let mut counts: Vec<(&str, usize, &ForecastEntry)> = Vec::new();
    for &entry in entries {
        let desc = description_of(entry);
        match counts.iter_mut().find(|(d, ..)| *d == desc) {
            Some((_, n, _)) => *n += 1,
            None => counts.push((desc, 1, entry)),
        }
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(usize, &ForecastEntry)>, (_, n, entry)| match best {
            Some((m, _)) if m >= n => best,
            _ => Some((n, entry)),
        })
        .map(|(_, entry)| entry)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn group_by_local_date<'a, Tz: TimeZone>(
    forecast: &'a Forecast,
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<(&'a ForecastEntry, DateTime<Tz>)>> {
    let mut days: BTreeMap<NaiveDate, Vec<_>> = BTreeMap::new();
    for entry in &forecast.entries {
        let local = entry.at.with_timezone(tz);
        let date = local.date_naive();
        days.entry(date).or_default().push((entry, local));
    }
    days
}

/// Summaries for the first five local dates of the forecast, oldest first.
pub fn daily_summaries<Tz: TimeZone>(forecast: &Forecast, tz: &Tz) -> Vec<DailySummary> {
    group_by_local_date(forecast, tz)
        .into_iter()
        .take(SUMMARY_DAYS)
        .filter_map(|(date, items)| {
            let entries: Vec<&ForecastEntry> = items.iter().map(|(e, _)| *e).collect();
            let representative = most_common(&entries)?;

            let temps = entries.iter().map(|e| e.temperature);
            let min_temperature = temps.clone().fold(f64::INFINITY, f64::min);
            let max_temperature = temps.fold(f64::NEG_INFINITY, f64::max);

            let humidity_sum: usize = entries.iter().map(|e| e.humidity_pct as usize).sum();
            let avg_humidity_pct = (humidity_sum / entries.len()) as u8;

            let periods = DayPeriod::ALL
                .into_iter()
                .filter_map(|period| {
                    let in_period: Vec<&ForecastEntry> = items
                        .iter()
                        .filter(|(_, local)| DayPeriod::of_hour(local.hour()) == period)
                        .map(|(e, _)| *e)
                        .collect();
                    let common = most_common(&in_period)?;
                    Some(PeriodSummary {
                        period,
                        avg_temperature: mean(in_period.iter().map(|e| e.temperature)),
                        description: description_of(common).to_string(),
                    })
                })
                .collect();

            Some(DailySummary {
                date,
                min_temperature,
                max_temperature,
                description: description_of(representative).to_string(),
                icon: representative.icon.clone(),
                avg_humidity_pct,
                avg_wind_speed: mean(entries.iter().map(|e| e.wind_speed)),
                periods,
            })
        })
        .collect()
}

pub fn trend<Tz: TimeZone>(forecast: &Forecast, tz: &Tz) -> Vec<TrendPoint> {
    group_by_local_date(forecast, tz)
        .into_iter()
        .take(SUMMARY_DAYS)
        .filter_map(|(date, items)| {
            let (first, _) = items.first()?;
            Some(TrendPoint {
                date,
                temperature: first.temperature,
                humidity_pct: first.humidity_pct,
            })
        })
        .collect()
}

/// The next 24 hours: the first eight three-hour entries.
pub fn next_hours(forecast: &Forecast) -> &[ForecastEntry] {
    let n = forecast.entries.len().min(NEXT_HOURS_ENTRIES);
    &forecast.entries[..n]
}

/// "10/24 (화)"
pub fn date_label(date: NaiveDate) -> String {
    let weekday = weekday_label(date.weekday());
    format!("{} ({weekday})", date.format("%m/%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta, Utc};

    use DayPeriod::{Afternoon, Dawn, Evening, Morning};

    fn entry(
        at: DateTime<Utc>,
        temp: f64,
        description: &str,
        icon: &str,
        humidity: u8,
    ) -> ForecastEntry {
        ForecastEntry {
            at,
            temperature: temp,
            temp_min: None,
            temp_max: None,
            humidity_pct: humidity,
            wind_speed: 2.0,
            description: description.into(),
            icon: icon.into(),
        }
    }

    fn start() -> DateTime<Utc> {
        // 2023-11-14 00:00 UTC
        DateTime::from_timestamp(1_699_920_000, 0).expect("ts")
    }

    fn slot(i: i64) -> DateTime<Utc> {
        start() + TimeDelta::hours(3 * i)
    }

    fn nov(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, day).expect("date")
    }

    fn forecast(entries: Vec<ForecastEntry>) -> Forecast {
        Forecast {
            city: "Seoul".into(),
            country: "KR".into(),
            entries,
        }
    }

    #[test]
    fn periods_split_the_day() {
        assert_eq!(DayPeriod::of_hour(0), DayPeriod::Dawn);
        assert_eq!(DayPeriod::of_hour(5), DayPeriod::Dawn);
        assert_eq!(DayPeriod::of_hour(6), DayPeriod::Morning);
        assert_eq!(DayPeriod::of_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::of_hour(23), DayPeriod::Evening);
    }

    #[test]
    fn one_day_digest() {
        let t = start();
        let f = forecast(vec![
            entry(t, 10.0, "흐림", "04n", 60),
            entry(t + TimeDelta::hours(3), 12.0, "맑음", "01n", 61),
            entry(t + TimeDelta::hours(9), 18.0, "맑음", "01d", 70),
            entry(t + TimeDelta::hours(15), 16.0, "흐림", "04d", 80),
        ]);

        let days = daily_summaries(&f, &Utc);
        assert_eq!(days.len(), 1);

        let day = &days[0];
        assert_eq!(day.date, nov(14));
        assert_eq!(day.min_temperature, 10.0);
        assert_eq!(day.max_temperature, 18.0);
        // 흐림 and 맑음 tie 2:2; 흐림 was seen first.
        assert_eq!(day.description, "흐림");
        assert_eq!(day.icon, "04n");
        // (60 + 61 + 70 + 80) / 4 = 67.75 -> 67
        assert_eq!(day.avg_humidity_pct, 67);
        assert_eq!(day.avg_wind_speed, 2.0);

        let periods: Vec<_> = day.periods.iter().map(|p| p.period).collect();
        assert_eq!(periods, [Dawn, Morning, Afternoon]);
        assert_eq!(day.periods[0].avg_temperature, 11.0);
    }

    #[test]
    fn groups_by_local_date_and_keeps_five_days() {
        let entries = (0..56)
            .map(|i| entry(slot(i), 10.0, "맑음", "01d", 50))
            .collect();
        let f = forecast(entries);

        let days = daily_summaries(&f, &Utc);
        assert_eq!(days.len(), SUMMARY_DAYS);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));

        // In KST the first entry is 09:00 and 15:00 UTC rolls over to the
        // next date, so the first day has no dawn slots.
        let kst = FixedOffset::east_opt(9 * 3600).expect("offset");
        let days = daily_summaries(&f, &kst);
        assert_eq!(days[0].date, nov(14));
        let periods: Vec<_> = days[0].periods.iter().map(|p| p.period).collect();
        assert_eq!(periods, [Morning, Afternoon, Evening]);
    }

    #[test]
    fn empty_description_counts_as_unknown() {
        let f = forecast(vec![entry(start(), 5.0, "", "01d", 50)]);
        let days = daily_summaries(&f, &Utc);
        assert_eq!(days[0].description, UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn next_hours_is_capped_at_eight() {
        let entries: Vec<_> = (0..40)
            .map(|i| entry(slot(i), i as f64, "맑음", "01d", 50))
            .collect();
        let f = forecast(entries);
        assert_eq!(next_hours(&f).len(), 8);
        assert_eq!(next_hours(&f)[7].temperature, 7.0);
        assert!(next_hours(&forecast(Vec::new())).is_empty());
    }

    #[test]
    fn trend_takes_first_entry_per_day() {
        let t = start();
        let f = forecast(vec![
            entry(t, 10.0, "맑음", "01d", 50),
            entry(t + TimeDelta::hours(3), 20.0, "맑음", "01d", 90),
            entry(t + TimeDelta::hours(24), 11.0, "맑음", "01d", 55),
        ]);
        let points = trend(&f, &Utc);
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].temperature, points[0].humidity_pct), (10.0, 50));
        assert_eq!(points[1].temperature, 11.0);
    }

    #[test]
    fn date_label_uses_korean_weekday() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 24).expect("date");
        assert_eq!(date_label(date), "10/24 (화)");
    }
}
