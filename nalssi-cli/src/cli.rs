use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, Select, Text};

use nalssi_core::{
    Config, DiaryEntry, DiaryStore, Lookup, Query, Startup, WeatherReading, WeatherService,
    advice, app::SETUP_GUIDE, assistant, geoip, map, summary,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "nalssi",
    version,
    about = "Korean weather dashboard for the terminal"
)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// A city name (Korean or English) or a coordinate pair.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// City name, e.g. "서울", "부천", "Tokyo". Prompted for if omitted.
    pub city: Option<String>,

    /// Latitude; use together with --lon instead of a city name.
    #[arg(
        long,
        requires = "lon",
        conflicts_with = "city",
        allow_hyphen_values = true
    )]
    pub lat: Option<f64>,

    /// Longitude.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    fn query(&self) -> anyhow::Result<Query> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return Ok(Query::coordinates(lat, lon));
        }
        match &self.city {
            Some(city) => Ok(Query::city(city.clone())),
            None => prompt_city().map(Query::City),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key (and optional preferences).
    Configure {
        /// Language code for descriptions, e.g. "kr" or "en".
        #[arg(long)]
        lang: Option<String>,
    },

    #[command(flatten)]
    Weather(WeatherCommand),
}

/// Commands that need a configured API key.
#[derive(Debug, Subcommand)]
pub enum WeatherCommand {
    /// Show whether the live API is usable.
    Status,

    /// Current weather with everyday advice.
    Now(LocationArgs),

    /// Five-day forecast, day by day.
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        /// Also list the next 24 hours in three-hour steps.
        #[arg(long)]
        hourly: bool,
    },

    /// Current weather and forecast for where this machine appears to be.
    Here,

    /// Nationwide temperature markers.
    Map {
        /// Highlight one of the marker cities (Korean name).
        #[arg(long)]
        center: Option<String>,
    },

    /// Ask the weather assistant a question, e.g. "소풍 가도 될까요?".
    Ask {
        question: String,

        /// City whose weather the question is about.
        #[arg(long, default_value = "서울")]
        city: String,
    },

    /// Weather diary.
    #[command(subcommand)]
    Diary(DiaryCommand),
}

#[derive(Debug, Subcommand)]
pub enum DiaryCommand {
    /// Append an entry to today's diary file.
    Write {
        /// Attach this city's current weather; omit for a general entry.
        #[arg(long)]
        city: Option<String>,

        /// Mood label; chosen from suggestions if omitted.
        #[arg(long)]
        mood: Option<String>,

        /// Entry text; prompted for if omitted.
        text: Option<String>,
    },

    /// Print saved entries, newest day first.
    List,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        tracing::debug!(
            configured = config.is_configured(),
            lang = %config.lang,
            "Configuration loaded"
        );

        match self.command {
            Command::Configure { lang } => configure(&mut config, lang),
            Command::Weather(command) => match Startup::from_config(&config)? {
                Startup::SetupGuide => {
                    println!("{SETUP_GUIDE}");
                    Ok(())
                }
                Startup::Ready(service) => command.run(&service, &config).await,
            },
        }
    }
}

impl WeatherCommand {
    async fn run(self, service: &WeatherService, config: &Config) -> anyhow::Result<()> {
        match self {
            WeatherCommand::Status => {
                let status = service.api_status().await;
                let snapshot = service.health_snapshot().await;
                println!("{}", render::status(status, snapshot.last_checked));
            }
            WeatherCommand::Now(location) => {
                let query = location.query()?;
                if let Some(reading) = report(service.current(&query).await) {
                    println!("{}", render::reading(&reading));
                    println!("{}", render::advice(&advice::daily_advice(&reading)));
                }
            }
            WeatherCommand::Forecast { location, hourly } => {
                let query = location.query()?;
                show_forecast(service, &query, hourly).await;
            }
            WeatherCommand::Here => {
                let Some(location) = geoip::locate_by_ip(geoip::IP_API_URL).await else {
                    println!(
                        "❌ Could not determine your location. Try `nalssi now <CITY>`."
                    );
                    return Ok(());
                };
                println!(
                    "📍 {}, {} {}",
                    location.city, location.country, location.coordinates
                );

                let query = Query::Coordinates(location.coordinates);
                if let Some(reading) = report(service.current(&query).await) {
                    println!("{}", render::reading(&reading));
                }
                show_forecast(service, &query, true).await;
            }
            WeatherCommand::Map { center } => {
                let view = map::korea_weather_map(center.as_deref());
                println!("{}", render::map(&view));
            }
            WeatherCommand::Ask { question, city } => {
                let reading = report(service.current(&Query::city(city)).await);
                for line in assistant::answer(&question, reading.as_ref()) {
                    println!("{line}");
                }
            }
            WeatherCommand::Diary(DiaryCommand::Write { city, mood, text }) => {
                write_diary(service, config, city, mood, text).await?;
            }
            WeatherCommand::Diary(DiaryCommand::List) => {
                let days = DiaryStore::new(&config.diary_dir).load_all()?;
                if days.is_empty() {
                    println!("📔 No diary entries yet.");
                }
                for day in &days {
                    println!("{}", render::diary_day(day));
                }
            }
        }

        Ok(())
    }
}

fn configure(config: &mut Config, lang: Option<String>) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("https://openweathermap.org/api → API Keys")
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    config.set_api_key(api_key);

    if let Some(lang) = lang {
        config.lang = lang;
    }

    let path = config.save()?;
    println!("✅ Saved configuration to {}", path.display());
    Ok(())
}

fn prompt_city() -> anyhow::Result<String> {
    let city = Text::new("City:")
        .with_placeholder("예: 부천, 서울, Seoul, Tokyo")
        .prompt()
        .context("Failed to read city")?;

    let city = city.trim().to_string();
    if city.is_empty() {
        anyhow::bail!("City must not be empty");
    }
    Ok(city)
}

/// Print the notices attached to a lookup and hand back its data, if any.
fn report<T>(lookup: Lookup<T>) -> Option<T> {
    for line in render::lookup_notices(&lookup) {
        println!("{line}");
    }
    lookup.into_data()
}

async fn show_forecast(service: &WeatherService, query: &Query, hourly: bool) {
    let Some(forecast) = report(service.forecast(query).await) else {
        return;
    };

    println!(
        "📅 {}, {} - 5-day forecast",
        forecast.city, forecast.country
    );
    for day in summary::daily_summaries(&forecast, &Local) {
        println!("{}", render::daily_summary(&day));
    }
    println!("{}", render::trend(&summary::trend(&forecast, &Local)));

    if hourly {
        println!("🕐 Next 24 hours");
        for entry in summary::next_hours(&forecast) {
            println!("{}", render::hourly_entry(entry));
        }
    }
}

async fn write_diary(
    service: &WeatherService,
    config: &Config,
    city: Option<String>,
    mood: Option<String>,
    text: Option<String>,
) -> anyhow::Result<()> {
    let weather = match city {
        Some(city) => {
            let lookup = service.current(&Query::city(city.clone())).await;
            let reading = diary_weather(&city, report(lookup))?;
            Some((city, reading))
        }
        None => None,
    };

    let mood = match mood {
        Some(mood) => mood,
        None => {
            let options = match &weather {
                Some((_, w)) => advice::mood_suggestions(Some(w)),
                None => advice::DEFAULT_MOODS.to_vec(),
            };
            Select::new("Mood:", options)
                .prompt()
                .context("Failed to read mood")?
                .to_string()
        }
    };

    let text = match text {
        Some(text) => text,
        None => Text::new("오늘의 일기:")
            .prompt()
            .context("Failed to read diary text")?,
    };

    let now = Local::now();
    let entry = match &weather {
        Some((city, w)) => DiaryEntry::new(city.clone(), w, mood, text, now),
        None => DiaryEntry::without_weather(mood, text, now),
    };

    let path = DiaryStore::new(&config.diary_dir).append(&entry)?;
    println!("📔 Saved to {}", path.display());
    Ok(())
}

/// A diary entry for a named city needs that city's weather.
fn diary_weather(city: &str, reading: Option<WeatherReading>) -> anyhow::Result<WeatherReading> {
    reading.with_context(|| {
        format!("No weather for '{city}'; omit --city for a general entry")
    })
}
