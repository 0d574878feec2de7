//! Flat-file weather diary: one text file per day, entries appended as
//! human-readable blocks.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{DiaryError, model::WeatherReading};

pub const GENERAL_DIARY_CITY: &str = "일반일기";
pub const NO_WEATHER_DESCRIPTION: &str = "날씨정보없음";

const FILE_PREFIX: &str = "diary_";
const FILE_SUFFIX: &str = ".txt";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryEntry {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub mood: String,
    pub text: String,
    pub written_at: DateTime<Local>,
}

impl DiaryEntry {
    pub fn new(
        city: impl Into<String>,
        weather: &WeatherReading,
        mood: impl Into<String>,
        text: impl Into<String>,
        written_at: DateTime<Local>,
    ) -> Self {
        Self {
            city: city.into(),
            temperature: weather.temperature,
            description: weather.description.clone(),
            humidity_pct: weather.humidity_pct,
            mood: mood.into(),
            text: text.into(),
            written_at,
        }
    }

    /// An entry not tied to any city's weather.
    pub fn without_weather(
        mood: impl Into<String>,
        text: impl Into<String>,
        written_at: DateTime<Local>,
    ) -> Self {
        Self {
            city: GENERAL_DIARY_CITY.to_string(),
            temperature: 0.0,
            description: NO_WEATHER_DESCRIPTION.to_string(),
            humidity_pct: 0,
            mood: mood.into(),
            text: text.into(),
            written_at,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{FILE_PREFIX}{}{FILE_SUFFIX}",
            self.written_at.format("%Y-%m-%d")
        )
    }

    /// The block appended to the day's file.
    pub fn render(&self) -> String {
        format!(
            "\n=== 날씨 일기 | {stamp} ===\n\
             도시: {city}\n\
             온도: {temp}°C\n\
             날씨: {desc}\n\
             습도: {humidity}%\n\
             기분: {mood}\n\
             \n\
             오늘의 일기:\n\
             {text}\n\
             \n\
             {rule}\n\
             \n",
            stamp = self.written_at.format("%Y년 %m월 %d일 %H:%M"),
            city = self.city,
            temp = self.temperature,
            desc = self.description,
            humidity = self.humidity_pct,
            mood = self.mood,
            text = self.text,
            rule = "=".repeat(50),
        )
    }
}

/// All entries written on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryDay {
    /// Taken from the file name (`diary_YYYY-MM-DD.txt`).
    pub date: String,
    pub content: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DiaryStore {
    dir: PathBuf,
}

impl DiaryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append `entry` to its day's file, creating the directory and file as
    /// needed. Returns the file path.
    pub fn append(&self, entry: &DiaryEntry) -> Result<PathBuf, DiaryError> {
        if entry.text.trim().is_empty() {
            return Err(DiaryError::EmptyText);
        }

        fs::create_dir_all(&self.dir).map_err(|source| DiaryError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(entry.file_name());
        let io_err = |source| DiaryError::Io {
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;
        file.write_all(entry.render().as_bytes()).map_err(io_err)?;

        debug!(path = %path.display(), city = %entry.city, "Diary entry saved");
        Ok(path)
    }

    /// Every day file, newest first. A missing directory is an empty diary;
    /// unreadable files are skipped.
    pub fn load_all(&self) -> Result<Vec<DiaryDay>, DiaryError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(DiaryError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut days: Vec<DiaryDay> = read_dir
            .filter_map(|dirent| dirent.ok().map(|d| d.path()))
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?;
                let date = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
                let date = date.to_string();

                match fs::read_to_string(&path) {
                    Ok(content) => Some(DiaryDay {
                        date,
                        content,
                        path,
                    }),
                    Err(err) => {
                        warn!(
                            path = %path.display(),
                            error = %err,
                            "Skipping unreadable diary file"
                        );
                        None
                    }
                }
            })
            .collect();

        days.sort_by(|a, b| b.path.cmp(&a.path));
        Ok(days)
    }
}
