use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for OpenWeatherMap condition icons
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// One `weather[]` element of an API response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Short group label, e.g. "Clouds"
    #[serde(default)]
    pub main: String,
    /// Longer text, e.g. "scattered clouds"
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
}

/// Body of `GET /weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
}

/// One 3-hour entry of `GET /forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Seconds since the Unix epoch
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }

    /// Calendar date of this entry as seen in `tz`.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.timestamp()
            .map(|ts| ts.with_timezone(tz).date_naive())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
}

/// Body of `GET /forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

/// Current conditions for one city.
///
/// The city name is the identity key within the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Percent
    pub humidity: u8,
    /// Metres per second
    pub wind_speed: f64,
    pub condition: String,
    pub icon: String,
}

impl From<CurrentResponse> for WeatherSnapshot {
    fn from(resp: CurrentResponse) -> Self {
        let condition = resp.weather.into_iter().next().unwrap_or_default();
        Self {
            city: resp.name,
            temperature: resp.main.temp,
            humidity: resp.main.humidity,
            wind_speed: resp.wind.speed,
            condition: condition.main,
            icon: condition.icon,
        }
    }
}

impl WeatherSnapshot {
    pub fn variant(&self) -> IconVariant {
        IconVariant::from_icon(&self.icon)
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Representative forecast entry for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Seconds since the Unix epoch
    pub dt: i64,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

impl From<&ForecastEntry> for ForecastDay {
    fn from(entry: &ForecastEntry) -> Self {
        let condition = entry.weather.first().cloned().unwrap_or_default();
        Self {
            dt: entry.dt,
            temperature: entry.main.temp,
            description: condition.description,
            icon: condition.icon,
        }
    }
}

impl ForecastDay {
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.dt, 0).map(|ts| ts.with_timezone(tz).date_naive())
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Day/night flavor encoded in the last character of an icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconVariant {
    Day,
    Night,
    Unknown,
}

impl IconVariant {
    pub fn from_icon(icon: &str) -> Self {
        match icon.chars().last() {
            Some('d') => Self::Day,
            Some('n') => Self::Night,
            _ => Self::Unknown,
        }
    }
}

/// `@2x` PNG for an icon code such as `"04n"`
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}@2x.png", ICON_BASE_URL, icon)
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
}
