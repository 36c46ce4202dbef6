//! Weather data for Skyboard
//!
//! OpenWeatherMap client for current conditions and 5-day / 3-hour
//! forecasts, plus the reduction of a forecast to one entry per day.

pub mod aggregate;
pub mod client;
pub mod source;
pub mod types;

pub use aggregate::{daily_forecast, daily_forecast_local, group_by_date, DateGroups};
pub use client::OpenWeatherClient;
pub use source::WeatherSource;
pub use types::*;
