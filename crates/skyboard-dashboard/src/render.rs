//! Plain-text rendering of the dashboard.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};
use skyboard_weather::{ForecastDay, WeatherSnapshot};

use crate::controller::{Dashboard, ViewState};
use crate::tile::WeatherTile;

const RESET: &str = "\x1b[0m";
const RULE: &str = "────────────────────────────────────────";

/// Render the whole screen with forecast dates in local time.
pub fn render(dashboard: &Dashboard) -> String {
    render_in(dashboard, &Local)
}

/// Render the whole screen with forecast dates in `tz`.
pub fn render_in<Tz: TimeZone>(dashboard: &Dashboard, tz: &Tz) -> String {
    let mut out = String::new();
    out.push_str("Weather Dashboard\n");
    out.push_str(RULE);
    out.push('\n');

    out.push_str(&render_favorites(dashboard));

    match dashboard.view() {
        ViewState::Listing => out.push_str(&render_listing(dashboard)),
        ViewState::Detail(city) => {
            out.push_str(&render_detail(city));
            let days = dashboard.forecast().map(|f| f.days.as_slice()).unwrap_or_default();
            out.push_str(&render_forecast(days, tz));
        }
    }

    // Sits directly above the input prompt
    out.push('\n');
    if let Some(error) = dashboard.search().error() {
        let _ = writeln!(out, "! {}", error);
    }

    out
}

/// Sidebar of loaded favorites, shown only when any favorite exists
pub fn render_favorites(dashboard: &Dashboard) -> String {
    if dashboard.favorites().is_empty() {
        return String::new();
    }

    let mut out = String::from("Favorite Cities\n");
    for city in dashboard.loaded_favorites() {
        let _ = writeln!(out, "  * {}", city.city);
    }
    out.push('\n');
    out
}

pub fn render_listing(dashboard: &Dashboard) -> String {
    let mut out = String::from("City Weather\n");
    if dashboard.cities().is_empty() {
        out.push_str("  (no cities loaded)\n");
    }

    for snapshot in dashboard.cities() {
        let tile = WeatherTile::new(snapshot, dashboard.is_favorite(&snapshot.city));
        out.push_str(&render_tile(&tile));
    }
    out
}

pub fn render_tile(tile: &WeatherTile<'_>) -> String {
    let theme = tile.theme().ansi();
    let reset = if theme.is_empty() { "" } else { RESET };

    let mut out = format!("\n  {}[ {} ]{}\n", theme, tile.snapshot.city, reset);
    for line in tile.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    out
}

pub fn render_detail(city: &WeatherSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  |  Today", city.city);
    let _ = writeln!(out, "  {} °C", city.temperature);
    let _ = writeln!(out, "  {}  {}", city.condition, city.icon_url());
    let _ = writeln!(out, "  Wind Speed: {} m/s", city.wind_speed);
    let _ = writeln!(out, "  Humidity: {}%", city.humidity);
    out.push_str("  (type `back` to return)\n");
    out
}

pub fn render_forecast<Tz: TimeZone>(days: &[ForecastDay], tz: &Tz) -> String {
    let mut out = String::from("\n5-Day Forecast\n");
    for day in days {
        let date = day
            .date_in(tz)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "?".to_string());
        let _ = writeln!(out, "  {}  {}°C  {}", date, day.temperature, day.description);
        let _ = writeln!(out, "    {}", day.icon_url());
    }
    out
}
