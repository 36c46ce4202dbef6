//! City tile view model for the listing grid.

use skyboard_weather::{IconVariant, WeatherSnapshot};

/// Color scheme of a tile, from the day/night marker of its icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileTheme {
    Day,
    Night,
    Neutral,
}

impl TileTheme {
    /// ANSI color prefix for the tile header
    pub fn ansi(&self) -> &'static str {
        match self {
            TileTheme::Day => "\x1b[30;106m",
            TileTheme::Night => "\x1b[34;47m",
            TileTheme::Neutral => "",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WeatherTile<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub is_favorite: bool,
}

impl<'a> WeatherTile<'a> {
    pub fn new(snapshot: &'a WeatherSnapshot, is_favorite: bool) -> Self {
        Self {
            snapshot,
            is_favorite,
        }
    }

    pub fn theme(&self) -> TileTheme {
        match self.snapshot.variant() {
            IconVariant::Day => TileTheme::Day,
            IconVariant::Night => TileTheme::Night,
            IconVariant::Unknown => TileTheme::Neutral,
        }
    }

    pub fn favorite_glyph(&self) -> &'static str {
        if self.is_favorite {
            "♥"
        } else {
            "♡"
        }
    }

    /// What `fav <city>` would do for this tile
    pub fn favorite_hint(&self) -> &'static str {
        if self.is_favorite {
            "Remove from favourites"
        } else {
            "Add to favourites"
        }
    }

    /// Body lines under the city header
    pub fn lines(&self) -> Vec<String> {
        let s = self.snapshot;
        vec![
            format!("{} °C", s.temperature),
            s.condition.clone(),
            format!("Wind Speed: {} m/s", s.wind_speed),
            format!("Humidity: {}%", s.humidity),
            format!("{} {}", self.favorite_glyph(), self.favorite_hint()),
        ]
    }
}
