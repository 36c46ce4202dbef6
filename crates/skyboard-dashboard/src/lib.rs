//! Terminal dashboard: view state, user intents and rendering.

pub mod command;
pub mod controller;
pub mod error;
pub mod render;
pub mod search;
pub mod service;
pub mod tile;

pub use command::Command;
pub use controller::{Dashboard, Flow, ForecastView, ViewState};
pub use error::DashboardError;
pub use search::{CitySearch, EMPTY_CITY_MESSAGE};
pub use service::DashboardMessage;
pub use tile::{TileTheme, WeatherTile};
