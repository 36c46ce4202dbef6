//! Dashboard state and the intents that change it.
//!
//! The dashboard is either listing every loaded city or showing one city
//! with its forecast. All mutation happens through `&mut self` on a single
//! task; network results arrive as [`DashboardMessage`]s. Nothing cancels an
//! in-flight forecast, so while a city is selected the last forecast to
//! resolve is the one shown.

use std::sync::Arc;

use skyboard_services::{FavoriteSet, FavoritesStore};
use skyboard_weather::{ForecastDay, WeatherSnapshot, WeatherSource};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::command::Command;
use crate::error::DashboardError;
use crate::search::CitySearch;
use crate::service::{self, DashboardMessage};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Listing,
    Detail(WeatherSnapshot),
}

/// Forecast currently on screen and the city it was fetched for
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub city: String,
    pub days: Vec<ForecastDay>,
}

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Dashboard {
    source: Arc<dyn WeatherSource>,
    favorites: FavoritesStore,
    cities: Vec<WeatherSnapshot>,
    view: ViewState,
    forecast: Option<ForecastView>,
    search: CitySearch,
    tx: UnboundedSender<DashboardMessage>,
}

impl Dashboard {
    /// Create an empty dashboard and the receiver its async results arrive on.
    pub fn new(
        source: Arc<dyn WeatherSource>,
        favorites: FavoritesStore,
    ) -> (Self, UnboundedReceiver<DashboardMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dashboard = Self {
            source,
            favorites,
            cities: Vec::new(),
            view: ViewState::Listing,
            forecast: None,
            search: CitySearch::new(),
            tx,
        };
        (dashboard, rx)
    }

    /// Fetch every default city in parallel and show whichever succeeded.
    pub async fn load_defaults(&mut self, cities: &[String]) {
        self.cities = service::fetch_all_current(self.source.as_ref(), cities).await;
    }

    pub fn cities(&self) -> &[WeatherSnapshot] {
        &self.cities
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selected(&self) -> Option<&WeatherSnapshot> {
        match &self.view {
            ViewState::Detail(city) => Some(city),
            ViewState::Listing => None,
        }
    }

    pub fn forecast(&self) -> Option<&ForecastView> {
        self.forecast.as_ref()
    }

    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.favorites()
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.is_favorite(city)
    }

    /// Loaded cities that are also favorites, in grid order
    pub fn loaded_favorites(&self) -> impl Iterator<Item = &WeatherSnapshot> {
        self.cities
            .iter()
            .filter(|c| self.favorites.is_favorite(&c.city))
    }

    pub fn search(&self) -> &CitySearch {
        &self.search
    }

    /// Submit `query` through the search box.
    ///
    /// Blank input only sets the validation message; nothing is fetched.
    pub fn search_city(&mut self, query: &str) {
        self.search.set_input(query);
        let Some(city) = self.search.submit() else {
            tracing::debug!("Rejected blank search");
            return;
        };

        tracing::info!("Searching for {}", city);
        service::request_search(&self.tx, self.source.clone(), city);
    }

    /// Open the detail view for a loaded city and start its forecast fetch.
    pub fn select_city(&mut self, name: &str) -> Result<(), DashboardError> {
        let snapshot = self
            .cities
            .iter()
            .find(|c| c.city == name)
            .cloned()
            .ok_or_else(|| DashboardError::CityNotLoaded(name.to_string()))?;

        tracing::info!("Selected {}", snapshot.city);
        let city = snapshot.city.clone();
        self.view = ViewState::Detail(snapshot);
        self.forecast = None;
        service::request_forecast(&self.tx, self.source.clone(), city);
        Ok(())
    }

    pub fn go_back(&mut self) {
        self.view = ViewState::Listing;
        self.forecast = None;
    }

    /// Drop every loaded snapshot named `name`; the view is left as is.
    pub fn remove_city(&mut self, name: &str) {
        let before = self.cities.len();
        self.cities.retain(|c| c.city != name);
        tracing::debug!("Removed {} tile(s) for {}", before - self.cities.len(), name);
    }

    pub fn toggle_favorite(&mut self, name: &str) -> &FavoriteSet {
        self.favorites.toggle(name)
    }

    /// Fold an async result into the view state.
    pub fn apply(&mut self, message: DashboardMessage) {
        match message {
            DashboardMessage::SearchDone { query, result } => match result {
                Some(snapshot) => {
                    tracing::info!("Added {} to the dashboard", snapshot.city);
                    self.cities.push(snapshot);
                }
                None => tracing::debug!("No weather for search {:?}", query),
            },
            DashboardMessage::ForecastDone { city, result } => {
                let Some(days) = result else {
                    return;
                };

                if matches!(self.view, ViewState::Listing) {
                    tracing::debug!("Discarding forecast for {}; no city selected", city);
                    return;
                }

                self.forecast = Some(ForecastView { city, days });
            }
        }
    }

    /// Run one parsed command.
    pub fn dispatch(&mut self, command: Command) -> Result<Flow, DashboardError> {
        match command {
            Command::Search(query) => self.search_city(&query),
            Command::Select(city) => self.select_city(&city)?,
            Command::Back => self.go_back(),
            Command::Remove(city) => self.remove_city(&city),
            Command::Favorite(city) => {
                self.toggle_favorite(&city);
            }
            Command::List | Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(line) => return Err(DashboardError::UnknownCommand(line)),
        }
        Ok(Flow::Continue)
    }
}
