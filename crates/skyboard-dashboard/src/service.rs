//! Async weather requests for the dashboard.
//! Network work runs on spawned tasks; results come back over an mpsc
//! channel and are applied by the dashboard in arrival order.

use std::sync::Arc;

use futures::future::join_all;
use skyboard_weather::{daily_forecast_local, ForecastDay, WeatherSnapshot, WeatherSource};
use tokio::sync::mpsc::UnboundedSender;

/// Messages sent from async operations back to the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardMessage {
    /// A searched city finished loading (`None` if the fetch failed)
    SearchDone {
        query: String,
        result: Option<WeatherSnapshot>,
    },
    /// A city's forecast finished loading, already reduced to one entry per day
    ForecastDone {
        city: String,
        result: Option<Vec<ForecastDay>>,
    },
}

/// Fetch current weather for every city at once.
///
/// Resolves after all fetches finish; failed cities are left out and the
/// rest keep their input order.
pub async fn fetch_all_current(
    source: &dyn WeatherSource,
    cities: &[String],
) -> Vec<WeatherSnapshot> {
    let results = join_all(cities.iter().map(|city| source.fetch_current(city))).await;

    let loaded: Vec<_> = results.into_iter().flatten().collect();
    tracing::info!("Loaded {} of {} default cities", loaded.len(), cities.len());
    loaded
}

/// Request current weather for a searched city.
/// Sends `SearchDone` on the channel when complete.
pub fn request_search(
    tx: &UnboundedSender<DashboardMessage>,
    source: Arc<dyn WeatherSource>,
    query: String,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source.fetch_current(&query).await;
        let _ = tx.send(DashboardMessage::SearchDone { query, result });
    });
}

/// Request the forecast for a selected city.
/// Sends `ForecastDone` on the channel when complete.
pub fn request_forecast(
    tx: &UnboundedSender<DashboardMessage>,
    source: Arc<dyn WeatherSource>,
    city: String,
) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source
            .fetch_forecast(&city)
            .await
            .map(|forecast| daily_forecast_local(&forecast.list));
        let _ = tx.send(DashboardMessage::ForecastDone { city, result });
    });
}
