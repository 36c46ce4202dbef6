use async_trait::async_trait;

use crate::client::OpenWeatherClient;
use crate::types::{ForecastResponse, WeatherSnapshot};

/// Where the dashboard gets its weather from.
///
/// Implementations never fail outward: any error is logged and reported
/// as `None`, and the caller simply omits that item.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_current(&self, city: &str) -> Option<WeatherSnapshot>;

    async fn fetch_forecast(&self, city: &str) -> Option<ForecastResponse>;
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Option<WeatherSnapshot> {
        OpenWeatherClient::fetch_current(self, city).await
    }

    async fn fetch_forecast(&self, city: &str) -> Option<ForecastResponse> {
        OpenWeatherClient::fetch_forecast(self, city).await
    }
}
