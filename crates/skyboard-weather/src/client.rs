//! OpenWeatherMap client.
//!
//! Two read endpoints: `/weather` (current conditions) and `/forecast`
//! (5 days of 3-hour entries), both queried by city name. The `try_*`
//! methods surface the failure; the plain methods log it and return `None`.
//! There is no retry or backoff. Readings are always requested in metric
//! units (°C, m/s).

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use skyboard_core::WeatherConfig;
use tracing::instrument;

use crate::types::{CurrentResponse, ForecastResponse, WeatherError, WeatherSnapshot};

const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a client from the `[weather]` config section.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let api_key = config.resolve_api_key().unwrap_or_else(|| {
            tracing::warn!("No weather API key configured; requests will be rejected");
            String::new()
        });

        Self::new(
            &config.base_url,
            &api_key,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Current conditions for `city`, or `None` on any failure.
    pub async fn fetch_current(&self, city: &str) -> Option<WeatherSnapshot> {
        match self.try_fetch_current(city).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::error!("Error fetching weather data for {}: {}", city, e);
                None
            }
        }
    }

    /// Raw 5-day forecast for `city`, or `None` on any failure.
    pub async fn fetch_forecast(&self, city: &str) -> Option<ForecastResponse> {
        match self.try_fetch_forecast(city).await {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                tracing::error!("Error fetching forecast data for {}: {}", city, e);
                None
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn try_fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let resp: CurrentResponse = self.get("weather", city).await?;
        Ok(WeatherSnapshot::from(resp))
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn try_fetch_forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError> {
        let forecast: ForecastResponse = self.get("forecast", city).await?;
        tracing::debug!("Forecast for {} has {} entries", city, forecast.list.len());
        Ok(forecast)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        Self::handle_response(response, city).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        city: &str,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| WeatherError::Network(e.without_url()))?;
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(WeatherError::InvalidApiKey)
        } else if status == StatusCode::NOT_FOUND {
            Err(WeatherError::CityNotFound(city.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
