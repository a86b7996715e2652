use std::time::Duration;

use async_trait::async_trait;
use history_models::ForecastEntry;

use crate::error::{WeatherClientError, WeatherClientResult};
use crate::models::ForecastResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Upper bound on how much of an error body is kept for logs.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// `None` leaves reqwest's default (no overall timeout).
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Source of forecasts for a city.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn fetch_forecast(
        &self,
        city_name: &str,
    ) -> WeatherClientResult<Vec<ForecastEntry>>;
}

/// Client for the OpenWeather 5 day / 3 hour forecast endpoint.
///
/// Every call is a fresh request: no retries, no response caching.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    forecast_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: ClientConfig) -> WeatherClientResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            forecast_url: format!(
                "{}/forecast",
                config.base_url.trim_end_matches('/')
            ),
            api_key: config.api_key,
        })
    }

    pub fn forecast_url(&self) -> &str {
        &self.forecast_url
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    async fn fetch_forecast(
        &self,
        city_name: &str,
    ) -> WeatherClientResult<Vec<ForecastEntry>> {
        tracing::debug!(city = %city_name, "Requesting forecast from provider");

        let response = self
            .http
            .get(&self.forecast_url)
            .query(&[("q", city_name), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WeatherClientError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)?;
        let entries = parsed.into_entries()?;

        tracing::debug!(
            city = %city_name,
            points = entries.len(),
            "Forecast received"
        );

        Ok(entries)
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
