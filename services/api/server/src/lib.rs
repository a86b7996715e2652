//! # Weather History API Server
//!
use crate::history_service::HistoryService;
use crate::metrics::ServerMetrics;
use crate::shutdown::ShutdownCoordinator;
use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use history_models::JsonFileHistoryStore;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use telemetry::metrics::Telemetry;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use weather_client::{ClientConfig, OpenWeatherClient};

pub mod health;
pub mod history_service;
pub mod metrics;
pub mod shutdown;
mod weather_api;

// OpenAPI documentation module
pub mod openapi;

// Public modules - shared utilities and middleware
pub mod shared;

// Route registration is the only public surface of the handler tree
pub use weather_api::get_routes as get_weather_api_routes;

pub const VERSION: Option<&str> = option_env!("VERSION");

/// Returns the OpenAPI document route.
/// Serves OpenAPI 3.0 compatible JSON (nullable arrays rewritten).
pub fn get_openapi_routes() -> Router {
    async fn openapi_3_0_handler() -> Json<serde_json::Value> {
        Json(openapi::WeatherApiDoc::openapi_json())
    }

    Router::new().route("/api-docs/openapi.json", get(openapi_3_0_handler))
}

async fn api_fallback_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "The requested endpoint does not exist" })),
    )
}

/// Full application router: API, operational endpoints, and the front-end
/// bundle as catch-all.
pub fn app(state: AppState) -> Router {
    let static_dir = Path::new(&state.config.static_dir);
    let front_end = ServeDir::new(static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    let api = Router::new()
        .nest("/weather", get_weather_api_routes(state.clone()))
        .fallback(api_fallback_handler);

    Router::new()
        .route("/health", get(health::handler))
        .route("/version", get(|| async { VERSION.unwrap_or("unknown") }))
        .route("/metrics", get(metrics::handler))
        .with_state(state)
        .nest("/api", api)
        .merge(get_openapi_routes())
        .fallback_service(front_end)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(Clone)]
pub struct AppState {
    pub telemetry: Arc<Telemetry<ServerMetrics>>,
    pub history: Arc<HistoryService>,
    pub config: Arc<Config>,
    pub shutdown: Arc<ShutdownCoordinator>,
}

impl AppState {
    pub fn new(
        config: Config,
        history: Arc<HistoryService>,
        metrics: ServerMetrics,
    ) -> Self {
        Self {
            telemetry: Telemetry::new(Some(metrics)),
            shutdown: Arc::new(ShutdownCoordinator::new(history.clone())),
            history,
            config: Arc::new(config),
        }
    }

    /// Wires the file-backed store and the OpenWeather client from config.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(JsonFileHistoryStore::new(
            config.history_file_path.as_str(),
        ));
        let forecasts = Arc::new(
            OpenWeatherClient::new(config.client_config())
                .context("Failed to build forecast client")?,
        );
        let metrics =
            ServerMetrics::new(None).context("Failed to create server metrics")?;

        Ok(Self::new(
            config,
            Arc::new(HistoryService::new(store, forecasts)),
            metrics,
        ))
    }
}

impl axum::extract::FromRef<AppState> for Arc<HistoryService> {
    fn from_ref(state: &AppState) -> Self {
        state.history.clone()
    }
}

#[derive(serde::Deserialize)]
pub struct Config {
    // Service port
    #[serde(default = "default_port")]
    pub port: u16,

    // Loggers
    #[serde(default)]
    pub rust_log: Option<String>,
    #[serde(default)]
    pub log_format: String,

    // Forecast provider
    pub openweather_api_key: String,
    #[serde(default = "default_openweather_base_url")]
    pub openweather_base_url: String,
    #[serde(default)]
    pub upstream_timeout_secs: Option<u64>,

    // Persistence and front-end bundle
    #[serde(default = "default_history_file_path")]
    pub history_file_path: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    // Error reporting
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_openweather_base_url() -> String {
    weather_client::client::DEFAULT_BASE_URL.to_string()
}

fn default_history_file_path() -> String {
    "db/searchHistory.json".to_string()
}

fn default_static_dir() -> String {
    "client/dist".to_string()
}

impl Config {
    pub fn load() -> Result<Self, envy::Error> {
        // Load .env file if present (useful when running outside docker-compose)
        match dotenv::dotenv() {
            Ok(path) => eprintln!("Loaded .env from: {}", path.display()),
            Err(e) => eprintln!("dotenv warning: {e}"),
        }

        envy::from_env::<Config>()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.openweather_api_key.clone())
            .with_base_url(self.openweather_base_url.clone())
            .with_timeout(self.upstream_timeout_secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_minimal_env() {
        let config: Config = envy::from_iter(vec![(
            "OPENWEATHER_API_KEY".to_string(),
            "secret".to_string(),
        )])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.history_file_path, "db/searchHistory.json");
        assert_eq!(config.static_dir, "client/dist");
        assert_eq!(
            config.openweather_base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert!(config.upstream_timeout_secs.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_config_reads_overrides() {
        let config: Config = envy::from_iter(vec![
            ("OPENWEATHER_API_KEY".to_string(), "secret".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("UPSTREAM_TIMEOUT_SECS".to_string(), "7".to_string()),
            ("HISTORY_FILE_PATH".to_string(), "/tmp/h.json".to_string()),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_timeout_secs, Some(7));
        assert_eq!(config.history_file_path, "/tmp/h.json");
        assert_eq!(
            config.client_config().timeout,
            Some(Duration::from_secs(7))
        );
    }

    #[test]
    fn test_config_requires_api_key() {
        let result = envy::from_iter::<_, Config>(Vec::<(String, String)>::new());
        assert!(result.is_err());
    }
}
