use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;
use crate::history_service::HistoryService;

const HISTORY_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub components: HashMap<String, ComponentHealth>,
    pub checked_at: DateTime<Utc>,
}

pub async fn handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut components = HashMap::new();

    let history_store = check_history_store(&state.history).await;
    let store_unhealthy = history_store.status == HealthStatus::Unhealthy;
    components.insert("history_store".to_string(), history_store);

    let overall = if store_unhealthy || state.shutdown.is_shutting_down() {
        HealthStatus::Unhealthy
    } else {
        HealthStatus::Healthy
    };

    let status_code = if overall == HealthStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall,
            components,
            checked_at: Utc::now(),
        }),
    )
}

async fn check_history_store(history: &HistoryService) -> ComponentHealth {
    let start = Instant::now();
    let result =
        tokio::time::timeout(HISTORY_STORE_TIMEOUT, history.check_store()).await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(records)) => ComponentHealth {
            status: HealthStatus::Healthy,
            latency_ms: Some(latency_ms),
            records: Some(records),
            error: None,
        },
        Ok(Err(e)) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: Some(latency_ms),
            records: None,
            error: Some(e.to_string()),
        },
        Err(_) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: Some(latency_ms),
            records: None,
            error: Some("timeout".to_string()),
        },
    }
}
