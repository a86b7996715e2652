use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use prometheus::{IntCounterVec, Opts, Registry};
use telemetry::metrics::TelemetryMetrics;

use crate::AppState;

#[derive(Clone, Debug)]
pub struct ServerMetrics {
    pub registry: Registry,

    pub request_errors: IntCounterVec,
    pub history_records_created: IntCounterVec,
}

impl TelemetryMetrics for ServerMetrics {
    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn metrics(&self) -> Option<Self> {
        Some(self.clone())
    }
}

impl ServerMetrics {
    /// Metrics live in their own registry so several instances (one per test
    /// server) can coexist in a process.
    pub fn new(prefix: Option<String>) -> anyhow::Result<Self> {
        let request_errors = IntCounterVec::new(
            Opts::new(
                "request_errors",
                "A metric counting request errors by handler and error code",
            ),
            &["handler", "error_code"],
        )?;
        let history_records_created = IntCounterVec::new(
            Opts::new(
                "history_records_created",
                "A metric counting history records created by add flow",
            ),
            &["flow"],
        )?;

        let registry = Registry::new_custom(prefix, None)?;
        registry.register(Box::new(request_errors.clone()))?;
        registry.register(Box::new(history_records_created.clone()))?;

        Ok(Self {
            registry,
            request_errors,
            history_records_created,
        })
    }

    pub fn record_error(&self, handler: &str, error_code: &str) {
        self.request_errors
            .with_label_values(&[handler, error_code])
            .inc();
    }

    pub fn record_created(&self, flow: &str) {
        self.history_records_created
            .with_label_values(&[flow])
            .inc();
    }
}

pub async fn handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.telemetry.get_metrics(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        let metrics = ServerMetrics::new(Some("weather".to_string())).unwrap();
        metrics.record_error("weather_add_city", "fetch_error");
        metrics.record_created("forecast");
        metrics.record_created("forecast");

        let output = metrics.gather_metrics();

        assert!(output.contains(
            r#"weather_request_errors{error_code="fetch_error",handler="weather_add_city"} 1"#
        ));
        assert!(
            output.contains(r#"weather_history_records_created{flow="forecast"} 2"#)
        );
    }

    #[test]
    fn test_instances_do_not_collide() {
        let first = ServerMetrics::new(None).unwrap();
        let second = ServerMetrics::new(None).unwrap();
        first.record_created("add_only");

        assert!(!second.gather_metrics().contains("add_only"));
    }
}
