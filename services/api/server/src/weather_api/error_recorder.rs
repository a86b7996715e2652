use std::sync::Arc;

use telemetry::metrics::Telemetry;

use crate::metrics::ServerMetrics;
use crate::weather_api::api_error::ApiError;

/// Handler error types that map onto an [`ApiError`] response.
pub trait IntoApiError {
    /// Label used for the `error_code` metric dimension.
    fn error_code(&self) -> &'static str;

    fn into_api_error(self, request_id: &str) -> ApiError;
}

/// Records error metrics, logs the cause and converts handler errors to
/// [`ApiError`].
pub struct ErrorRecorder<'a> {
    telemetry: &'a Arc<Telemetry<ServerMetrics>>,
    handler_name: &'a str,
    request_id: &'a str,
}

impl<'a> ErrorRecorder<'a> {
    pub fn new(
        telemetry: &'a Arc<Telemetry<ServerMetrics>>,
        handler_name: &'a str,
        request_id: &'a str,
    ) -> Self {
        Self {
            telemetry,
            handler_name,
            request_id,
        }
    }

    pub fn record<E>(&self, e: E) -> ApiError
    where
        E: IntoApiError + std::fmt::Display,
    {
        let code = e.error_code();
        self.telemetry.maybe_use_metrics(|m| {
            m.record_error(self.handler_name, code);
        });

        let detail = e.to_string();
        let err = e.into_api_error(self.request_id);
        if err.status_code().is_server_error() {
            tracing::error!(
                handler = self.handler_name,
                error_code = code,
                request_id = %self.request_id,
                "{detail}"
            );
        } else {
            tracing::info!(
                handler = self.handler_name,
                error_code = code,
                request_id = %self.request_id,
                "{detail}"
            );
        }
        err
    }
}
