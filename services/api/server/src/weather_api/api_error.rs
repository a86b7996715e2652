use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every API route: `{ "error": "..." }`.
#[derive(Serialize, ToSchema)]
pub struct ApiError {
    #[serde(skip)]
    pub(crate) status_code: StatusCode,
    #[serde(rename = "error")]
    #[schema(example = "City name is required")]
    pub(crate) message: String,
    #[serde(skip)]
    pub(crate) request_id: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, request_id: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, request_id)
    }

    pub fn not_found(message: impl Into<String>, request_id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, request_id)
    }

    pub fn internal_server_error(
        message: impl Into<String>,
        request_id: &str,
    ) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, request_id)
    }

    fn new(
        status_code: StatusCode,
        message: impl Into<String>,
        request_id: &str,
    ) -> Self {
        Self {
            status_code,
            message: message.into(),
            request_id: request_id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status_code.is_server_error() {
            sentry::Hub::with_active(|hub| hub.capture_error(&self));
        }

        (self.status_code, axum::Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, {}", self.status_code, self.message, self.request_id)
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("status_code", &self.status_code)
            .field("message", &self.message)
            .field("request_id", &self.request_id)
            .finish()
    }
}

impl std::error::Error for ApiError {}
