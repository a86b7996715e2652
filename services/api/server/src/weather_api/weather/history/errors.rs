use crate::history_service::HistoryServiceError;
use crate::weather_api::api_error::ApiError;
use crate::weather_api::error_recorder::IntoApiError;

pub type HandlerResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No history record with id {0}")]
    NotFound(String),

    #[error("Reading search history failed: {0}")]
    ListFailed(#[source] HistoryServiceError),

    #[error("Removing city from history failed: {0}")]
    RemoveFailed(#[source] HistoryServiceError),
}

impl IntoApiError for Error {
    fn error_code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::ListFailed(_) => "read_error",
            Error::RemoveFailed(_) => "store_error",
        }
    }

    fn into_api_error(self, request_id: &str) -> ApiError {
        match self {
            Error::NotFound(_) => {
                ApiError::not_found("City not found in history", request_id)
            }
            Error::ListFailed(_) => ApiError::internal_server_error(
                "Failed to retrieve search history",
                request_id,
            ),
            Error::RemoveFailed(_) => ApiError::internal_server_error(
                "Failed to remove city from history",
                request_id,
            ),
        }
    }
}
