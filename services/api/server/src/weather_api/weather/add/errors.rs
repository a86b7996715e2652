use crate::history_service::HistoryServiceError;
use crate::weather_api::api_error::ApiError;
use crate::weather_api::error_recorder::IntoApiError;

use super::models::AddCityRequest;

pub type HandlerResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("City name is required")]
    MissingCityName,

    #[error("Adding city with forecast failed: {0}")]
    ForecastFlow(#[source] HistoryServiceError),

    #[error("Adding city without forecast failed: {0}")]
    AddOnlyFlow(#[source] HistoryServiceError),
}

impl IntoApiError for Error {
    fn error_code(&self) -> &'static str {
        match self {
            Error::MissingCityName
            | Error::ForecastFlow(HistoryServiceError::MissingCityName)
            | Error::AddOnlyFlow(HistoryServiceError::MissingCityName) => {
                "missing_city_name"
            }
            Error::ForecastFlow(HistoryServiceError::Fetch(_)) => "fetch_error",
            Error::ForecastFlow(_) | Error::AddOnlyFlow(_) => "store_error",
        }
    }

    fn into_api_error(self, request_id: &str) -> ApiError {
        match self {
            Error::MissingCityName
            | Error::ForecastFlow(HistoryServiceError::MissingCityName)
            | Error::AddOnlyFlow(HistoryServiceError::MissingCityName) => {
                ApiError::bad_request(
                    AddCityRequest::missing_city_message(),
                    request_id,
                )
            }
            Error::ForecastFlow(_) => ApiError::internal_server_error(
                "Failed to fetch weather data",
                request_id,
            ),
            Error::AddOnlyFlow(_) => ApiError::internal_server_error(
                "Error adding city to search history",
                request_id,
            ),
        }
    }
}
