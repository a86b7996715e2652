use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::AppState;
use crate::shared::extractors::request_id::RequestId;
use crate::shared::extractors::validations::ValidatedPayload;
use crate::weather_api::error_recorder::ErrorRecorder;

use super::errors::{Error, HandlerResult};
use super::models::{AddCityRequest, AddCityResponse, AddMode};

const HANDLER_NAME: &str = "weather_add_city";

/// Add a city to the search history
///
/// Fetches the 5 day / 3 hour forecast for `cityName` and stores it with a
/// new history record. The deprecated `{ "city": ... }` form stores the city
/// without a forecast and answers `{ id, city }`.
#[utoipa::path(
    post,
    path = "/weather",
    request_body = AddCityRequest,
    responses(
        (status = 200, description = "City stored in history", body = AddCityResponse),
        (status = 400, description = "City name missing or empty", body = crate::weather_api::api_error::ApiError),
        (status = 500, description = "Forecast fetch or history write failed", body = crate::weather_api::api_error::ApiError),
    ),
    tag = "weather",
)]
#[tracing::instrument(skip_all, name = "weather_add_city")]
pub async fn handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    ValidatedPayload(payload): ValidatedPayload<AddCityRequest>,
) -> HandlerResult<(StatusCode, Json<AddCityResponse>)> {
    let recorder =
        ErrorRecorder::new(&state.telemetry, HANDLER_NAME, &request_id);

    match payload.mode() {
        AddMode::WithForecast(city_name) => {
            tracing::info!(
                city = %city_name,
                request_id = %request_id,
                "Add city request",
            );

            let record = state
                .history
                .add_city_with_forecast(city_name)
                .await
                .map_err(|e| recorder.record(Error::ForecastFlow(e)))?;
            state
                .telemetry
                .maybe_use_metrics(|m| m.record_created("forecast"));

            Ok((StatusCode::OK, Json(AddCityResponse::Record(record))))
        }
        AddMode::AddOnly(city) => {
            tracing::warn!(
                city = %city,
                request_id = %request_id,
                "Deprecated add-only request, no forecast fetched",
            );

            let record = state
                .history
                .add_city(city)
                .await
                .map_err(|e| recorder.record(Error::AddOnlyFlow(e)))?;
            state
                .telemetry
                .maybe_use_metrics(|m| m.record_created("add_only"));

            Ok((StatusCode::OK, Json(AddCityResponse::AddOnly(record.into()))))
        }
        AddMode::Missing => Err(recorder.record(Error::MissingCityName)),
    }
}
