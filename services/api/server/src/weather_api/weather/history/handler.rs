use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use history_models::HistoryRecord;

use crate::AppState;
use crate::shared::extractors::request_id::RequestId;
use crate::weather_api::api_error::ApiError;
use crate::weather_api::error_recorder::ErrorRecorder;

use super::errors::{Error, HandlerResult};
use super::models::RemoveCityResponse;

const LIST_HANDLER_NAME: &str = "weather_history_list";
const REMOVE_HANDLER_NAME: &str = "weather_history_remove";

/// List the search history
///
/// Returns every stored record in insertion order.
#[utoipa::path(
    get,
    path = "/weather/history",
    responses(
        (status = 200, description = "Search history", body = Vec<HistoryRecord>),
        (status = 500, description = "History could not be read", body = ApiError),
    ),
    tag = "weather",
)]
#[tracing::instrument(skip_all, name = "weather_history_list")]
pub async fn list_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> HandlerResult<(StatusCode, Json<Vec<HistoryRecord>>)> {
    let recorder =
        ErrorRecorder::new(&state.telemetry, LIST_HANDLER_NAME, &request_id);

    let records = state
        .history
        .list_history()
        .await
        .map_err(|e| recorder.record(Error::ListFailed(e)))?;

    tracing::debug!(
        records = records.len(),
        request_id = %request_id,
        "History listed",
    );

    Ok((StatusCode::OK, Json(records)))
}

/// Remove a city from the search history
#[utoipa::path(
    delete,
    path = "/weather/history/{id}",
    params(
        ("id" = String, Path, description = "History record id"),
    ),
    responses(
        (status = 200, description = "City removed", body = RemoveCityResponse),
        (status = 404, description = "No record with this id", body = ApiError),
        (status = 500, description = "History could not be updated", body = ApiError),
    ),
    tag = "weather",
)]
#[tracing::instrument(skip_all, name = "weather_history_remove")]
pub async fn remove_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    Path(id): Path<String>,
) -> HandlerResult<(StatusCode, Json<RemoveCityResponse>)> {
    tracing::info!(id = %id, request_id = %request_id, "Remove city request");

    let recorder =
        ErrorRecorder::new(&state.telemetry, REMOVE_HANDLER_NAME, &request_id);

    let removed = state
        .history
        .remove_by_id(&id)
        .await
        .map_err(|e| recorder.record(Error::RemoveFailed(e)))?;

    if !removed {
        return Err(recorder.record(Error::NotFound(id)));
    }

    Ok((StatusCode::OK, Json(RemoveCityResponse::removed())))
}
