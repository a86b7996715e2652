use axum::Router;

pub(crate) mod api_error;
pub(crate) mod error_recorder;
pub(crate) mod weather;

pub fn get_routes(state: crate::AppState) -> Router {
    weather::get_routes(state)
}
