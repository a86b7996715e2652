use axum::Router;

pub mod add;
pub mod history;

pub fn get_routes(state: crate::AppState) -> Router {
    Router::new()
        .route("/", axum::routing::post(add::handler::handler))
        .route("/history", axum::routing::get(history::handler::list_handler))
        .route(
            "/history/{id}",
            axum::routing::delete(history::handler::remove_handler),
        )
        .with_state(state)
}
