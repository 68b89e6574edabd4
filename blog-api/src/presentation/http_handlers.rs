use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::{AppState, routes};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .merge(routes::router(state.clone()))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    health: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service reachable")
    )
)]
pub(crate) async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { health: "OK" })
}
