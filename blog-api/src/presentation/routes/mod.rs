use axum::Router;

use super::AppState;

pub(crate) mod blog;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new().nest("/api/blog", blog::router(state))
}
