use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{create_post, list_posts};
use crate::presentation::middleware::auth::jwt_auth_middleware;

// Both operations require a verified identity; only the role differs.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
