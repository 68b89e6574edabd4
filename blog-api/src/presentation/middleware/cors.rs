use anyhow::{Result, anyhow};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::infrastructure::settings::Settings;

// The allow-list is exactly the configured web app plus local development;
// no wildcard configuration exists.
const LOCAL_DEV_ORIGIN: &str = "http://localhost:3000";

pub(crate) fn build_cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let origins = [settings.web_app_origin.as_str(), LOCAL_DEV_ORIGIN]
        .iter()
        .map(|origin| origin.parse())
        .collect::<Result<Vec<HeaderValue>, _>>()
        .map_err(|err| anyhow!("invalid CORS origin: {err}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

pub(crate) fn apply_cors(router: Router, settings: &Settings) -> Result<Router> {
    let cors = build_cors_layer(settings)?;
    Ok(router.layer(cors))
}
