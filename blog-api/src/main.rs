use std::sync::Arc;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::blog_service::BlogService;
use data::stores::firestore::post_store::FirestorePostStore;
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let store = Arc::new(FirestorePostStore::new(&settings)?);
    let blog_service = Arc::new(BlogService::new(store));
    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        &settings.gateway_domain,
    ));
    let state = AppState::new(blog_service, jwt);

    server::run_http(&settings, state).await
}
