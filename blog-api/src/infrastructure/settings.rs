use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) gcp_project_id: String,
    pub(crate) firestore_collection: String,
    pub(crate) firestore_emulator_host: Option<String>,
    pub(crate) web_app_origin: String,
    pub(crate) gateway_domain: String,
    pub(crate) jwt_secret: String,
    pub(crate) http_addr: String,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let gcp_project_id = get_required("GCP_PROJECT_ID").context("GCP_PROJECT_ID is required")?;
        let firestore_collection =
            std::env::var("FIRESTORE_COLLECTION").unwrap_or_else(|_| "test-blog".to_string());
        let firestore_emulator_host = std::env::var("FIRESTORE_EMULATOR_HOST")
            .ok()
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty());

        let web_app_origin = get_required("WEB_APP_ORIGIN").context("WEB_APP_ORIGIN is required")?;
        let gateway_domain = get_required("GATEWAY_DOMAIN").context("GATEWAY_DOMAIN is required")?;

        let jwt_secret = get_required("JWT_SECRET").context("JWT_SECRET is required")?;
        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        // The managed runtime injects PORT; HTTP_ADDR wins when both are set.
        let http_addr = match std::env::var("HTTP_ADDR") {
            Ok(addr) => addr,
            Err(_) => {
                let port: u16 = std::env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Failed to parse PORT, expecting integer port")?;
                format!("0.0.0.0:{port}")
            }
        };

        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;

        Ok(Self {
            gcp_project_id,
            firestore_collection,
            firestore_emulator_host,
            web_app_origin,
            gateway_domain,
            jwt_secret,
            http_addr,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
