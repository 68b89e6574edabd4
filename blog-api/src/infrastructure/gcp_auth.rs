use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

// Ambient service-account credentials of the managed runtime.
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

// Refresh slightly before the token actually expires.
const EXPIRY_LEEWAY_SECS: i64 = 60;

#[derive(Debug, Error)]
pub(crate) enum GcpAuthError {
    #[error("metadata token request failed")]
    Request(#[source] reqwest::Error),
}

pub(crate) struct MetadataTokenProvider {
    client: Client,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
    expires_in: i64,
}

impl MetadataTokenProvider {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            token_url: METADATA_TOKEN_URL.to_string(),
            cached: Mutex::new(None),
        }
    }

    pub(crate) async fn access_token(&self) -> Result<String, GcpAuthError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && token.expires_at > Utc::now()
        {
            return Ok(token.access_token.clone());
        }

        let response = self
            .client
            .get(&self.token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(GcpAuthError::Request)?
            .error_for_status()
            .map_err(GcpAuthError::Request)?;

        let body: MetadataTokenResponse =
            response.json().await.map_err(GcpAuthError::Request)?;

        let expires_at =
            Utc::now() + Duration::seconds((body.expires_in - EXPIRY_LEEWAY_SECS).max(0));
        let token = CachedToken {
            access_token: body.access_token,
            expires_at,
        };
        *cached = Some(token.clone());

        Ok(token.access_token)
    }
}
