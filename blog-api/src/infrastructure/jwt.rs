use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) username: String,
    pub(crate) role: String,
    pub(crate) iss: String,
    pub(crate) exp: i64,
}

// Verify-only in the request path; tokens are minted by the gateway with the
// shared secret, with the gateway domain as issuer.
pub(crate) struct JwtService {
    secret: String,
    issuer: String,
}

impl JwtService {
    pub(crate) fn new(secret: &str, issuer: &str) -> Self {
        JwtService {
            secret: secret.into(),
            issuer: issuer.into(),
        }
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }

    #[cfg(test)]
    pub(crate) fn generate_token(&self, username: &str, role: &str, ttl_seconds: i64) -> String {
        use chrono::{Duration, Utc};
        use jsonwebtoken::{EncodingKey, Header, encode};

        let claims = Claims {
            username: username.into(),
            role: role.into(),
            iss: self.issuer.clone(),
            exp: (Utc::now() + Duration::seconds(ttl_seconds)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .expect("token encode failed")
    }
}
