use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

// Responses carry a bare status code; the cause stays in the log so backend
// detail never reaches the caller.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Domain(err) => match err {
                DomainError::Validation { .. } => {
                    warn!("{err}");
                    StatusCode::BAD_REQUEST
                }
                DomainError::Forbidden => StatusCode::FORBIDDEN,
                DomainError::Store(_) => {
                    error!("{err}");
                    StatusCode::BAD_REQUEST
                }
            },
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::AppError;
    use crate::domain::error::DomainError;

    #[test]
    fn validation_maps_to_400() {
        let response = AppError::Domain(DomainError::Validation {
            field: "title",
            message: "must be present and non-empty",
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = AppError::Domain(DomainError::Forbidden).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_failure_maps_to_400() {
        let response =
            AppError::Domain(DomainError::Store("unreachable".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
