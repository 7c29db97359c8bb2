use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::screening::{FailureKind, ScreeningFailure};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The ranking service rejected or failed the call. Message is user-facing.
    #[error("Ranking service error: {0}")]
    RankingService(String),

    /// The ranking service answered with something that is not a ranking list.
    #[error("Ranking response error: {0}")]
    RankingResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ScreeningFailure> for AppError {
    fn from(failure: ScreeningFailure) -> Self {
        match failure.kind {
            FailureKind::Validation => AppError::Validation(failure.message),
            FailureKind::Service => AppError::RankingService(failure.message),
            FailureKind::Parse => AppError::RankingResponse(failure.message),
            FailureKind::Interrupted => AppError::Internal(anyhow::anyhow!(failure.message)),
        }
    }
}

/// Malformed or mistyped JSON bodies keep the API's error envelope.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RankingService(msg) => {
                tracing::debug!("Ranking service error: {msg}");
                (StatusCode::BAD_GATEWAY, "RANKING_SERVICE_ERROR", msg.clone())
            }
            AppError::RankingResponse(msg) => {
                tracing::debug!("Ranking response error: {msg}");
                (StatusCode::BAD_GATEWAY, "RANKING_RESPONSE_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_maps_to_bad_request() {
        let failure = ScreeningFailure::new(FailureKind::Validation, "both fields");
        let response = AppError::from(failure).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_service_and_parse_failures_map_to_bad_gateway() {
        let service = AppError::from(ScreeningFailure::new(FailureKind::Service, "quota"));
        let parse = AppError::from(ScreeningFailure::new(FailureKind::Parse, "garbled"));
        assert_eq!(service.into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(parse.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_ranking_failure_body_keeps_message() {
        let response = AppError::RankingService("quota".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "RANKING_SERVICE_ERROR");
        assert_eq!(body["error"]["message"], "quota");
    }

    #[test]
    fn test_interrupted_failure_maps_to_internal_error() {
        let failure = ScreeningFailure::new(FailureKind::Interrupted, "panicked");
        let response = AppError::from(failure).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
