use axum::Json;
use axum::http::StatusCode;
use axum::response::{ IntoResponse, Response };
use log::error;
use serde::Serialize;
use thiserror::Error;

/// Error kinds surfaced by the HTTP endpoints. Every handler failure flows
/// through this enum so the status-code mapping lives in one place.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is missing a required payload. The message is
    /// caller-caused and safe to echo back.
    #[error("{0}")]
    InvalidInput(String),

    /// A provider call failed or returned an unusable result. The detail is
    /// logged server-side; the caller only sees a generic message.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(detail) => {
                error!("Upstream failure: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "AI provider request failed".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn invalid_input_maps_to_400_and_echoes_message() {
        let resp = ApiError::InvalidInput("No audio file provided".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "No audio file provided");
    }

    #[tokio::test]
    async fn upstream_maps_to_500_with_generic_body() {
        let resp = ApiError::Upstream("secret provider detail".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "AI provider request failed");
        // the detail must not leak into the response
        assert!(!json["error"].as_str().unwrap().contains("secret"));
    }
}
