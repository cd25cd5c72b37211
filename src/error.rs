//! Error taxonomy and its mapping onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use validator::ValidationError;

/// Everything that can go wrong while serving a request.
///
/// URL problems are client mistakes (4xx). Failures from the extraction
/// library are not split into distinct status codes: video-unavailable,
/// missing captions, unavailable languages and transport errors all surface
/// as 500 with a human-readable message, and callers retry if they want to.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Video {video_id} is unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("No captions found for video {video_id}: {reason}")]
    NoCaptions { video_id: String, reason: String },

    #[error(
        "None of the requested caption languages {requested:?} are available; available languages: {available:?}"
    )]
    LanguageNotAvailable {
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("Error fetching transcript for video {video_id}: {reason}")]
    Extraction { video_id: String, reason: String },

    #[error("Extraction client setup failed: {0}")]
    Init(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::VideoUnavailable { .. }
            | ApiError::NoCaptions { .. }
            | ApiError::LanguageNotAvailable { .. }
            | ApiError::Extraction { .. }
            | ApiError::Init(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let detail = err
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string());
        ApiError::InvalidUrl(detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, "{detail}");
        } else {
            tracing::warn!(%status, "{detail}");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn url_errors_map_to_bad_request() {
        assert_eq!(ApiError::MissingUrl.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidUrl(String::from("nope")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn malformed_body_maps_to_unprocessable_entity() {
        assert_eq!(
            ApiError::MalformedBody(String::from("expected value")).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn extraction_failures_map_to_internal_server_error() {
        let errors = [
            ApiError::VideoUnavailable {
                video_id: String::from("dQw4w9WgXcQ"),
                reason: String::from("private video"),
            },
            ApiError::NoCaptions {
                video_id: String::from("dQw4w9WgXcQ"),
                reason: String::from("captions disabled"),
            },
            ApiError::LanguageNotAvailable {
                requested: vec![String::from("xx")],
                available: vec![String::from("en")],
            },
            ApiError::Extraction {
                video_id: String::from("dQw4w9WgXcQ"),
                reason: String::from("connection reset"),
            },
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn language_error_names_requested_and_available_codes() {
        let err = ApiError::LanguageNotAvailable {
            requested: vec![String::from("xx")],
            available: vec![String::from("en"), String::from("de")],
        };
        let message = err.to_string();
        assert!(message.contains("xx"));
        assert!(message.contains("en"));
        assert!(message.contains("de"));
    }

    #[test]
    fn validation_error_message_wins_over_code() {
        let mut err = ValidationError::new("invalid_characters");
        err.message = Some("video_id contains invalid characters".into());
        let api_err = ApiError::from(err);
        assert_eq!(
            api_err.to_string(),
            "Invalid YouTube URL: video_id contains invalid characters"
        );
    }

    #[test]
    fn validation_error_falls_back_to_code() {
        let err = ValidationError::new("no id found");
        let api_err = ApiError::from(err);
        assert_eq!(api_err.to_string(), "Invalid YouTube URL: no id found");
    }

    #[tokio::test]
    async fn response_body_carries_detail_field() {
        let resp = ApiError::MissingUrl.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "No URL provided");
    }
}
