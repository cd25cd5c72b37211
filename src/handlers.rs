//! HTTP surface: shared state, routing and the request handlers.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::extractor::{TranscriptExtractor, VideoMetadata};
use crate::language::TranscriptLanguage;
use crate::response::{self, CaptionsResponse, HealthResponse, TimestampsResponse};
use crate::video_url::{VideoId, parse_video_url};

/// Upper bound on extraction calls running at once.
const MAX_CONCURRENT_FETCHES: usize = 32;

/// Per-process state handed to every handler.
///
/// Built once at startup; nothing in here mutates afterwards.
#[derive(Clone)]
pub struct AppState {
    extractor: Arc<TranscriptExtractor>,
    fetch_slots: Arc<Semaphore>,
    proxy_configured: bool,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let extractor = TranscriptExtractor::new(config.proxy.as_ref())?;
        Ok(Self {
            extractor: Arc::new(extractor),
            fetch_slots: Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES)),
            proxy_configured: config.proxy.is_some(),
        })
    }
}

/// Request body accepted by every POST endpoint.
#[derive(Debug, Deserialize)]
struct VideoRequest {
    url: Option<String>,
    languages: Option<Vec<String>>,
}

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/video-data", post(video_data))
        .route(
            "/video-transcript-languages",
            post(video_transcript_languages),
        )
        .route("/video-captions", post(video_captions))
        .route("/video-timestamps", post(video_timestamps))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Pull the validated video reference and language preference out of a body.
///
/// A body that failed JSON parsing is a 422; a missing or blank `url` is
/// a 400.
fn parse_request(
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<(VideoId, Vec<String>), ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

    let url = match request.url.as_deref() {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Err(ApiError::MissingUrl),
    };

    let video = parse_video_url(url)?;
    Ok((video, request.languages.unwrap_or_default()))
}

/// Run one extraction call on a background task, holding a fetch slot.
///
/// The call is spawned rather than awaited inline, so a client hanging up
/// mid-request does not cancel an in-flight upstream fetch.
async fn offload<T, F>(state: &AppState, fetch: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let permit = state
        .fetch_slots
        .clone()
        .acquire_owned()
        .await
        .map_err(|e| ApiError::Internal(format!("fetch slots unavailable: {e}")))?;

    let task = tokio::spawn(async move {
        let _permit = permit;
        fetch.await
    });

    task.await
        .map_err(|e| ApiError::Internal(format!("background fetch failed: {e}")))?
}

/// `GET /health`
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(response::health_response(state.proxy_configured))
}

/// `POST /video-data`
async fn video_data(
    State(state): State<AppState>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<VideoMetadata>, ApiError> {
    let (video, _) = parse_request(body)?;
    info!(video_id = %video, "video data requested");

    let extractor = state.extractor.clone();
    let data = offload(&state, async move { extractor.fetch_metadata(&video).await }).await?;
    Ok(Json(data))
}

/// `POST /video-transcript-languages`
async fn video_transcript_languages(
    State(state): State<AppState>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<Vec<TranscriptLanguage>>, ApiError> {
    let (video, _) = parse_request(body)?;
    info!(video_id = %video, "transcript languages requested");

    let extractor = state.extractor.clone();
    let tracks = offload(&state, async move { extractor.list_languages(&video).await }).await?;
    Ok(Json(tracks))
}

/// `POST /video-captions`
async fn video_captions(
    State(state): State<AppState>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<CaptionsResponse>, ApiError> {
    let (video, languages) = parse_request(body)?;
    info!(video_id = %video, requested = ?languages, "captions requested");

    let extractor = state.extractor.clone();
    let fetched = offload(&state, async move {
        extractor.fetch_transcript(&video, &languages).await
    })
    .await?;

    info!(
        code = %fetched.track.code,
        segments = fetched.segments.len(),
        "captions fetched"
    );
    Ok(Json(response::captions_response(fetched.segments)))
}

/// `POST /video-timestamps`
async fn video_timestamps(
    State(state): State<AppState>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<TimestampsResponse>, ApiError> {
    let (video, languages) = parse_request(body)?;
    info!(video_id = %video, requested = ?languages, "timestamps requested");

    let extractor = state.extractor.clone();
    let fetched = offload(&state, async move {
        extractor.fetch_transcript(&video, &languages).await
    })
    .await?;

    info!(
        code = %fetched.track.code,
        segments = fetched.segments.len(),
        "timestamps fetched"
    );
    Ok(Json(response::timestamps_response(fetched.segments)))
}
