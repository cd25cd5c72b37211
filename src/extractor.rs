//! Adapter around the upstream transcript library.
//!
//! All network traffic to the video platform goes through here, and upstream
//! failures are translated into [`ApiError`] at this boundary so the rest of
//! the crate never depends on upstream error types.

use serde::Serialize;
use tracing::debug;
use yt_transcript_rs::YouTubeTranscriptApi;
use yt_transcript_rs::proxies::GenericProxyConfig;

use crate::config::ProxyCredentials;
use crate::error::ApiError;
use crate::language::{TranscriptLanguage, select_language};
use crate::video_url::VideoId;

/// Flat metadata record for one video.
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub channel_id: String,
    pub length_seconds: String,
    pub view_count: String,
    pub short_description: String,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// One timed caption line; chronological position is given by `start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionSegment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

/// A fetched transcript together with the track it was served from.
#[derive(Debug, Clone)]
pub struct FetchedCaptions {
    pub track: TranscriptLanguage,
    pub segments: Vec<CaptionSegment>,
}

/// Client for the video platform, built once at startup and shared.
///
/// Proxy credentials are injected at construction time; request handling
/// never consults the environment.
pub struct TranscriptExtractor {
    api: YouTubeTranscriptApi,
}

impl TranscriptExtractor {
    pub fn new(proxy: Option<&ProxyCredentials>) -> Result<Self, ApiError> {
        let proxy_config = match proxy {
            Some(credentials) => {
                let url = credentials.proxy_url();
                let generic = GenericProxyConfig::new(Some(url.clone()), Some(url))
                    .map_err(|e| ApiError::Init(format!("proxy configuration rejected: {e}")))?;
                Some(Box::new(generic)
                    as Box<dyn yt_transcript_rs::proxies::ProxyConfig + Send + Sync>)
            }
            None => None,
        };

        let api = YouTubeTranscriptApi::new(None, proxy_config, None)
            .map_err(|e| ApiError::Init(e.to_string()))?;

        Ok(Self { api })
    }

    /// Fetch the metadata record for a video.
    pub async fn fetch_metadata(&self, video: &VideoId) -> Result<VideoMetadata, ApiError> {
        debug!(video_id = %video, url = %video.watch_url(), "fetching video details");

        let details = self
            .api
            .fetch_video_details(video.as_str())
            .await
            .map_err(|e| ApiError::VideoUnavailable {
                video_id: video.to_string(),
                reason: e.to_string(),
            })?;

        let thumbnails = details
            .thumbnails
            .iter()
            .map(|t| Thumbnail {
                url: t.url.clone(),
                width: t.width as u32,
                height: t.height as u32,
            })
            .collect();

        Ok(VideoMetadata {
            video_id: video.to_string(),
            title: details.title,
            author: details.author,
            channel_id: details.channel_id,
            length_seconds: details.length_seconds.to_string(),
            view_count: details.view_count,
            short_description: details.short_description,
            thumbnails,
        })
    }

    /// List the caption tracks advertised for a video.
    ///
    /// A video without any caption track reports [`ApiError::NoCaptions`].
    pub async fn list_languages(
        &self,
        video: &VideoId,
    ) -> Result<Vec<TranscriptLanguage>, ApiError> {
        debug!(video_id = %video, "listing caption tracks");

        let transcript_list = self
            .api
            .list_transcripts(video.as_str())
            .await
            .map_err(|e| ApiError::NoCaptions {
                video_id: video.to_string(),
                reason: e.to_string(),
            })?;

        let mut languages = Vec::new();
        for track in transcript_list.transcripts() {
            languages.push(TranscriptLanguage {
                code: track.language_code().to_string(),
                name: track.language().to_string(),
                is_generated: track.is_generated(),
            });
        }

        if languages.is_empty() {
            return Err(ApiError::NoCaptions {
                video_id: video.to_string(),
                reason: "the video lists no caption tracks".to_string(),
            });
        }

        Ok(languages)
    }

    /// Fetch a transcript in the best matching language.
    ///
    /// Track choice follows [`select_language`]; segments come back in
    /// whatever order the platform sent them.
    pub async fn fetch_transcript(
        &self,
        video: &VideoId,
        requested: &[String],
    ) -> Result<FetchedCaptions, ApiError> {
        let available = self.list_languages(video).await?;
        let track = select_language(&available, requested)?;

        debug!(
            video_id = %video,
            language = %track.name,
            code = %track.code,
            is_generated = track.is_generated,
            "fetching transcript"
        );

        let transcript = self
            .api
            .fetch_transcript(video.as_str(), &[track.code.as_str()], false)
            .await
            .map_err(|e| ApiError::Extraction {
                video_id: video.to_string(),
                reason: e.to_string(),
            })?;

        let segments: Vec<CaptionSegment> = transcript
            .parts()
            .iter()
            .map(|snippet| CaptionSegment {
                start: snippet.start,
                duration: snippet.duration,
                text: snippet.text.clone(),
            })
            .collect();

        Ok(FetchedCaptions {
            track: track.clone(),
            segments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_proxy() {
        assert!(TranscriptExtractor::new(None).is_ok());
    }

    #[test]
    fn builds_with_proxy_credentials() {
        let credentials = ProxyCredentials {
            username: "proxyuser".to_string(),
            password: "proxypass".to_string(),
        };
        assert!(TranscriptExtractor::new(Some(&credentials)).is_ok());
    }
}
