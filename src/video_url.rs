//! YouTube URL parsing and video id validation.

use std::fmt;

use validator::ValidationError;

/// A validated YouTube video identifier.
///
/// Only [`parse_video_url`] constructs one, so holding a `VideoId` means the
/// id already passed length and character validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    fn parse(candidate: &str) -> Result<VideoId, ValidationError> {
        validate_video_id(candidate)?;
        Ok(VideoId(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this id.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_video_id(video_id: &str) -> Result<(), ValidationError> {
    if video_id.len() != 11 {
        return Err(ValidationError::new(
            "video id must be exactly 11 characters",
        ));
    }

    let invalid_chars: Vec<char> = video_id
        .chars()
        .filter(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
        .collect();

    if !invalid_chars.is_empty() {
        let mut error = ValidationError::new("invalid_characters");
        error.message =
            Some(format!("video id contains invalid characters: {:?}", invalid_chars).into());
        return Err(error);
    }

    Ok(())
}

/// Extract the video id from any accepted YouTube URL shape.
///
/// Accepted: `youtube.com/watch?v=ID` (any parameter order), `youtu.be/ID`,
/// and the path forms `embed/ID`, `v/ID` and `shorts/ID`. Everything else,
/// including bare ids, is rejected.
pub fn parse_video_url(raw: &str) -> Result<VideoId, ValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ValidationError::new("empty URL"));
    }

    // Full URL: https://www.youtube.com/watch?v=VIDEO_ID
    if let Some((_, query)) = url.split_once("youtube.com/watch") {
        let query = query.trim_start_matches(['/', '?']);
        for pair in query.split('&') {
            if let Some(id) = pair.strip_prefix("v=") {
                return VideoId::parse(leading_segment(id));
            }
        }
        return Err(ValidationError::new(
            "invalid YouTube URL: watch URL has no v parameter",
        ));
    }

    // Short URL: https://youtu.be/VIDEO_ID
    if let Some((_, rest)) = url.split_once("youtu.be/") {
        return VideoId::parse(leading_segment(rest));
    }

    // Path forms: /embed/VIDEO_ID, /v/VIDEO_ID, /shorts/VIDEO_ID
    for marker in ["youtube.com/embed/", "youtube.com/v/", "youtube.com/shorts/"] {
        if let Some((_, rest)) = url.split_once(marker) {
            return VideoId::parse(leading_segment(rest));
        }
    }

    Err(ValidationError::new(
        "invalid YouTube URL: must be a youtube.com or youtu.be video URL",
    ))
}

/// Everything up to the next query, fragment or path separator.
fn leading_segment(rest: &str) -> &str {
    rest.split(['?', '&', '/', '#']).next().unwrap_or(rest)
}
