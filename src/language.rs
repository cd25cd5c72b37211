//! Transcript track metadata and language selection.

use serde::Serialize;

use crate::error::ApiError;

/// Default language when the caller expresses no preference.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One caption track as listed for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLanguage {
    pub code: String,
    pub name: String,
    pub is_generated: bool,
}

/// Pick the caption track to fetch.
///
/// With no requested languages this prefers [`DEFAULT_LANGUAGE`] and falls
/// back to the first listed track. Otherwise the first requested code that
/// matches an available track wins; codes compare case-insensitively and the
/// canonical track from the listing is returned. A request that matches
/// nothing is an error rather than a silent fallback, so callers never get a
/// transcript in a language they did not ask for.
pub fn select_language<'a>(
    available: &'a [TranscriptLanguage],
    requested: &[String],
) -> Result<&'a TranscriptLanguage, ApiError> {
    if requested.is_empty() {
        let default = available
            .iter()
            .find(|track| track.code.eq_ignore_ascii_case(DEFAULT_LANGUAGE));
        if let Some(track) = default.or_else(|| available.first()) {
            return Ok(track);
        }
    } else {
        for code in requested {
            let found = available
                .iter()
                .find(|track| track.code.eq_ignore_ascii_case(code));
            if let Some(track) = found {
                return Ok(track);
            }
        }
    }

    Err(ApiError::LanguageNotAvailable {
        requested: requested.to_vec(),
        available: available.iter().map(|track| track.code.clone()).collect(),
    })
}
