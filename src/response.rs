//! Response shaping. Pure functions, no I/O.

use serde::Serialize;

use crate::extractor::CaptionSegment;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub proxy_configured: bool,
}

/// Body of `POST /video-captions`.
#[derive(Debug, Serialize)]
pub struct CaptionsResponse {
    pub captions: String,
}

/// Body of `POST /video-timestamps`.
#[derive(Debug, Serialize)]
pub struct TimestampsResponse {
    pub timestamps: Vec<CaptionSegment>,
}

pub fn health_response(proxy_configured: bool) -> HealthResponse {
    HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        proxy_configured,
    }
}

/// Segments in chronological order, whatever order the platform sent them.
///
/// The sort is stable, so segments sharing a start offset keep their
/// relative order.
fn order_segments(mut segments: Vec<CaptionSegment>) -> Vec<CaptionSegment> {
    segments.sort_by(|a, b| a.start.total_cmp(&b.start));
    segments
}

/// Flatten a transcript into a single caption string.
///
/// Segment texts are joined with single spaces in chronological order; a
/// lone segment comes back verbatim.
pub fn captions_response(segments: Vec<CaptionSegment>) -> CaptionsResponse {
    let ordered = order_segments(segments);
    let captions = ordered
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    CaptionsResponse { captions }
}

/// Timed segments in chronological order, numeric fields untouched.
pub fn timestamps_response(segments: Vec<CaptionSegment>) -> TimestampsResponse {
    TimestampsResponse {
        timestamps: order_segments(segments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seg(start: f64, text: &str) -> CaptionSegment {
        CaptionSegment {
            start,
            duration: 1.0,
            text: text.to_string(),
        }
    }

    #[test]
    fn lone_segment_joins_to_itself() {
        let flat = "an already flat caption string";
        assert_eq!(captions_response(vec![seg(0.0, flat)]).captions, flat);
    }

    #[test]
    fn segments_join_with_single_spaces() {
        let segments = vec![seg(0.0, "never gonna"), seg(2.0, "give you up")];
        assert_eq!(
            captions_response(segments).captions,
            "never gonna give you up"
        );
    }

    #[test]
    fn captions_follow_start_order_not_input_order() {
        let segments = vec![seg(4.0, "world"), seg(0.0, "hello")];
        assert_eq!(captions_response(segments).captions, "hello world");
    }

    #[test]
    fn timestamps_are_nondecreasing_in_start() {
        let segments = vec![seg(7.5, "c"), seg(0.0, "a"), seg(3.2, "b")];
        let ordered = timestamps_response(segments).timestamps;
        let starts: Vec<f64> = ordered.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 3.2, 7.5]);
    }

    #[test]
    fn timestamps_keep_source_precision() {
        let segments = vec![CaptionSegment {
            start: 12.345,
            duration: 2.56,
            text: "line".to_string(),
        }];
        let value = serde_json::to_value(timestamps_response(segments)).unwrap();
        assert_eq!(
            value,
            json!({
                "timestamps": [{ "start": 12.345, "duration": 2.56, "text": "line" }]
            })
        );
    }

    #[test]
    fn health_reports_version_and_proxy_flag() {
        let value = serde_json::to_value(health_response(true)).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "proxy_configured": true
            })
        );
    }
}
