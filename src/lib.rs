//! HTTP facade over YouTube metadata and transcript extraction.
//!
//! The server exposes a health check plus four POST endpoints that accept a
//! YouTube URL, forward the work to the transcript library and reshape the
//! result: `/video-data` (metadata), `/video-transcript-languages` (caption
//! track listing), `/video-captions` (flat caption text) and
//! `/video-timestamps` (timed caption segments). Optional Webshare proxy
//! credentials are picked up from the environment at startup.

pub mod config;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod language;
pub mod response;
pub mod video_url;
