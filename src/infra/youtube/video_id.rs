//! Video ID extraction from YouTube URLs.
//!
//! Supported shapes:
//! - `youtube.com/watch?v=ID`
//! - `youtu.be/ID`
//! - `youtube.com/shorts/ID`
//! - `youtube.com/live/ID`
//!
//! The scheme and `www.` prefix are optional. Patterns are searched anywhere in the
//! input, so surrounding text or trailing query parameters do not prevent a match.

use lazy_regex::regex_captures;

/// Extract the video ID from a supported YouTube URL.
///
/// Returns `None` when the input does not contain any recognized URL shape.
///
/// # Examples
/// ```ignore
/// assert_eq!(extract("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract("https://example.com"), None);
/// ```
pub fn extract(url: &str) -> Option<&str> {
    let video_id = watch(url)
        .or_else(|| short_link(url))
        .or_else(|| shorts(url))
        .or_else(|| live(url));

    match video_id {
        Some(id) => tracing::debug!(video_id = id, url, "extracted video id"),
        None => tracing::debug!(url, "could not extract video id"),
    }

    video_id
}

/// Returns true if a video ID can be extracted from `url`.
pub fn is_valid(url: &str) -> bool {
    extract(url).is_some()
}

fn watch(url: &str) -> Option<&str> {
    regex_captures!(r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([^&/?#]+)", url)
        .map(|(_, id)| id)
}

fn short_link(url: &str) -> Option<&str> {
    regex_captures!(r"(?:https?://)?youtu\.be/([^&/?#]+)", url).map(|(_, id)| id)
}

fn shorts(url: &str) -> Option<&str> {
    regex_captures!(r"(?:https?://)?(?:www\.)?youtube\.com/shorts/([^&/?#]+)", url)
        .map(|(_, id)| id)
}

fn live(url: &str) -> Option<&str> {
    regex_captures!(r"(?:https?://)?(?:www\.)?youtube\.com/live/([^&/?#]+)", url)
        .map(|(_, id)| id)
}
