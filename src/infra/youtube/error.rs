//! YouTube Data API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum YoutubeError {
    #[error("Invalid YouTube URL, could not extract video ID: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Network error while calling YouTube API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("YouTube API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed YouTube API response: {0}")]
    Payload(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, YoutubeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_display() {
        let err = YoutubeError::InvalidUrl("https://example.com".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid YouTube URL, could not extract video ID: https://example.com"
        );
    }

    #[test]
    fn status_display_includes_code_and_body() {
        let err = YoutubeError::Status {
            status: 403,
            body: "quotaExceeded".to_string(),
        };
        assert_eq!(err.to_string(), "YouTube API error (HTTP 403): quotaExceeded");
    }
}
