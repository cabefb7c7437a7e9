//! YouTube Data API v3 client for the `commentThreads` endpoint.

use std::time::Duration;

use serde::Deserialize;

use super::error::{Result, YoutubeError};

/// Largest `maxResults` value the `commentThreads` endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 100;

const COMMENT_THREADS_URL: &str = "https://www.googleapis.com/youtube/v3/commentThreads";

/// One page of a `commentThreads.list` response.
///
/// Items are kept as raw JSON; field extraction is done tolerantly by the caller.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// HTTP client for the YouTube Data API.
///
/// Holds only immutable configuration, so one instance can be shared by concurrent fetches.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl YoutubeClient {
    /// Create a client that authenticates with `api_key` and gives up on a request after `timeout`.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(YoutubeError::Client)?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: COMMENT_THREADS_URL.to_string(),
        })
    }

    /// Point the client at a different `commentThreads` endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fetch one page of comment threads (top-level comments with their first-level replies).
    pub async fn comment_threads(
        &self,
        video_id: &str,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<CommentThreadPage> {
        let max_results = max_results.min(MAX_PAGE_SIZE).to_string();
        let mut query = vec![
            ("part", "snippet,replies"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .http
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(YoutubeError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // The body is only used for diagnostics; an unreadable body is not worth a second error.
            let body = response.text().await.unwrap_or_default();
            return Err(YoutubeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            if e.is_decode() {
                YoutubeError::Payload(e)
            } else {
                YoutubeError::Transport(e)
            }
        })
    }
}
