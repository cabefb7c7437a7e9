//! wiremock-based YouTube Data API mock server for testing.
//!
//! ```ignore
//! let mock = YoutubeMockServer::start().await;
//!
//! mock.page(None)
//!     .threads((0..3).map(|i| mock_thread(&format!("t{i}"), 2)))
//!     .next_page("page-2")
//!     .mount()
//!     .await;
//! mock.page(Some("page-2")).fail_with_status(500).await;
//!
//! let client = mock.client();
//! ```

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::YoutubeClient;

/// Request timeout used by clients created through [`YoutubeMockServer::client`].
pub const MOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// Build a comment snippet as returned by the API.
pub fn mock_snippet(text: &str) -> Value {
    json!({
        "textDisplay": text,
        "textOriginal": text,
        "authorDisplayName": "@tester",
        "authorProfileImageUrl": "https://yt3.ggpht.com/avatar.jpg",
        "authorChannelId": {"value": "UC_tester"},
        "likeCount": 3,
        "publishedAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z",
        "viewerRating": "none"
    })
}

/// Build a comment thread item with `reply_count` first-level replies.
///
/// Comment IDs are derived from the thread ID: `<thread>` for the top-level comment and
/// `<thread>.r<n>` for replies.
pub fn mock_thread(thread_id: &str, reply_count: usize) -> Value {
    let replies: Vec<Value> = (0..reply_count)
        .map(|n| {
            json!({
                "id": format!("{thread_id}.r{n}"),
                "snippet": mock_snippet(&format!("reply {n} to {thread_id}")),
            })
        })
        .collect();

    let mut item = json!({
        "id": thread_id,
        "snippet": {
            "topLevelComment": {
                "id": thread_id,
                "snippet": mock_snippet(&format!("comment {thread_id}")),
            },
            "totalReplyCount": reply_count,
        },
    });
    if reply_count > 0 {
        item["replies"] = json!({ "comments": replies });
    }
    item
}

pub struct YoutubeMockServer {
    server: MockServer,
}

impl YoutubeMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// A client pointed at this server, with a short timeout.
    pub fn client(&self) -> YoutubeClient {
        YoutubeClient::new("test-key", MOCK_TIMEOUT)
            .unwrap()
            .with_endpoint(self.server.uri())
    }

    /// Start describing the page served for `page_token` (`None` for the first page).
    pub fn page(&self, page_token: Option<&str>) -> PageBuilder<'_> {
        PageBuilder {
            server: &self.server,
            page_token: page_token.map(str::to_string),
            video_id: None,
            items: Vec::new(),
            next_page_token: None,
        }
    }

    /// The `pageToken` of every request received so far, in order.
    pub async fn requested_page_tokens(&self) -> Vec<Option<String>> {
        self.query_values("pageToken").await
    }

    /// The `maxResults` of every request received so far, in order.
    pub async fn requested_page_sizes(&self) -> Vec<Option<String>> {
        self.query_values("maxResults").await
    }

    async fn query_values(&self, key: &str) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }
}

pub struct PageBuilder<'a> {
    server: &'a MockServer,
    page_token: Option<String>,
    video_id: Option<String>,
    items: Vec<Value>,
    next_page_token: Option<String>,
}

impl PageBuilder<'_> {
    /// Only answer requests for this video.
    pub fn video(mut self, video_id: &str) -> Self {
        self.video_id = Some(video_id.to_string());
        self
    }

    pub fn thread(mut self, item: Value) -> Self {
        self.items.push(item);
        self
    }

    pub fn threads(mut self, items: impl IntoIterator<Item = Value>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn next_page(mut self, token: &str) -> Self {
        self.next_page_token = Some(token.to_string());
        self
    }

    /// Serve the page as a successful JSON response.
    pub async fn mount(self) {
        let mut body = json!({ "items": self.items });
        if let Some(token) = &self.next_page_token {
            body["nextPageToken"] = json!(token);
        }
        self.respond(ResponseTemplate::new(200).set_body_json(body))
            .await;
    }

    /// Answer with an error status.
    pub async fn fail_with_status(self, status: u16) {
        self.respond(ResponseTemplate::new(status).set_body_string("backend error"))
            .await;
    }

    /// Answer too late for the client's timeout.
    pub async fn time_out(self) {
        self.respond(ResponseTemplate::new(200).set_delay(MOCK_TIMEOUT * 4))
            .await;
    }

    /// Answer with a body that is not JSON.
    pub async fn malformed(self) {
        self.respond(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .await;
    }

    async fn respond(self, template: ResponseTemplate) {
        let mut mock = Mock::given(method("GET"));
        mock = match &self.page_token {
            Some(token) => mock.and(query_param("pageToken", token.as_str())),
            None => mock.and(query_param_is_missing("pageToken")),
        };
        if let Some(video_id) = &self.video_id {
            mock = mock.and(query_param("videoId", video_id.as_str()));
        }
        mock.respond_with(template).mount(self.server).await;
    }
}
