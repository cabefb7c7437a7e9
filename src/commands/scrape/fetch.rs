//! Paginated comment fetching for a single video.

use std::fmt;
use std::ops::ControlFlow;

use serde_json::Value;

use super::models::{CommentRecord, ReplyLevel};
use super::normalize::{build_comment_record, lookup};
use crate::infra::youtube::{MAX_PAGE_SIZE, YoutubeClient, YoutubeError, video_id};

/// Why fetching stopped for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The per-video cap was reached.
    CapReached,
    /// The API returned no items or no continuation token.
    Exhausted,
    /// The request could not be sent or timed out.
    TransportError,
    /// The API answered with a non-success status.
    HttpError(u16),
    /// The response body could not be decoded.
    MalformedPayload,
}

impl StopReason {
    /// True if the fetch ended because something went wrong rather than running its course.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::TransportError | Self::HttpError(_) | Self::MalformedPayload
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapReached => write!(f, "cap reached"),
            Self::Exhausted => write!(f, "no more comments"),
            Self::TransportError => write!(f, "network error"),
            Self::HttpError(status) => write!(f, "HTTP {status}"),
            Self::MalformedPayload => write!(f, "malformed response"),
        }
    }
}

impl From<&YoutubeError> for StopReason {
    fn from(err: &YoutubeError) -> Self {
        match err {
            YoutubeError::Status { status, .. } => Self::HttpError(*status),
            YoutubeError::Payload(_) => Self::MalformedPayload,
            YoutubeError::Transport(_) => Self::TransportError,
            // Raised before the first request (URL parsing, client construction), never by a
            // page fetch. Should one surface mid-loop, the page could not be requested at all.
            YoutubeError::InvalidUrl(_) | YoutubeError::Client(_) => Self::TransportError,
        }
    }
}

/// Records collected for one URL, and how the collection ended.
#[derive(Debug)]
pub struct FetchOutcome {
    pub records: Vec<CommentRecord>,
    pub pages: usize,
    pub stop: StopReason,
}

/// Fetches top-level comments and their first-level replies, bounded per video.
///
/// Holds no mutable state; fetches for distinct URLs may run concurrently.
#[derive(Debug, Clone)]
pub struct CommentFetcher {
    client: YoutubeClient,
    max_per_video: usize,
}

impl CommentFetcher {
    pub fn new(client: YoutubeClient, max_per_video: usize) -> Self {
        Self {
            client,
            max_per_video,
        }
    }

    /// Fetch at most `max_per_video` records for `url`, in API order.
    ///
    /// Only an unrecognized URL is an error. Network, HTTP and payload failures end the
    /// fetch early and keep whatever was collected before them.
    pub async fn fetch_for_url(&self, url: &str) -> Result<FetchOutcome, YoutubeError> {
        let video_id =
            video_id::extract(url).ok_or_else(|| YoutubeError::InvalidUrl(url.to_string()))?;

        let cap = self.max_per_video;
        let mut records = Vec::new();
        let mut pages = 0;
        let mut page_token: Option<String> = None;

        let stop = loop {
            let remaining = cap.saturating_sub(records.len());
            if remaining == 0 {
                break StopReason::CapReached;
            }

            let page = match self
                .client
                .comment_threads(video_id, remaining.min(MAX_PAGE_SIZE), page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    tracing::error!(url, video_id, page = pages + 1, error = %err, "failed to fetch comment page");
                    break StopReason::from(&err);
                }
            };
            pages += 1;
            tracing::debug!(url, video_id, page = pages, items = page.items.len(), "fetched comment page");

            if page.items.is_empty() {
                break StopReason::Exhausted;
            }

            if collect_page(&page.items, url, cap, &mut records).is_break() {
                break StopReason::CapReached;
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break StopReason::Exhausted,
            }
        };

        tracing::debug!(url, video_id, fetched = records.len(), pages, reason = %stop, "finished fetching comments");
        Ok(FetchOutcome {
            records,
            pages,
            stop,
        })
    }
}

/// Append the records of one page, breaking as soon as `records` holds `cap` entries.
fn collect_page(
    items: &[Value],
    url: &str,
    cap: usize,
    records: &mut Vec<CommentRecord>,
) -> ControlFlow<()> {
    for item in items {
        let thread_id = lookup(item, "id").and_then(Value::as_str);

        if let Some((snippet, comment_id)) =
            lookup(item, "snippet.topLevelComment").and_then(comment_parts)
        {
            let reply_count = lookup(item, "snippet.totalReplyCount")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            push_capped(
                records,
                cap,
                build_comment_record(
                    snippet,
                    comment_id,
                    ReplyLevel::TopLevel,
                    reply_count,
                    url,
                    thread_id,
                ),
            )?;
        }

        let replies = lookup(item, "replies.comments")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for reply in replies {
            let Some((snippet, comment_id)) = comment_parts(reply) else {
                continue;
            };
            push_capped(
                records,
                cap,
                build_comment_record(snippet, comment_id, ReplyLevel::Reply, 0, url, None),
            )?;
        }
    }

    ControlFlow::Continue(())
}

fn push_capped(
    records: &mut Vec<CommentRecord>,
    cap: usize,
    record: CommentRecord,
) -> ControlFlow<()> {
    records.push(record);
    if records.len() >= cap {
        ControlFlow::Break(())
    } else {
        ControlFlow::Continue(())
    }
}

/// A comment's snippet and id, or `None` if the snippet is empty or the id is missing.
fn comment_parts(comment: &Value) -> Option<(&Value, &str)> {
    let snippet = lookup(comment, "snippet")
        .filter(|snippet| snippet.as_object().is_some_and(|fields| !fields.is_empty()))?;
    let comment_id = lookup(comment, "id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())?;
    Some((snippet, comment_id))
}
