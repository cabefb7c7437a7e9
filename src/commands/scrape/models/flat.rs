//! Flat row form of [`CommentRecord`] for CSV and spreadsheet output.
//!
//! The nested author becomes four `author.*` columns. Every row carries the same
//! column set, with absent values as empty cells.

use std::borrow::Cow;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::record::{CommentRecord, LikeCount, ReplyLevel};

/// Column names, in output order.
pub const COLUMNS: [&str; 13] = [
    "commentText",
    "commentId",
    "publishedTime",
    "replyLevel",
    "likeCountLiked",
    "replyCount",
    "heartActiveTooltip",
    "inputUrl",
    "threadId",
    "author.channelId",
    "author.displayName",
    "author.avatarThumbnailUrl",
    "author.isVerified",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow {
    #[serde(rename = "commentText")]
    pub comment_text: Option<String>,
    #[serde(rename = "commentId")]
    pub comment_id: String,
    #[serde(rename = "publishedTime")]
    pub published_time: Option<String>,
    #[serde(rename = "replyLevel")]
    pub reply_level: ReplyLevel,
    #[serde(rename = "likeCountLiked", serialize_with = "serialize_like_count_cell")]
    pub like_count_liked: LikeCount,
    #[serde(rename = "replyCount")]
    pub reply_count: u64,
    #[serde(rename = "heartActiveTooltip")]
    pub heart_active_tooltip: Option<String>,
    #[serde(rename = "inputUrl")]
    pub input_url: String,
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
    #[serde(rename = "author.channelId")]
    pub author_channel_id: Option<String>,
    #[serde(rename = "author.displayName")]
    pub author_display_name: Option<String>,
    #[serde(rename = "author.avatarThumbnailUrl")]
    pub author_avatar_thumbnail_url: Option<String>,
    #[serde(rename = "author.isVerified")]
    pub author_is_verified: bool,
}

/// A single typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Empty,
    Text(Cow<'a, str>),
    Integer(i64),
    Bool(bool),
}

impl<'a> Cell<'a> {
    fn text(value: &'a Option<String>) -> Self {
        value
            .as_deref()
            .map_or(Cell::Empty, |s| Cell::Text(Cow::Borrowed(s)))
    }
}

impl From<&CommentRecord> for FlatRow {
    fn from(record: &CommentRecord) -> Self {
        let author = &record.author;
        Self {
            comment_text: record.comment_text.clone(),
            comment_id: record.comment_id.clone(),
            published_time: record.published_time.clone(),
            reply_level: record.reply_level,
            like_count_liked: record.like_count_liked.clone(),
            reply_count: record.reply_count,
            heart_active_tooltip: record.heart_active_tooltip.clone(),
            input_url: record.input_url.clone(),
            thread_id: record.thread_id.clone(),
            author_channel_id: author.channel_id.clone(),
            author_display_name: author.display_name.clone(),
            author_avatar_thumbnail_url: author.avatar_thumbnail_url.clone(),
            author_is_verified: author.is_verified,
        }
    }
}

impl FlatRow {
    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [Cell<'_>; COLUMNS.len()] {
        [
            Cell::text(&self.comment_text),
            Cell::Text(Cow::Borrowed(&self.comment_id)),
            Cell::text(&self.published_time),
            Cell::Integer(i64::from(self.reply_level.depth())),
            like_count_cell(&self.like_count_liked),
            Cell::Integer(i64::try_from(self.reply_count).unwrap_or(i64::MAX)),
            Cell::text(&self.heart_active_tooltip),
            Cell::Text(Cow::Borrowed(&self.input_url)),
            Cell::text(&self.thread_id),
            Cell::text(&self.author_channel_id),
            Cell::text(&self.author_display_name),
            Cell::text(&self.author_avatar_thumbnail_url),
            Cell::Bool(self.author_is_verified),
        ]
    }
}

fn like_count_cell(like_count: &LikeCount) -> Cell<'_> {
    match like_count {
        LikeCount::Count(n) => Cell::Integer(*n),
        LikeCount::Humanized(s) => Cell::Text(Cow::Borrowed(s)),
        LikeCount::Raw(Value::Null) => Cell::Empty,
        LikeCount::Raw(Value::Bool(b)) => Cell::Bool(*b),
        LikeCount::Raw(Value::String(s)) => Cell::Text(Cow::Borrowed(s)),
        LikeCount::Raw(other) => Cell::Text(Cow::Owned(other.to_string())),
    }
}

/// Tabular sinks hold scalars only, so the like count is written the way its cell reads.
fn serialize_like_count_cell<S: Serializer>(
    like_count: &LikeCount,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match like_count_cell(like_count) {
        Cell::Empty => serializer.serialize_none(),
        Cell::Text(text) => serializer.serialize_str(&text),
        Cell::Integer(n) => serializer.serialize_i64(n),
        Cell::Bool(b) => serializer.serialize_bool(b),
    }
}

/// Flatten records into uniform rows, preserving order.
pub fn flatten(records: &[CommentRecord]) -> Vec<FlatRow> {
    records.iter().map(FlatRow::from).collect()
}
