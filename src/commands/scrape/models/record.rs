use serde::{Serialize, Serializer};
use serde_json::Value;

/// A normalized comment or first-level reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub comment_text: Option<String>,
    pub author: Author,
    pub comment_id: String,
    pub published_time: Option<String>,
    pub reply_level: ReplyLevel,
    pub like_count_liked: LikeCount,
    pub reply_count: u64,
    pub heart_active_tooltip: Option<String>,
    pub input_url: String,
    /// Only set on top-level comments; the key is left out entirely for replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub channel_id: Option<String>,
    pub display_name: Option<String>,
    pub avatar_thumbnail_url: Option<String>,
    pub is_verified: bool,
}

/// Depth of a comment within its thread. Serialized as `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyLevel {
    TopLevel,
    Reply,
}

impl ReplyLevel {
    pub fn depth(self) -> u8 {
        match self {
            Self::TopLevel => 0,
            Self::Reply => 1,
        }
    }
}

impl Serialize for ReplyLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.depth())
    }
}

/// Like count as exported: the raw integer below 1000, a compact string above,
/// or the API value untouched when it is not an integer.
#[derive(Debug, Clone, PartialEq)]
pub enum LikeCount {
    Count(i64),
    Humanized(String),
    Raw(Value),
}

impl Serialize for LikeCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_i64(*n),
            Self::Humanized(s) => serializer.serialize_str(s),
            Self::Raw(value) => value.serialize(serializer),
        }
    }
}
