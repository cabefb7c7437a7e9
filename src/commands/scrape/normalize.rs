//! Conversion of raw API comment snippets into [`CommentRecord`]s.
//!
//! Everything here is total: missing or oddly-typed fields become absent values
//! instead of errors.

use serde_json::Value;

use super::models::{Author, CommentRecord, LikeCount, ReplyLevel};

/// Marker emitted when the viewer rating suggests the creator reacted to a comment.
///
/// The API has no field for creator hearts, so this is a best-effort signal only.
pub const HEART_TOOLTIP: &str = "Creator reacted";

const LIKE_COUNT_SUFFIXES: [(i64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

/// Follow a dot-separated `path` through nested JSON objects.
///
/// Returns `None` as soon as a segment is missing or the current value is not an
/// object. A `null` at the end of the path also counts as missing.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.as_object()?.get(key))
        .filter(|found| !found.is_null())
}

/// Build a record from a comment snippet.
///
/// `thread_id` is recorded only when it is non-empty.
pub fn build_comment_record(
    snippet: &Value,
    comment_id: &str,
    reply_level: ReplyLevel,
    reply_count: u64,
    input_url: &str,
    thread_id: Option<&str>,
) -> CommentRecord {
    let author = Author {
        channel_id: string_at(snippet, "authorChannelId.value"),
        display_name: string_at(snippet, "authorDisplayName"),
        avatar_thumbnail_url: string_at(snippet, "authorProfileImageUrl"),
        is_verified: lookup(snippet, "authorChannelIsVerified").is_some_and(is_truthy),
    };

    CommentRecord {
        comment_text: first_non_empty(snippet, "textDisplay", "textOriginal"),
        author,
        comment_id: comment_id.to_string(),
        published_time: first_non_empty(snippet, "publishedAt", "updatedAt"),
        reply_level,
        like_count_liked: format_like_count(lookup(snippet, "likeCount")),
        reply_count,
        heart_active_tooltip: heart_tooltip(snippet).map(str::to_string),
        input_url: input_url.to_string(),
        thread_id: thread_id.filter(|id| !id.is_empty()).map(str::to_string),
    }
}

/// Compact a like count: `1500` becomes `"1.5K"`, `2_000_000` becomes `"2M"`.
///
/// Counts below 1000 stay integers. Values that cannot be read as an integer are
/// passed through unchanged.
pub fn format_like_count(value: Option<&Value>) -> LikeCount {
    let Some(count) = value.and_then(coerce_integer) else {
        return LikeCount::Raw(value.cloned().unwrap_or(Value::Null));
    };

    LIKE_COUNT_SUFFIXES
        .iter()
        .find(|(threshold, _)| count >= *threshold)
        .map_or(LikeCount::Count(count), |(threshold, suffix)| {
            let scaled = format!("{:.1}", count as f64 / *threshold as f64);
            let scaled = scaled.strip_suffix(".0").unwrap_or(&scaled);
            LikeCount::Humanized(format!("{scaled}{suffix}"))
        })
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn heart_tooltip(snippet: &Value) -> Option<&'static str> {
    lookup(snippet, "viewerRating")
        .and_then(Value::as_str)
        .filter(|rating| !rating.is_empty() && !rating.eq_ignore_ascii_case("none"))
        .map(|_| HEART_TOOLTIP)
}

fn string_at(snippet: &Value, path: &str) -> Option<String> {
    lookup(snippet, path)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `preferred` unless it is missing or empty, otherwise `fallback`.
fn first_non_empty(snippet: &Value, preferred: &str, fallback: &str) -> Option<String> {
    lookup(snippet, preferred)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| lookup(snippet, fallback).and_then(Value::as_str))
        .map(str::to_string)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
