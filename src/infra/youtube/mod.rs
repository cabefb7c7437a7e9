//! YouTube Data API module.
//!
//! Provides the `commentThreads` client and video ID extraction from URLs.

mod client;
pub(crate) mod error;
#[cfg(test)]
pub mod mock;
pub mod video_id;

pub use client::{CommentThreadPage, MAX_PAGE_SIZE, YoutubeClient};
pub use error::YoutubeError;
