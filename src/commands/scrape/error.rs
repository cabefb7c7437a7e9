use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("YouTube API key is not set (use youtubeApiKey in settings.json or YTCOMMENTS_API_KEY)")]
    MissingApiKey,

    #[error("No input given: pass video URLs or --input <FILE>")]
    NoInput,

    #[error("No valid YouTube URLs to process ({skipped} skipped)")]
    NoValidUrls { skipped: usize },
}
