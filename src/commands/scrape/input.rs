//! Loading of input URL lists.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infra::youtube::video_id;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input URLs file not found at: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read input URLs file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "Invalid input URLs file {path}: expected a JSON array of URL strings or an object with a 'urls' key ({message})"
    )]
    Format { path: PathBuf, message: String },
}

/// Accepted layouts: `["url", ...]` or `{"urls": ["url", ...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputFile {
    List(Vec<String>),
    Wrapped { urls: Vec<String> },
}

/// URLs that passed validation, and how many were dropped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InputUrls {
    pub urls: Vec<String>,
    pub skipped: usize,
}

impl InputUrls {
    /// Keep only URLs a video ID can be extracted from, preserving order.
    pub fn from_candidates(candidates: impl IntoIterator<Item = String>) -> Self {
        let (urls, rejected): (Vec<String>, Vec<String>) = candidates
            .into_iter()
            .partition(|url| video_id::is_valid(url));
        Self {
            urls,
            skipped: rejected.len(),
        }
    }
}

/// Read the raw URL list from a JSON file, without validating the URLs.
pub fn read_url_file(path: &Path) -> Result<Vec<String>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InputError::NotFound(path.to_path_buf())
        } else {
            InputError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: InputFile =
        serde_json::from_str(&content).map_err(|e| InputError::Format {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(match parsed {
        InputFile::List(urls) | InputFile::Wrapped { urls } => urls,
    })
}
