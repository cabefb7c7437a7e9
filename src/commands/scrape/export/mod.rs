//! Output sinks for scraped comments.
//!
//! JSON keeps the nested record shape; CSV and XLSX use the flattened rows.

mod csv;
mod error;
mod json;
mod xlsx;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub use error::{ExportError, Result};

use super::models::CommentRecord;

/// File name (without extension) shared by every output format.
pub const BASE_FILENAME: &str = "youtube_comments";

type WriteFn = fn(&Path, &[CommentRecord]) -> Result<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputFormat {
    Json,
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// Parse a format tag case-insensitively. `xls` is treated as `xlsx`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    fn writer(self) -> WriteFn {
        match self {
            Self::Json => json::write,
            Self::Csv => csv::write,
            Self::Xlsx => xlsx::write,
        }
    }
}

/// Resolve format tags into a set of formats. Unknown tags are ignored.
pub fn parse_formats<S: AsRef<str>>(tags: &[S]) -> BTreeSet<OutputFormat> {
    tags.iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            let format = OutputFormat::from_tag(tag);
            if format.is_none() {
                tracing::debug!(format = tag, "ignoring unknown output format");
            }
            format
        })
        .collect()
}

/// Write `records` in every requested format to `<output_dir>/<base_filename>.<ext>`.
///
/// Creates `output_dir` if needed. Returns the written paths in format order.
pub fn export_all(
    output_dir: &Path,
    base_filename: &str,
    records: &[CommentRecord],
    formats: &BTreeSet<OutputFormat>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = output_dir.join(format!("{base_filename}.{}", format.extension()));
        tracing::debug!(count = records.len(), path = %path.display(), "exporting comments");
        (format.writer())(&path, records)?;
        written.push(path);
    }

    tracing::info!(
        formats = %formats.iter().map(|f| f.extension()).collect::<Vec<_>>().join(", "),
        base_filename,
        "exported comments"
    );
    Ok(written)
}
