use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::error::{ExportError, Result};
use crate::commands::scrape::models::CommentRecord;

/// Write records as a pretty-printed JSON array, keeping the nested author object.
pub fn write(path: &Path, records: &[CommentRecord]) -> Result<()> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_error)
}
