use std::path::Path;

use super::error::{ExportError, Result};
use crate::commands::scrape::models::{COLUMNS, CommentRecord, flatten};

/// Write flattened records as CSV with a header row.
pub fn write(path: &Path, records: &[CommentRecord]) -> Result<()> {
    let csv_error = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // The header is written explicitly so that an empty batch still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;
    writer.write_record(COLUMNS).map_err(csv_error)?;
    for row in flatten(records) {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
