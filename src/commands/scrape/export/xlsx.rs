use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::error::{ExportError, Result};
use crate::commands::scrape::models::{COLUMNS, Cell, CommentRecord, flatten};

const SHEET_NAME: &str = "comments";

/// Write flattened records to a single-sheet workbook with a bold header row.
pub fn write(path: &Path, records: &[CommentRecord]) -> Result<()> {
    let xlsx_error = |source| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), records).map_err(xlsx_error)?;
    workbook.save(path).map_err(xlsx_error)
}

fn fill_sheet(sheet: &mut Worksheet, records: &[CommentRecord]) -> std::result::Result<(), XlsxError> {
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, name) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }

    for (row, flat) in (1u32..).zip(flatten(records)) {
        for (col, cell) in (0u16..).zip(flat.cells()) {
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    sheet.write_string(row, col, &*text)?;
                }
                Cell::Integer(n) => {
                    sheet.write_number(row, col, n as f64)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(row, col, b)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::scrape::models::{Author, LikeCount, ReplyLevel};
    use std::io::Read;

    #[test]
    fn writes_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let records = vec![CommentRecord {
            comment_text: None,
            author: Author::default(),
            comment_id: "c1".to_string(),
            published_time: None,
            reply_level: ReplyLevel::TopLevel,
            like_count_liked: LikeCount::Humanized("2M".to_string()),
            reply_count: 0,
            heart_active_tooltip: None,
            input_url: "https://youtu.be/abc".to_string(),
            thread_id: Some("t1".to_string()),
        }];

        write(&path, &records).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives.
        assert_eq!(&bytes[..2], b"PK");
    }

    fn archive_entry(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
        let mut xml = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    /// Attributes of the `<c>` element for `cell`, or `None` if the cell was not written.
    fn cell_attributes<'a>(sheet: &'a str, cell: &str) -> Option<&'a str> {
        let start = sheet.find(&format!("<c r=\"{cell}\""))?;
        let end = start + sheet[start..].find('>')?;
        Some(&sheet[start..end])
    }

    fn cell_value<'a>(sheet: &'a str, cell: &str) -> Option<&'a str> {
        let start = sheet.find(&format!("<c r=\"{cell}\""))?;
        let rest = &sheet[start..];
        let value = &rest[rest.find("<v>")? + 3..];
        Some(&value[..value.find("</v>")?])
    }

    #[test]
    fn sheet_has_header_row_and_typed_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let records = vec![CommentRecord {
            comment_text: None,
            author: Author {
                is_verified: true,
                ..Author::default()
            },
            comment_id: "c1".to_string(),
            published_time: None,
            reply_level: ReplyLevel::Reply,
            like_count_liked: LikeCount::Count(42),
            reply_count: 3,
            heart_active_tooltip: None,
            input_url: "https://youtu.be/abc".to_string(),
            thread_id: None,
        }];

        write(&path, &records).unwrap();

        let strings = archive_entry(&path, "xl/sharedStrings.xml");
        let texts: Vec<&str> = lazy_regex::regex!(r"<t[^>]*>([^<]*)</t>")
            .captures_iter(&strings)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();
        assert_eq!(&texts[..COLUMNS.len()], COLUMNS.as_slice());

        let sheet = archive_entry(&path, "xl/worksheets/sheet1.xml");
        // commentText is absent, so A2 stays blank.
        assert_eq!(cell_attributes(&sheet, "A2"), None);
        // replyLevel, likeCountLiked and replyCount are numbers.
        for (cell, expected) in [("D2", "1"), ("E2", "42"), ("F2", "3")] {
            assert!(!cell_attributes(&sheet, cell).unwrap().contains("t="), "{cell}");
            assert_eq!(cell_value(&sheet, cell), Some(expected), "{cell}");
        }
        // author.isVerified is a boolean.
        assert!(cell_attributes(&sheet, "M2").unwrap().contains(r#"t="b""#));
        assert_eq!(cell_value(&sheet, "M2"), Some("1"));
        // commentId is a string.
        assert!(cell_attributes(&sheet, "B2").unwrap().contains(r#"t="s""#));
    }

    #[test]
    fn missing_directory_is_an_xlsx_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");

        let err = write(&path, &[]).unwrap_err();

        assert!(matches!(err, ExportError::Xlsx { .. }));
    }
}
