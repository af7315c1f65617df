//! CSV report-inventory preview for the configure screen.
//!
//! The wizard accepts an optional CSV of report metadata; we show the row
//! count plus the first few rows so the operator can sanity-check the file
//! before wiring up a live connection.

use std::path::Path;

use thiserror::Error;

/// How many data rows the preview keeps.
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no header row")]
    Empty { path: String },
}

/// A truncated view of an uploaded CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Total data rows in the file, not just the previewed ones.
    pub total_rows: usize,
}

impl UploadPreview {
    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }
}

/// Read a CSV file and produce a preview of its header and first rows.
pub fn preview_csv(path: &Path) -> Result<UploadPreview, UploadError> {
    let display = path.display().to_string();

    let file = std::fs::File::open(path).map_err(|source| UploadError::Io {
        path: display.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| UploadError::Csv {
            path: display.clone(),
            source,
        })?
        .iter()
        .map(str::to_owned)
        .collect();

    if headers.is_empty() {
        return Err(UploadError::Empty { path: display });
    }

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for record in reader.records() {
        let record = record.map_err(|source| UploadError::Csv {
            path: display.clone(),
            source,
        })?;
        total_rows += 1;
        if rows.len() < PREVIEW_ROWS {
            rows.push(record.iter().map(str::to_owned).collect());
        }
    }

    Ok(UploadPreview {
        headers,
        rows,
        total_rows,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn preview_small_file_keeps_every_row() {
        let file = write_csv("name,owner\nSales Q1,alice\nChurn,bob\n");

        let preview = preview_csv(file.path()).unwrap();

        assert_eq!(preview.headers, vec!["name", "owner"]);
        assert_eq!(preview.total_rows, 2);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[0], vec!["Sales Q1", "alice"]);
        assert!(!preview.is_truncated());
    }

    #[test]
    fn preview_truncates_but_counts_all_rows() {
        let mut contents = String::from("id\n");
        for i in 0..40 {
            contents.push_str(&format!("{i}\n"));
        }
        let file = write_csv(&contents);

        let preview = preview_csv(file.path()).unwrap();

        assert_eq!(preview.total_rows, 40);
        assert_eq!(preview.rows.len(), PREVIEW_ROWS);
        assert!(preview.is_truncated());
    }

    #[test]
    fn header_only_file_previews_zero_rows() {
        let file = write_csv("report,workbook,site\n");

        let preview = preview_csv(file.path()).unwrap();

        assert_eq!(preview.headers.len(), 3);
        assert_eq!(preview.total_rows, 0);
        assert!(preview.rows.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = preview_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let file = write_csv("a,b,c\n1,2,3\n4,5\n");

        let preview = preview_csv(file.path()).unwrap();

        assert_eq!(preview.total_rows, 2);
        assert_eq!(preview.rows[1], vec!["4", "5"]);
    }
}
