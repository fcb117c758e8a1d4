//! Per-author CSV storage.
//!
//! Each author owns one file. Files are UTF-8 with a leading byte-order mark
//! so spreadsheet tools pick the right encoding, and the header names are
//! the Japanese column names the files have always used:
//!
//! ```text
//! 日付,タイトル,URL,サムネイル,抜粋
//! ```
//!
//! A write always replaces the whole file; there is no append.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

const BOM: &str = "\u{feff}";

/// Column names, in file order.
pub const HEADER: [&str; 5] = ["日付", "タイトル", "URL", "サムネイル", "抜粋"];

/// One CSV row. Thumbnail and excerpt may be missing in hand-edited files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredRow {
    #[serde(rename = "日付")]
    pub date: String,
    #[serde(rename = "タイトル")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "サムネイル", default)]
    pub thumbnail: String,
    #[serde(rename = "抜粋", default)]
    pub excerpt: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io { path: path.display().to_string(), source }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        StoreError::Csv { path: path.display().to_string(), source }
    }
}

/// Read every row of `path`. A file that does not exist reads as empty.
///
/// # Arguments
///
/// * `path` - The author's CSV file
///
/// # Returns
///
/// The rows in file order, with a leading byte-order mark ignored.
///
/// # Errors
///
/// [`StoreError::Io`] if the file exists but cannot be read, and
/// [`StoreError::Csv`] if the header lacks a required column or a row does
/// not decode.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn read_all(path: &Path) -> Result<Vec<StoredRow>, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No stored records yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };
    let text = bytes.strip_prefix(BOM.as_bytes()).unwrap_or(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text);

    let mut rows = Vec::new();
    for result in reader.deserialize::<StoredRow>() {
        rows.push(result.map_err(|e| StoreError::csv(path, e))?);
    }
    debug!(count = rows.len(), "Read stored records");
    Ok(rows)
}

/// Replace the contents of `path` with `rows`, creating parent directories
/// as needed.
///
/// # Arguments
///
/// * `path` - The author's CSV file
/// * `rows` - Every record the file should hold afterwards
///
/// # Errors
///
/// [`StoreError::Csv`] if a row cannot be encoded and [`StoreError::Io`] if
/// the directory or file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = rows.len()))]
pub async fn write_all(path: &Path, rows: &[StoredRow]) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BOM.as_bytes().to_vec());

    writer
        .write_record(HEADER)
        .map_err(|e| StoreError::csv(path, e))?;
    for row in rows {
        writer
            .write_record([&row.date, &row.title, &row.url, &row.thumbnail, &row.excerpt])
            .map_err(|e| StoreError::csv(path, e))?;
    }
    let buf = writer
        .into_inner()
        .map_err(|e| StoreError::io(path, e.into_error()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(path, e))?;
        }
    }
    fs::write(path, buf).await.map_err(|e| StoreError::io(path, e))?;
    info!("Wrote stored records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> StoredRow {
        StoredRow {
            date: format!("2024.01.{:02} 12:00", n + 1),
            title: format!("タイトル {n}, with \"quotes\""),
            url: format!("https://example.com/diary/{n}"),
            thumbnail: if n % 2 == 0 {
                format!("https://example.com/img/{n}.jpg")
            } else {
                String::new()
            },
            excerpt: format!("line one\nline two {n}"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rows = read_all(&dir.path().join("nope.csv")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("author.csv");
        let rows: Vec<StoredRow> = (0..4).map(row).collect();

        write_all(&path, &rows).await.unwrap();
        let back = read_all(&path).await.unwrap();
        assert_eq!(back, rows);
    }

    #[tokio::test]
    async fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("author.csv");
        write_all(&path, &[row(0)]).await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(BOM.as_bytes()));
        let text = String::from_utf8(bytes).unwrap();
        let first_line = text.trim_start_matches(BOM).lines().next().unwrap();
        assert_eq!(first_line, "日付,タイトル,URL,サムネイル,抜粋");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("author.csv");
        write_all(&path, &[row(0), row(1), row(2)]).await.unwrap();
        write_all(&path, &[row(5)]).await.unwrap();

        let back = read_all(&path).await.unwrap();
        assert_eq!(back, vec![row(5)]);
    }

    #[tokio::test]
    async fn test_empty_write_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("author.csv");
        write_all(&path, &[]).await.unwrap();

        assert!(read_all(&path).await.unwrap().is_empty());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("日付,タイトル,URL"));
    }

    #[tokio::test]
    async fn test_optional_columns_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand_edited.csv");
        std::fs::write(&path, "日付,タイトル,URL\n2024.02.01,Hand made,https://example.com/x\n")
            .unwrap();

        let rows = read_all(&path).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Hand made");
        assert_eq!(rows[0].thumbnail, "");
        assert_eq!(rows[0].excerpt, "");
    }

    #[tokio::test]
    async fn test_missing_required_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, "foo,bar\n1,2\n").unwrap();

        let err = read_all(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Csv { .. }));
    }
}
