//! Text normalization and file system helpers.
//!
//! - Whitespace collapsing and excerpt truncation for scraped text
//! - String truncation for log fields
//! - Data directory validation at startup

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Longest excerpt kept, counted in characters.
pub const EXCERPT_MAX_CHARS: usize = 180;

/// Window an over-long excerpt is cut back to before the ellipsis goes on.
pub const EXCERPT_CUT_CHARS: usize = 177;

pub const ELLIPSIS: char = '…';

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace (including full-width spaces and
/// newlines) to a single ASCII space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Cap `text` at [`EXCERPT_MAX_CHARS`].
///
/// Longer text is cut to its first [`EXCERPT_CUT_CHARS`] characters, then
/// back to the last whitespace inside that window if there is one, and gets
/// a single `…` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_excerpt("short"), "short");
/// assert!(truncate_excerpt(&"word ".repeat(60)).ends_with("word…"));
/// ```
pub fn truncate_excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_MAX_CHARS {
        return text.to_string();
    }
    let window: String = text.chars().take(EXCERPT_CUT_CHARS).collect();
    let cut = match window.rfind(char::is_whitespace) {
        Some(idx) => &window[..idx],
        None => window.as_str(),
    };
    format!("{}{}", cut, ELLIPSIS)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the number
/// of dropped characters appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", head, total - max)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Data directory is writable");
    Ok(())
}
