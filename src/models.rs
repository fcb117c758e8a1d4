//! Data models shared by the scraper, the store and the web layer.
//!
//! - [`ArticleRecord`]: one scraped blog post, tagged with its author
//! - [`RefreshReport`]: per-author outcome of a refresh run

use crate::config::Author;
use crate::date_key::DateKey;
use crate::store::StoredRow;
use serde::{Deserialize, Serialize};

/// A single blog post as shown in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Publication date exactly as the site printed it.
    pub date: String,
    pub title: String,
    /// Absolute URL of the article page.
    pub url: String,
    /// Absolute URL of the first inline image, or empty.
    pub thumbnail: String,
    /// At most 180 characters of body text.
    pub excerpt: String,
    pub author: String,
    pub color: String,
}

impl ArticleRecord {
    pub fn date_key(&self) -> DateKey {
        DateKey::parse(&self.date)
    }

    /// Rebuild a record from a stored row. Author fields always come from
    /// `author`, never from the file.
    pub fn from_row(row: StoredRow, author: &Author) -> Self {
        Self {
            date: row.date,
            title: row.title,
            url: row.url,
            thumbnail: row.thumbnail,
            excerpt: row.excerpt,
            author: author.name.clone(),
            color: author.color.clone(),
        }
    }

    pub fn to_row(&self) -> StoredRow {
        StoredRow {
            date: self.date.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            thumbnail: self.thumbnail.clone(),
            excerpt: self.excerpt.clone(),
        }
    }
}

/// How one author's refresh ended.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Updated { count: usize },
    Failed { reason: String },
}

impl RefreshOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorRefresh {
    pub author: String,
    #[serde(flatten)]
    pub outcome: RefreshOutcome,
}

/// Outcomes of a full refresh, in author declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefreshReport {
    /// RFC 3339 timestamp of when the run finished.
    pub finished_at: String,
    pub authors: Vec<AuthorRefresh>,
}

impl RefreshReport {
    pub fn total_written(&self) -> usize {
        self.authors
            .iter()
            .map(|a| match a.outcome {
                RefreshOutcome::Updated { count } => count,
                RefreshOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> usize {
        self.authors.iter().filter(|a| !a.outcome.is_ok()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author::new("Test Author", 7, "test.csv", "#123456")
    }

    #[test]
    fn test_from_row_takes_author_fields_from_config() {
        let row = StoredRow {
            date: "2024.03.05 10:30".to_string(),
            title: "Hello".to_string(),
            url: "https://example.com/a/1".to_string(),
            thumbnail: String::new(),
            excerpt: "Body".to_string(),
        };
        let record = ArticleRecord::from_row(row.clone(), &author());
        assert_eq!(record.author, "Test Author");
        assert_eq!(record.color, "#123456");
        assert_eq!(record.to_row(), row);
        assert_eq!(record.date_key(), DateKey([2024, 3, 5, 10, 30]));
    }

    #[test]
    fn test_refresh_outcome_serialization() {
        let entry = AuthorRefresh {
            author: "A".to_string(),
            outcome: RefreshOutcome::Updated { count: 4 },
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"author":"A","status":"updated","count":4}"#);

        let failed: AuthorRefresh =
            serde_json::from_str(r#"{"author":"B","status":"failed","reason":"disk full"}"#)
                .unwrap();
        assert_eq!(
            failed.outcome,
            RefreshOutcome::Failed { reason: "disk full".to_string() }
        );
    }

    #[test]
    fn test_report_totals() {
        let report = RefreshReport {
            finished_at: "2024-01-01T00:00:00Z".to_string(),
            authors: vec![
                AuthorRefresh {
                    author: "A".to_string(),
                    outcome: RefreshOutcome::Updated { count: 3 },
                },
                AuthorRefresh {
                    author: "B".to_string(),
                    outcome: RefreshOutcome::Failed { reason: "x".to_string() },
                },
                AuthorRefresh {
                    author: "C".to_string(),
                    outcome: RefreshOutcome::Updated { count: 10 },
                },
            ],
        };
        assert_eq!(report.total_written(), 13);
        assert_eq!(report.failures(), 1);
    }
}
