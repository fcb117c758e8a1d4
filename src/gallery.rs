//! The merged, newest-first feed shown on the gallery page.

use crate::config::GalleryConfig;
use crate::models::ArticleRecord;
use crate::store;
use itertools::Itertools;
use std::cmp::Reverse;
use tracing::{debug, instrument, warn};

/// Load every author's stored records and merge them into one feed,
/// newest first.
///
/// Authors are read in declaration order and the sort is stable, so
/// records with equal dates keep author order, then file order. An author
/// whose file cannot be read contributes nothing.
///
/// # Arguments
///
/// * `config` - Supplies the authors and their storage paths
///
/// # Returns
///
/// Every stored record tagged with its author's name and color.
#[instrument(level = "debug", skip_all, fields(authors = config.authors.len()))]
pub async fn load_all(config: &GalleryConfig) -> Vec<ArticleRecord> {
    let mut records = Vec::new();

    for author in &config.authors {
        match store::read_all(&author.storage).await {
            Ok(rows) => {
                debug!(author = %author.name, count = rows.len(), "Loaded author records");
                records.extend(rows.into_iter().map(|row| ArticleRecord::from_row(row, author)));
            }
            Err(e) => {
                warn!(author = %author.name, error = %e, "Unreadable author records; skipping");
            }
        }
    }

    records
        .into_iter()
        .sorted_by_key(|r| Reverse(r.date_key()))
        .collect()
}
