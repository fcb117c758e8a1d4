//! Re-scraping authors and overwriting their stored records.
//!
//! A refresh walks an author's listing pages in order, fetches each linked
//! detail page one at a time with a fixed pause in between, and stops at the
//! page limit, at the first empty or failing listing page, or once the
//! article cap is reached. Whatever was collected then replaces the author's
//! file.
//!
//! [`Refresher::refresh_all`] runs every configured author in declaration
//! order. One author failing never stops the others; the outcome of each is
//! reported in a [`RefreshReport`].

use crate::config::{Author, GalleryConfig};
use crate::models::{ArticleRecord, AuthorRefresh, RefreshOutcome, RefreshReport};
use crate::scrapers::extract::{detail_links, extract_article};
use crate::scrapers::markup::{BlogMarkup, SiteMarkup};
use crate::scrapers::Fetcher;
use crate::store::{self, StoreError, StoredRow};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("could not build listing URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("could not store records: {0}")]
    Store(#[from] StoreError),
}

/// Drives refreshes with an injected fetcher and markup adapter.
#[derive(Debug)]
pub struct Refresher<F, M = SiteMarkup> {
    config: Arc<GalleryConfig>,
    fetcher: F,
    markup: M,
}

impl<F: Fetcher> Refresher<F, SiteMarkup> {
    pub fn new(config: Arc<GalleryConfig>, fetcher: F) -> Self {
        Self::with_markup(config, fetcher, SiteMarkup)
    }
}

impl<F: Fetcher, M: BlogMarkup> Refresher<F, M> {
    pub fn with_markup(config: Arc<GalleryConfig>, fetcher: F, markup: M) -> Self {
        Self { config, fetcher, markup }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Refresh every configured author, one after another.
    #[instrument(level = "info", skip_all, fields(authors = self.config.authors.len()))]
    pub async fn refresh_all(&self) -> RefreshReport {
        let mut authors = Vec::with_capacity(self.config.authors.len());

        for author in &self.config.authors {
            let outcome = match self.refresh_author(author).await {
                Ok(count) => RefreshOutcome::Updated { count },
                Err(e) => {
                    error!(author = %author.name, error = %e, "Author refresh failed");
                    RefreshOutcome::Failed { reason: e.to_string() }
                }
            };
            authors.push(AuthorRefresh { author: author.name.clone(), outcome });
        }

        let report = RefreshReport {
            finished_at: Utc::now().to_rfc3339(),
            authors,
        };
        info!(
            written = report.total_written(),
            failed = report.failures(),
            "Refresh complete"
        );
        report
    }

    /// Re-scrape one author and overwrite its stored records.
    ///
    /// Listing and detail fetch failures are logged and skipped, never
    /// propagated.
    ///
    /// # Arguments
    ///
    /// * `author` - The author whose listing pages are walked
    ///
    /// # Returns
    ///
    /// The number of records written, at most the configured article cap.
    ///
    /// # Errors
    ///
    /// [`RefreshError::Url`] if a listing URL cannot be built and
    /// [`RefreshError::Store`] if the author's file cannot be written.
    #[instrument(
        level = "info",
        skip_all,
        fields(author = %author.name, category = author.category)
    )]
    pub async fn refresh_author(&self, author: &Author) -> Result<usize, RefreshError> {
        let records = self.collect_articles(author).await?;
        let rows: Vec<StoredRow> = records.iter().map(ArticleRecord::to_row).collect();
        store::write_all(&author.storage, &rows).await?;
        info!(count = rows.len(), "Author refreshed");
        Ok(rows.len())
    }

    async fn collect_articles(&self, author: &Author) -> Result<Vec<ArticleRecord>, RefreshError> {
        let config = &self.config;
        let mut records = Vec::new();
        let mut fetched_any = false;
        let mut page = 0;

        'pages: while config.page_allowed(page) {
            let listing_url = config.listing_url(author, page)?;
            let listing = match self.fetcher.fetch_text(&listing_url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(page, error = %e, "Listing fetch failed; ending pagination");
                    break;
                }
            };

            let links = detail_links(&self.markup, &listing, &config.base_url);
            if links.is_empty() {
                debug!(page, "Listing page has no articles; ending pagination");
                break;
            }
            debug!(page, links = links.len(), "Indexed listing page");

            for link in links {
                if records.len() >= config.max_articles {
                    break 'pages;
                }
                if fetched_any && !config.fetch_delay.is_zero() {
                    sleep(config.fetch_delay).await;
                }
                fetched_any = true;

                let body = match self.fetcher.fetch_text(&link).await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!(url = %link, error = %e, "Article fetch failed; skipping");
                        continue;
                    }
                };
                match extract_article(&self.markup, &body, &link, author) {
                    Some(record) => records.push(record),
                    None => warn!(url = %link, "Page has no article regions; skipping"),
                }
            }

            if records.len() >= config.max_articles {
                break;
            }
            page += 1;
        }

        Ok(records)
    }
}
