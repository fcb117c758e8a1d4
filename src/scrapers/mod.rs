//! Fetching and parsing of the blog site.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Listing**: a listing page per author yields links to detail pages
//! 2. **Detail**: each detail page is fetched and turned into an
//!    [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! Network access goes through the [`Fetcher`] trait and everything that
//! knows about the site's markup sits behind
//! [`BlogMarkup`](markup::BlogMarkup), so the refresh loop can be driven by
//! in-memory pages in tests.

pub mod extract;
pub mod markup;

use reqwest::{Client, StatusCode};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of page bodies.
///
/// Implementations return the body text of a successful response and an
/// error for anything else, including non-2xx statuses.
pub trait Fetcher {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
///
/// No timeout and no retry are configured: a failed page is simply skipped
/// by the caller.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("blog_gallery/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport { url: url.to_string(), source };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status });
        }
        let body = response.text().await.map_err(transport)?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
