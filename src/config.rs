//! Static site and author configuration.
//!
//! The author list is fixed at build time. It is wrapped together with the
//! runtime knobs from the CLI into one immutable [`GalleryConfig`] value that
//! is handed to the refresher and the gallery loader, so tests can build
//! their own synthetic author sets.

use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Root of the blog site being scraped.
pub const BASE_URL: &str = "https://www.hinatazaka46.com";

/// Shown on cards whose article had no inline image.
pub const THUMBNAIL_FALLBACK: &str = "https://placehold.co/300x300?text=No+Image";

/// Hard cap on articles fetched by a single author refresh.
pub const MAX_ARTICLES_PER_REFRESH: usize = 10;

/// One blog author whose listing pages are scraped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Display name, usually not ASCII.
    pub name: String,
    /// Category id the site uses to filter the listing (`ct=` parameter).
    pub category: u32,
    /// CSV file holding this author's records.
    pub storage: PathBuf,
    /// CSS color used to accent this author's cards.
    pub color: String,
}

impl Author {
    pub fn new(name: &str, category: u32, storage: impl Into<PathBuf>, color: &str) -> Self {
        Self {
            name: name.to_string(),
            category,
            storage: storage.into(),
            color: color.to_string(),
        }
    }
}

/// The authors shown in the gallery, with storage files placed under `data_dir`.
pub fn default_authors(data_dir: &Path) -> Vec<Author> {
    vec![
        Author::new("上村ひなの", 21, data_dir.join("hinano_blog_list.csv"), "#ff9db6"),
        Author::new("正源司陽子", 29, data_dir.join("shogenji_blog_list.csv"), "#8fc8ff"),
        Author::new("藤嶌果歩", 33, data_dir.join("fujishima_blog_list.csv"), "#ffd38f"),
    ]
}

/// Everything the refresher and the gallery loader need to know.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub base_url: Url,
    pub authors: Vec<Author>,
    /// Listing pages to walk per author. `0` disables the page limit.
    pub max_pages: u32,
    /// Pause between two detail-page fetches.
    pub fetch_delay: Duration,
    pub max_articles: usize,
}

impl GalleryConfig {
    pub fn new(base_url: Url, authors: Vec<Author>) -> Self {
        Self {
            base_url,
            authors,
            max_pages: 1,
            fetch_delay: Duration::from_millis(300),
            max_articles: MAX_ARTICLES_PER_REFRESH,
        }
    }

    /// The production configuration rooted at `data_dir`.
    pub fn from_data_dir(data_dir: &Path) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(BASE_URL)?, default_authors(data_dir)))
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Listing page `page` (zero based) for one author's category.
    pub fn listing_url(&self, author: &Author, page: u32) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join("/s/official/diary/member/list")?;
        url.query_pairs_mut()
            .append_pair("ct", &author.category.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// Whether pagination should continue to `page`.
    pub fn page_allowed(&self, page: u32) -> bool {
        self.max_pages == 0 || page < self.max_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_authors_are_rooted_in_data_dir() {
        let authors = default_authors(Path::new("/srv/gallery"));
        assert_eq!(authors.len(), 3);
        assert_eq!(authors[0].name, "上村ひなの");
        assert_eq!(authors[0].category, 21);
        assert_eq!(
            authors[2].storage,
            PathBuf::from("/srv/gallery/fujishima_blog_list.csv")
        );
    }

    #[test]
    fn test_listing_url() {
        let config = GalleryConfig::from_data_dir(Path::new(".")).unwrap();
        let url = config.listing_url(&config.authors[1], 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.hinatazaka46.com/s/official/diary/member/list?ct=29&page=2"
        );
    }

    #[test]
    fn test_page_limit() {
        let config = GalleryConfig::from_data_dir(Path::new(".")).unwrap();
        assert!(config.page_allowed(0));
        assert!(!config.page_allowed(1));

        let unlimited = config.with_max_pages(0);
        assert!(unlimited.page_allowed(500));
    }

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::from_data_dir(Path::new(".")).unwrap();
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.fetch_delay, Duration::from_millis(300));
        assert_eq!(config.max_articles, 10);
    }
}
