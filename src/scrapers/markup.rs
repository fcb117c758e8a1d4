//! Knowledge of the blog site's HTML structure.
//!
//! The site marks the interesting parts of its pages with fixed CSS classes:
//!
//! | Page | Selector | Content |
//! |------|----------|---------|
//! | Listing | `a.c-button-blog-detail` | link to a detail page |
//! | Detail | `div.c-blog-article__title` | title |
//! | Detail | `div.c-blog-article__date` | publication date |
//! | Detail | `div.c-blog-article__text` | body, may hold images |
//!
//! If the site changes its markup, only [`SiteMarkup`] needs to change.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static DETAIL_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.c-button-blog-detail").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.c-blog-article__title").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.c-blog-article__date").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.c-blog-article__text").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Locates the structural regions of listing and detail pages.
pub trait BlogMarkup {
    /// Raw `href` values of the detail links on a listing page, in
    /// document order.
    fn extract_detail_links(&self, listing: &Html) -> Vec<String>;

    fn extract_title<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>>;

    fn extract_date<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>>;

    fn extract_body<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>>;

    /// Raw `src` of the first image inside a body region. An image without
    /// a usable `src` counts as no image.
    fn extract_first_image(&self, body: ElementRef<'_>) -> Option<String>;
}

/// Markup of the official member blog.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteMarkup;

impl BlogMarkup for SiteMarkup {
    fn extract_detail_links(&self, listing: &Html) -> Vec<String> {
        listing
            .select(&DETAIL_LINK)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect()
    }

    fn extract_title<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&TITLE).next()
    }

    fn extract_date<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&DATE).next()
    }

    fn extract_body<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&BODY).next()
    }

    fn extract_first_image(&self, body: ElementRef<'_>) -> Option<String> {
        body.select(&IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(str::to_string)
    }
}
