//! Turning parsed pages into [`ArticleRecord`]s.

use crate::config::Author;
use crate::models::ArticleRecord;
use crate::scrapers::markup::BlogMarkup;
use crate::utils::{collapse_whitespace, truncate_excerpt, truncate_for_log};
use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

/// Whitespace-collapsed text of an element.
fn region_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Body text with text nodes joined by single spaces.
fn body_text(el: ElementRef<'_>) -> String {
    let joined = el
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&joined)
}

/// Resolve the detail links of a listing page against `base`.
///
/// Links that cannot be resolved are dropped with a warning.
pub fn detail_links<M: BlogMarkup + ?Sized>(markup: &M, html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    markup
        .extract_detail_links(&document)
        .into_iter()
        .filter_map(|href| match base.join(&href) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(%href, error = %e, "Unresolvable detail link");
                None
            }
        })
        .collect()
}

/// Build a record from one detail page.
///
/// Missing regions leave their fields empty. A page with none of the
/// title, date and body regions is not an article and yields `None`.
pub fn extract_article<M: BlogMarkup + ?Sized>(
    markup: &M,
    html: &str,
    url: &Url,
    author: &Author,
) -> Option<ArticleRecord> {
    let document = Html::parse_document(html);

    let title = markup.extract_title(&document);
    let date = markup.extract_date(&document);
    let body = markup.extract_body(&document);

    if title.is_none() && date.is_none() && body.is_none() {
        return None;
    }

    let thumbnail = body
        .and_then(|b| markup.extract_first_image(b))
        .and_then(|src| match url.join(&src) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                warn!(%src, error = %e, "Unresolvable thumbnail");
                None
            }
        })
        .unwrap_or_default();

    let record = ArticleRecord {
        date: date.map(region_text).unwrap_or_default(),
        title: title.map(region_text).unwrap_or_default(),
        url: url.to_string(),
        thumbnail,
        excerpt: body
            .map(|b| truncate_excerpt(&body_text(b)))
            .unwrap_or_default(),
        author: author.name.clone(),
        color: author.color.clone(),
    };
    debug!(
        title = %truncate_for_log(&record.title, 40),
        date = %record.date,
        has_thumbnail = !record.thumbnail.is_empty(),
        "Extracted article"
    );
    Some(record)
}
