//! HTML for the gallery page.

use crate::config::THUMBNAIL_FALLBACK;
use crate::models::{ArticleRecord, RefreshOutcome, RefreshReport};
use chrono::Local;
use std::fmt::{self, Write};

const PAGE_TITLE: &str = "日向坂46 ブログギャラリー Deluxe";

const STYLE: &str = "\
body{font-family:system-ui,Arial;margin:0;padding:18px;background:#f6f8fb}
.header{display:flex;align-items:center;justify-content:space-between;gap:12px;flex-wrap:wrap}
.btn{padding:8px 10px;border-radius:8px;border:0;background:#fff;cursor:pointer;box-shadow:0 2px 6px rgba(0,0,0,0.08)}
.btn.primary{background:linear-gradient(90deg,#ff66a3,#ff9db6);color:#fff;font-weight:700}
.report{margin:8px 0;font-size:0.9em;color:#555}
.report .failed{color:#c0392b}
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(240px,1fr));gap:14px;margin-top:14px}
.card{background:#fff;border-radius:12px;padding:12px;box-shadow:0 4px 12px rgba(0,0,0,0.08);text-align:center;border-top:4px solid var(--accent)}
.thumb{width:140px;height:140px;border-radius:50%;object-fit:cover}
.meta{color:#666;font-size:0.85em}
.excerpt{font-size:0.85em;color:#333;text-align:left}
footer{margin-top:18px;color:#999;font-size:0.8em}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn write_report(html: &mut String, report: &RefreshReport) -> fmt::Result {
    write!(html, r#"<div class="report">最終更新 {}: "#, escape_html(&report.finished_at))?;
    for (i, entry) in report.authors.iter().enumerate() {
        if i > 0 {
            html.push_str(" / ");
        }
        match &entry.outcome {
            RefreshOutcome::Updated { count } => {
                write!(html, "{} {}件", escape_html(&entry.author), count)?;
            }
            RefreshOutcome::Failed { reason } => {
                write!(
                    html,
                    r#"<span class="failed" title="{}">{} 失敗</span>"#,
                    escape_html(reason),
                    escape_html(&entry.author)
                )?;
            }
        }
    }
    writeln!(html, "</div>")
}

fn write_card(html: &mut String, article: &ArticleRecord) -> fmt::Result {
    let thumbnail = if article.thumbnail.is_empty() {
        THUMBNAIL_FALLBACK
    } else {
        article.thumbnail.as_str()
    };
    writeln!(
        html,
        r#"<div class="card" style="--accent:{}">"#,
        escape_html(&article.color)
    )?;
    writeln!(
        html,
        r#"<img src="{}" class="thumb" alt="" loading="lazy">"#,
        escape_html(thumbnail)
    )?;
    writeln!(
        html,
        r#"<div><a href="{}" target="_blank" rel="noopener">{}</a></div>"#,
        escape_html(&article.url),
        escape_html(&article.title)
    )?;
    writeln!(
        html,
        r#"<div class="meta">{}・{}</div>"#,
        escape_html(&article.date),
        escape_html(&article.author)
    )?;
    if !article.excerpt.is_empty() {
        writeln!(html, r#"<p class="excerpt">{}</p>"#, escape_html(&article.excerpt))?;
    }
    writeln!(html, "</div>")
}

/// Render the full gallery page.
pub fn gallery_page(
    articles: &[ArticleRecord],
    last_refresh: Option<&RefreshReport>,
) -> Result<String, fmt::Error> {
    let mut html = String::new();

    writeln!(html, r#"<!doctype html><html lang="ja"><head>"#)?;
    writeln!(
        html,
        r#"<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">"#
    )?;
    writeln!(html, "<title>{PAGE_TITLE}</title>")?;
    writeln!(html, "<style>\n{STYLE}\n</style></head><body>")?;

    writeln!(html, r#"<div class="header">"#)?;
    writeln!(html, "<h2>{PAGE_TITLE}</h2>")?;
    writeln!(
        html,
        r#"<form method="post" action="/update"><button class="btn primary">🔄 最新を取得</button></form>"#
    )?;
    writeln!(html, "</div>")?;

    if let Some(report) = last_refresh {
        write_report(&mut html, report)?;
    }
    writeln!(html, "<div>記事数: {}</div>", articles.len())?;

    writeln!(html, r#"<div class="grid">"#)?;
    for article in articles {
        write_card(&mut html, article)?;
    }
    writeln!(html, "</div>")?;

    writeln!(
        html,
        "<footer>{}</footer>",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(html, "</body></html>")?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthorRefresh;

    fn article(thumbnail: &str) -> ArticleRecord {
        ArticleRecord {
            date: "2024.3.5 10:30".to_string(),
            title: "<b>Hi</b> & bye".to_string(),
            url: "https://example.com/a?x=1&y=2".to_string(),
            thumbnail: thumbnail.to_string(),
            excerpt: "Hello".to_string(),
            author: "上村ひなの".to_string(),
            color: "#ff9db6".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("日本語"), "日本語");
    }

    #[test]
    fn test_page_lists_articles() {
        let html = gallery_page(&[article("https://example.com/t.jpg")], None).unwrap();
        assert!(html.contains("記事数: 1"));
        assert!(html.contains("&lt;b&gt;Hi&lt;/b&gt; &amp; bye"));
        assert!(html.contains(r#"href="https://example.com/a?x=1&amp;y=2""#));
        assert!(html.contains(r#"src="https://example.com/t.jpg""#));
        assert!(html.contains("2024.3.5 10:30・上村ひなの"));
        assert!(html.contains("--accent:#ff9db6"));
        assert!(html.contains(r#"action="/update""#));
        assert!(!html.contains("最終更新"));
    }

    #[test]
    fn test_missing_thumbnail_uses_fallback() {
        let html = gallery_page(&[article("")], None).unwrap();
        assert!(html.contains(&escape_html(THUMBNAIL_FALLBACK)));
    }

    #[test]
    fn test_page_shows_last_refresh() {
        let report = RefreshReport {
            finished_at: "2024-03-05T10:30:00+00:00".to_string(),
            authors: vec![
                AuthorRefresh {
                    author: "A".to_string(),
                    outcome: RefreshOutcome::Updated { count: 10 },
                },
                AuthorRefresh {
                    author: "B".to_string(),
                    outcome: RefreshOutcome::Failed { reason: "disk <full>".to_string() },
                },
            ],
        };
        let html = gallery_page(&[], Some(&report)).unwrap();
        assert!(html.contains("記事数: 0"));
        assert!(html.contains("A 10件"));
        assert!(html.contains(r#"title="disk &lt;full&gt;">B 失敗"#));
    }
}
