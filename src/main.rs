//! # Blog Gallery
//!
//! Scrapes the latest posts of a fixed set of member blogs, keeps one CSV
//! file per author, and serves all of them as a single newest-first gallery.
//!
//! ## Usage
//!
//! ```sh
//! blog_gallery --data-dir ./data            # serve on $PORT (default 5000)
//! blog_gallery --data-dir ./data refresh    # one-shot refresh
//! ```
//!
//! ## Architecture
//!
//! 1. **Refresh**: walk each author's listing pages, fetch article pages one
//!    at a time, and overwrite that author's CSV file
//! 2. **Gallery**: read every CSV file, merge, and sort newest first
//! 3. **Web**: render the gallery and expose the refresh trigger

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod date_key;
mod gallery;
mod models;
mod refresh;
mod scrapers;
mod store;
mod utils;
mod web;

use cli::{Cli, Command};
use config::GalleryConfig;
use refresh::Refresher;
use scrapers::HttpFetcher;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    ensure_writable_dir(&args.data_dir).await?;

    let config = GalleryConfig::from_data_dir(&args.data_dir)?
        .with_max_pages(args.max_pages)
        .with_fetch_delay(args.fetch_delay());
    info!(
        authors = config.authors.len(),
        max_pages = config.max_pages,
        delay_ms = args.delay_ms,
        "Loaded configuration"
    );
    let refresher = Refresher::new(Arc::new(config), HttpFetcher::new()?);

    match args.command() {
        Command::Refresh => {
            let start_time = std::time::Instant::now();
            let report = refresher.refresh_all().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            let elapsed = start_time.elapsed();
            info!(?elapsed, written = report.total_written(), "Refresh finished");
        }
        Command::Serve => {
            let addr = args.listen_addr()?;
            let app = web::router(web::AppState::new(refresher));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, "Gallery listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
