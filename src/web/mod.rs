//! HTTP front end.
//!
//! | Route | Method | Behavior |
//! |-------|--------|----------|
//! | `/` | GET | gallery page built from stored records, no fetching |
//! | `/update` | POST | refresh every author, then redirect to `/` |
//! | `/api/articles` | GET | the merged feed as JSON |
//! | `/api/refresh` | GET | report of the last refresh, or `null` |
//!
//! Refreshes are serialized behind one lock. Page views never wait on a
//! running refresh; they see the last finished report.

pub mod render;

use crate::gallery;
use crate::models::{ArticleRecord, RefreshReport};
use crate::refresh::Refresher;
use crate::scrapers::Fetcher;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, instrument};

/// State shared across handlers.
pub struct AppState<F> {
    refresher: Arc<Refresher<F>>,
    refresh_lock: Arc<Mutex<()>>,
    last_refresh: Arc<RwLock<Option<RefreshReport>>>,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            refresher: Arc::clone(&self.refresher),
            refresh_lock: Arc::clone(&self.refresh_lock),
            last_refresh: Arc::clone(&self.last_refresh),
        }
    }
}

impl<F: Fetcher> AppState<F> {
    pub fn new(refresher: Refresher<F>) -> Self {
        Self {
            refresher: Arc::new(refresher),
            refresh_lock: Arc::new(Mutex::new(())),
            last_refresh: Arc::new(RwLock::new(None)),
        }
    }
}

pub fn router<F>(state: AppState<F>) -> Router
where
    F: Fetcher + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<F>))
        .route("/update", post(update::<F>))
        .route("/api/articles", get(articles::<F>))
        .route("/api/refresh", get(last_refresh::<F>))
        .with_state(state)
}

#[instrument(level = "info", skip_all)]
async fn index<F: Fetcher>(State(state): State<AppState<F>>) -> Response {
    let articles = gallery::load_all(state.refresher.config()).await;
    let report = state.last_refresh.read().await.clone();

    match render::gallery_page(&articles, report.as_ref()) {
        Ok(page) => {
            info!(count = articles.len(), "Rendered gallery");
            Html(page).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to render gallery");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn update<F: Fetcher>(State(state): State<AppState<F>>) -> Redirect {
    let _running = state.refresh_lock.lock().await;
    let report = state.refresher.refresh_all().await;
    *state.last_refresh.write().await = Some(report);
    Redirect::to("/")
}

async fn articles<F: Fetcher>(State(state): State<AppState<F>>) -> Json<Vec<ArticleRecord>> {
    Json(gallery::load_all(state.refresher.config()).await)
}

async fn last_refresh<F: Fetcher>(State(state): State<AppState<F>>) -> Json<Option<RefreshReport>> {
    Json(state.last_refresh.read().await.clone())
}
