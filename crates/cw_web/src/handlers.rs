use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

use cw_core::{FeedsResponse, NewsResponse};

use crate::AppState;

/// GET /api/news: the aggregated, rewritten, deduplicated article list.
/// Partial source failures are invisible here; only a total failure produces
/// the error envelope.
pub async fn get_news(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.aggregator.aggregate().await {
        Ok(articles) => {
            let message = if articles.is_empty() {
                Some("No crime news articles found".to_string())
            } else {
                None
            };
            (StatusCode::OK, Json(NewsResponse::ok(articles, message)))
        }
        Err(e) => {
            tracing::error!(error = %e, "news aggregation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(NewsResponse::failure("Failed to fetch crime news")),
            )
        }
    }
}

/// GET /api/feeds: department press releases grouped per source, no rewrite
/// pass. Failed pages just drop out of the grouping.
pub async fn get_feeds(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.scraper.scrape_all(&state.scrape_sources).await {
        Ok(feeds) => {
            let total_items = feeds.iter().map(|g| g.count).sum();
            (
                StatusCode::OK,
                Json(FeedsResponse {
                    success: true,
                    feeds,
                    total_items,
                    error: None,
                    timestamp: Utc::now(),
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "feed scrape failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FeedsResponse {
                    success: false,
                    feeds: Vec::new(),
                    total_items: 0,
                    error: Some("Failed to fetch department feeds".to_string()),
                    timestamp: Utc::now(),
                }),
            )
        }
    }
}
