use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use cw_core::Result;

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router. CORS is permissive because the frontend is served
/// from a separate origin.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/news", get(handlers::get_news))
        .route("/api/feeds", get(handlers::get_feeds))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = create_app(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use cw_core::{Error, NewsResponse, Result};
}
