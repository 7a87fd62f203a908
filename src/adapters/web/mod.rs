//! Web server adapter.
//!
//! Axum app serving the chat page and the ask endpoints. All requests
//! share one immutably loaded [`Engine`]; every handler is a read-only
//! pass over it, so no locking is involved.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::engine::Engine;

pub struct AppState {
    pub engine: Arc<Engine>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::chat_page))
        .route("/ask", post(handlers::ask))
        .route("/api/ask", post(handlers::api_ask))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
