pub mod auth;
pub mod chat;
pub mod content;
pub mod error;
pub mod session;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::SharedState;

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/chat", chat::router(state.clone()))
        .nest("/api", content::router(state))
}

/// Full HTTP application with request tracing and permissive CORS for the mobile client.
pub fn app(state: SharedState) -> Router {
    routes(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
