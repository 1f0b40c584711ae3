mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::Config;
use crate::location::LocationResolver;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/geo/autocomplete", get(handlers::autocomplete))
        .route("/api/geo/validate", get(handlers::validate))
        .route("/api/geo/distance", get(handlers::distance))
        .route("/api/geo/locations", get(handlers::locations))
        .route("/api/geo/provinces", get(handlers::provinces))
        .route("/api/geo/stats", get(handlers::stats))
        .route("/api/geo/search", get(handlers::search))
        .route("/api/geo/nearest", get(handlers::nearest))
        .route("/api/geo/proximity", get(handlers::proximity))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start(config: &Config, resolver: LocationResolver) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(resolver, config.max_suggestions));
    let locations = state.resolver.gazetteer().len();
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, locations, "linka-geo server listening");
    axum::serve(listener, app).await
}
