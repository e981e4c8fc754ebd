//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::get,
};
use faqdesk_core::{FaqDeskConfig, FaqDeskError};
use faqdesk_search::Ranker;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::db::FaqDb;

/// Shared state for the gateway server.
pub struct AppState {
    pub config: FaqDeskConfig,
    pub db: Arc<FaqDb>,
    /// Ranker built from `[search]`; handlers narrow its limits per request.
    pub ranker: Ranker,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: FaqDeskConfig, db: FaqDb) -> faqdesk_core::Result<Self> {
        let ranker = Ranker::new(config.ranker_config())
            .map_err(|e| FaqDeskError::Config(format!("search: {e}")))?;
        Ok(Self {
            config,
            db: Arc::new(db),
            ranker,
            start_time: std::time::Instant::now(),
        })
    }
}

/// CORS: configured origins, then `FAQDESK_CORS_ORIGINS`, else any origin.
fn cors_layer(configured: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    // Example: FAQDESK_CORS_ORIGINS=http://localhost:3000,https://faq.example.com
    let raw: Vec<String> = if configured.is_empty() {
        std::env::var("FAQDESK_CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_default()
    } else {
        configured.to_vec()
    };

    let origins: Vec<_> = raw
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<axum::http::HeaderValue>().ok())
        .collect();
    if origins.is_empty() {
        // Development fallback — allow all origins
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);
    let cors = cors_layer(&shared.config.gateway.cors_origins);

    Router::new()
        .route("/health", get(super::routes::health_check))
        .route("/api/info", get(super::routes::system_info))
        // FAQ CRUD
        .route(
            "/api/faq",
            get(super::routes::list_faqs).post(super::routes::create_faq),
        )
        .route(
            "/api/faq/{id}",
            get(super::routes::get_faq)
                .put(super::routes::update_faq)
                .delete(super::routes::delete_faq),
        )
        .route("/api/faq/{id}/neighbors", get(super::routes::faq_neighbors))
        // Plural paths used by the web client
        .route("/api/faqs", get(super::routes::list_faqs))
        .route("/api/faqs/", get(super::routes::list_faqs))
        .route("/api/faqs/{id}", get(super::routes::get_faq))
        .route("/api/faq/slug/{slug}", get(super::routes::get_faq_by_slug))
        // Similarity search
        .route("/api/search", get(super::routes::search_faqs))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.gateway.host, state.config.gateway.port);
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 FaqDesk listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
