pub mod health;
pub mod markets;
pub mod sessions;

use crate::config::Config;
use crate::datasource::TradeSource;
use crate::engine::SideResolver;
use crate::session::SessionStore;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub source: Arc<dyn TradeSource>,
    pub config: Config,
}

impl AppState {
    pub fn new(source: Arc<dyn TradeSource>, config: Config) -> Self {
        let resolver = SideResolver::new(config.resolution_threshold);
        Self {
            sessions: Arc::new(SessionStore::new(resolver, config.session_ttl())),
            source,
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/markets/search", get(markets::search_markets))
        .route("/v1/sessions", post(sessions::create_session))
        .route("/v1/sessions/:id", delete(sessions::delete_session))
        .route("/v1/sessions/:id/trades/fetch", post(sessions::fetch_trades))
        .route("/v1/sessions/:id/trades/upload", post(sessions::upload_trades))
        .route("/v1/sessions/:id/resolved-side", put(sessions::set_resolved_side))
        .route("/v1/sessions/:id/analysis", post(sessions::run_analysis))
        .route("/v1/sessions/:id/chart", get(sessions::get_chart))
        .route("/v1/sessions/:id/report", get(sessions::get_report))
        .layer(cors)
        .with_state(state)
}
