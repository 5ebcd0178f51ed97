use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::datasource::MarketSummary;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub markets: Vec<MarketSummary>,
}

pub async fn search_markets(
    Query(params): Query<SearchQuery>,
    State(state): State<AppState>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query is required".into()));
    }

    let markets = state.source.search_markets(query).await?;
    Ok(Json(SearchResponse { markets }))
}
