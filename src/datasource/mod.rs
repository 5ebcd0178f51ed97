//! Trade sources: where an analysis gets its raw trades and market listings.

use crate::domain::RawTrade;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;

pub mod mock;
pub mod polymarket;

pub use mock::MockTradeSource;
pub use polymarket::PolymarketDataSource;

/// A market found by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub event_title: String,
    pub market_title: String,
    pub condition_id: String,
}

/// Source of market listings and per-user trade history.
///
/// Implementations handle pagination and retry/backoff themselves.
#[async_trait]
pub trait TradeSource: Send + Sync + fmt::Debug {
    /// Search markets by free-text query.
    async fn search_markets(&self, query: &str) -> Result<Vec<MarketSummary>, DataSourceError>;

    /// Fetch every trade of `user` in the market identified by `condition_id`.
    ///
    /// Records that fail validation are dropped; the result keeps source order.
    async fn fetch_trades(
        &self,
        condition_id: &str,
        user: &str,
    ) -> Result<Vec<RawTrade>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// Non-success HTTP status
    HttpError { status: u16, message: String },
    /// Invalid JSON or unexpected response shape
    ParseError(String),
    /// Rate limit exceeded after retries
    RateLimited,
    Other(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}

/// Request offset-paginated pages until one comes back shorter than
/// `page_limit`, concatenating their records.
pub async fn collect_pages<F, Fut, E>(page_limit: usize, mut fetch_page: F) -> Result<Vec<Value>, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<Value>, E>>,
{
    let mut all = Vec::new();
    let mut offset = 0;

    loop {
        let batch = fetch_page(offset).await?;
        let short_page = batch.len() < page_limit;
        all.extend(batch);
        if short_page || page_limit == 0 {
            break;
        }
        offset += page_limit;
    }

    Ok(all)
}

/// Trade pages arrive either as a bare array or wrapped as `{"trades": [...]}`.
pub fn extract_trade_page(response: Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("trades") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Flatten a public-search response into one summary per market.
pub fn extract_markets(response: &Value) -> Vec<MarketSummary> {
    let Some(events) = response.get("events").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for event in events {
        let event_title = event
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Unknown Event");
        let markets = event
            .get("markets")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for market in markets {
            let market_title = market
                .get("question")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .or_else(|| market.get("title").and_then(Value::as_str))
                .unwrap_or("Unknown Market");
            let condition_id = market
                .get("conditionId")
                .and_then(Value::as_str)
                .unwrap_or_default();

            results.push(MarketSummary {
                event_title: event_title.to_string(),
                market_title: market_title.to_string(),
                condition_id: condition_id.to_string(),
            });
        }
    }
    results
}
