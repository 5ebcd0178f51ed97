//! Polymarket public API client (Gamma search + data API trades).

use super::{collect_pages, extract_markets, extract_trade_page, DataSourceError, MarketSummary, TradeSource};
use crate::domain::RawTrade;
use crate::ingest::parse_trade_values;
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Polymarket data source using the public Gamma and data APIs.
#[derive(Debug, Clone)]
pub struct PolymarketDataSource {
    client: Client,
    data_api_url: String,
    gamma_api_url: String,
    page_limit: usize,
}

impl PolymarketDataSource {
    pub fn new(
        data_api_url: String,
        gamma_api_url: String,
        page_limit: usize,
        timeout: Duration,
    ) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataSourceError::Other(e.to_string()))?;

        Ok(Self {
            client,
            data_api_url: data_api_url.trim_end_matches('/').to_string(),
            gamma_api_url: gamma_api_url.trim_end_matches('/').to_string(),
            page_limit,
        })
    }

    /// GET a JSON document, retrying transient failures with exponential backoff.
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, DataSourceError> {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
                })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
        })
        .await
    }
}

#[async_trait]
impl TradeSource for PolymarketDataSource {
    async fn search_markets(&self, query: &str) -> Result<Vec<MarketSummary>, DataSourceError> {
        debug!("Searching markets for q={}", query);

        let url = format!("{}/public-search", self.gamma_api_url);
        let response = self.get_json(&url, &[("q", query.to_string())]).await?;
        Ok(extract_markets(&response))
    }

    async fn fetch_trades(
        &self,
        condition_id: &str,
        user: &str,
    ) -> Result<Vec<RawTrade>, DataSourceError> {
        debug!(
            "Fetching trades for market={}, user={}, page_limit={}",
            condition_id, user, self.page_limit
        );

        let url = format!("{}/trades", self.data_api_url);
        let limit = self.page_limit;

        let records = collect_pages(limit, |offset| {
            let query = vec![
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("takerOnly", "false".to_string()),
                ("market", condition_id.to_string()),
                ("user", user.to_string()),
            ];
            let url = url.clone();
            async move {
                debug!("Fetching trades page offset={}", offset);
                let response = self.get_json(&url, &query).await?;
                Ok::<_, DataSourceError>(extract_trade_page(response))
            }
        })
        .await?;

        let trades = parse_trade_values(&records);
        debug!(
            "Fetched {} trade records, {} valid",
            records.len(),
            trades.len()
        );
        Ok(trades)
    }
}
