//! Mock trade source for testing without network calls.

use super::{DataSourceError, MarketSummary, TradeSource};
use crate::domain::RawTrade;
use async_trait::async_trait;

/// Mock source that returns predefined trades and markets.
#[derive(Debug, Clone, Default)]
pub struct MockTradeSource {
    trades: Vec<(String, String, RawTrade)>,
    markets: Vec<MarketSummary>,
    error: Option<DataSourceError>,
}

impl MockTradeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trade for a (condition id, user) pair.
    pub fn with_trade(mut self, condition_id: &str, user: &str, trade: RawTrade) -> Self {
        self.trades
            .push((condition_id.to_string(), user.to_string(), trade));
        self
    }

    pub fn with_trades(mut self, condition_id: &str, user: &str, trades: Vec<RawTrade>) -> Self {
        for trade in trades {
            self = self.with_trade(condition_id, user, trade);
        }
        self
    }

    pub fn with_market(mut self, market: MarketSummary) -> Self {
        self.markets.push(market);
        self
    }

    /// Make every call fail with `error`.
    pub fn with_error(mut self, error: DataSourceError) -> Self {
        self.error = Some(error);
        self
    }
}

#[async_trait]
impl TradeSource for MockTradeSource {
    async fn search_markets(&self, query: &str) -> Result<Vec<MarketSummary>, DataSourceError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let needle = query.to_lowercase();
        Ok(self
            .markets
            .iter()
            .filter(|m| {
                m.market_title.to_lowercase().contains(&needle)
                    || m.event_title.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn fetch_trades(
        &self,
        condition_id: &str,
        user: &str,
    ) -> Result<Vec<RawTrade>, DataSourceError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self
            .trades
            .iter()
            .filter(|(c, u, _)| c == condition_id && u == user)
            .map(|(_, _, t)| t.clone())
            .collect())
    }
}
