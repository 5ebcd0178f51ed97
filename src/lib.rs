pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod report;
pub mod session;

pub use config::Config;
pub use datasource::{
    DataSourceError, MarketSummary, MockTradeSource, PolymarketDataSource, TradeSource,
};
pub use domain::{
    Decimal, NormalizedTrade, OrderType, Outcome, RawTrade, ResolvedSide, SideSelection, TimeSec,
};
pub use engine::{analyze, Analysis, AnalysisError, Metrics, SideResolver};
pub use error::AppError;
pub use session::{AnalysisContext, SessionStore, SideDecision};
