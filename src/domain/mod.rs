//! Domain types for binary-market trade analysis.
//!
//! This module provides:
//! - Exact numeric handling via the Decimal wrapper
//! - Domain primitives: TimeSec, Outcome, OrderType, ResolvedSide, SideSelection
//! - Raw (ingested) and normalized trade records
//! - Stable chronological ordering

pub mod decimal;
pub mod ordering;
pub mod primitives;
pub mod trade;

pub use decimal::Decimal;
pub use ordering::sort_trades_chronological;
pub use primitives::{
    OrderType, Outcome, ResolvedSide, SideSelection, SideSelectionParseError, TimeSec,
};
pub use trade::{check_trade_range, NormalizedTrade, RawTrade, TradeParseError};
