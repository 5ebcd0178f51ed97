//! Stable chronological ordering of raw trades.

use crate::domain::RawTrade;

/// Sort trades ascending by timestamp.
///
/// The sort is stable: trades sharing a timestamp keep their input order,
/// which fixes the curve ordering and chart grouping downstream.
pub fn sort_trades_chronological(trades: &mut [RawTrade]) {
    trades.sort_by_key(|t| t.timestamp);
}
