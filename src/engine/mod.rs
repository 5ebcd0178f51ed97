//! Pure computation engine for exposure and PnL analysis.
//!
//! Raw trades → [`normalizer`] → [`ledger`] → [`aggregator`] / [`pnl`] →
//! [`Metrics`]. The [`resolver`] works on the raw trades independently.

use crate::domain::{sort_trades_chronological, Decimal, NormalizedTrade, RawTrade, ResolvedSide};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aggregator;
pub mod ledger;
pub mod normalizer;
pub mod pnl;
pub mod resolver;

pub use aggregator::{CumulativeBuys, ExposurePeaks, Peak, TradeRollup};
pub use ledger::{ExposureCurves, ExposureLedger, ExposureState};
pub use normalizer::{normalize_trade, normalize_trades};
pub use pnl::{last_prices, PnlSummary};
pub use resolver::{SideInference, SideResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("No trades data found")]
    EmptyInput,
    #[error("Resolved side not set")]
    UnresolvedSide,
    #[error("Could not infer resolved side automatically")]
    InferenceFailure,
}

/// Everything derived from one ordered trade sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub trade_count: usize,
    #[serde(flatten)]
    pub pnl: PnlSummary,
    pub rollup: TradeRollup,
    pub cumulative_buys: CumulativeBuys,
    pub peaks: ExposurePeaks,
    pub curves: ExposureCurves,
    /// Per-trade price in cents, in trade order.
    pub prices: Vec<Decimal>,
    pub min_price_cents: Decimal,
    pub max_price_cents: Decimal,
}

/// Compute metrics over trades already in chronological order.
///
/// Defined for the empty sequence: every value is 0.
pub fn compute_metrics(trades: &[NormalizedTrade]) -> Metrics {
    let curves = ExposureLedger::from_trades(trades);
    let pnl = pnl::evaluate(&curves, trades);
    let prices: Vec<Decimal> = trades.iter().map(|t| t.price_cents).collect();

    Metrics {
        trade_count: trades.len(),
        pnl,
        rollup: TradeRollup::from_trades(trades),
        cumulative_buys: CumulativeBuys::from_trades(trades),
        peaks: ExposurePeaks::from_curves(&curves),
        curves,
        min_price_cents: prices.iter().min().copied().unwrap_or_default(),
        max_price_cents: prices.iter().max().copied().unwrap_or_default(),
        prices,
    }
}

/// A completed analysis: the resolution it was run under, the normalized
/// trades in analysis order, and the metrics over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub resolved_side: ResolvedSide,
    pub trades: Vec<NormalizedTrade>,
    pub metrics: Metrics,
}

/// Sort, normalize and measure a batch of raw trades.
///
/// # Errors
/// [`AnalysisError::EmptyInput`] when there is nothing to analyse.
pub fn analyze(raw: &[RawTrade], resolved_side: ResolvedSide) -> Result<Analysis, AnalysisError> {
    if raw.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut ordered = raw.to_vec();
    sort_trades_chronological(&mut ordered);
    let trades = normalize_trades(&ordered);
    let metrics = compute_metrics(&trades);

    tracing::debug!(
        trade_count = metrics.trade_count,
        total_spent = %metrics.pnl.total_spent,
        "analysis computed"
    );

    Ok(Analysis {
        resolved_side,
        trades,
        metrics,
    })
}
