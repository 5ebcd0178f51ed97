//! Chart-ready series for an analysis.
//!
//! Trades sharing a timestamp are plotted on one x position, so x runs over
//! the sorted unique timestamps rather than over trades.

use super::style::StyleKey;
use crate::domain::{Decimal, OrderType, Outcome, ResolvedSide, TimeSec};
use crate::engine::{Analysis, CumulativeBuys, ExposureCurves, ExposurePeaks};
use serde::Serialize;
use std::collections::BTreeMap;

/// Trades plotted at one x position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeGroup {
    pub x: usize,
    pub timestamp: TimeSec,
    /// Indices into the analysed trade sequence.
    pub trade_indices: Vec<usize>,
    pub avg_price_cents: Decimal,
    pub style: StyleKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub market_title: String,
    pub resolved_side: ResolvedSide,
    pub timestamps: Vec<TimeSec>,
    /// x position of each trade.
    pub x_indices: Vec<usize>,
    pub groups: Vec<TradeGroup>,
    /// Bought shares per x position.
    pub buy_volume_yes: Vec<Decimal>,
    pub buy_volume_no: Vec<Decimal>,
    pub curves: ExposureCurves,
    pub cumulative_buys: CumulativeBuys,
    pub peaks: ExposurePeaks,
}

impl ChartSeries {
    pub fn build(analysis: &Analysis, market_title: &str) -> Self {
        let trades = &analysis.trades;

        let mut timestamps: Vec<TimeSec> = trades.iter().map(|t| t.timestamp).collect();
        timestamps.sort();
        timestamps.dedup();

        let x_of = |ts: TimeSec| timestamps.binary_search(&ts).unwrap_or_default();
        let x_indices: Vec<usize> = trades.iter().map(|t| x_of(t.timestamp)).collect();

        let mut by_x: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, &x) in x_indices.iter().enumerate() {
            by_x.entry(x).or_default().push(i);
        }

        let mut buy_volume_yes = vec![Decimal::zero(); timestamps.len()];
        let mut buy_volume_no = vec![Decimal::zero(); timestamps.len()];
        let mut groups = Vec::with_capacity(by_x.len());

        for (x, trade_indices) in by_x {
            let members: Vec<_> = trade_indices.iter().map(|&i| &trades[i]).collect();

            for t in &members {
                if t.order_type == OrderType::Buy {
                    match t.side {
                        Outcome::Up => buy_volume_yes[x] += t.shares,
                        Outcome::Down => buy_volume_no[x] += t.shares,
                    }
                }
            }

            let price_sum: Decimal = members.iter().map(|t| t.price_cents).sum();
            let avg_price_cents = price_sum / Decimal::from_i64(members.len() as i64);

            groups.push(TradeGroup {
                x,
                timestamp: timestamps[x],
                style: StyleKey::of_group(members.iter().copied()),
                avg_price_cents,
                trade_indices,
            });
        }

        ChartSeries {
            market_title: market_title.to_string(),
            resolved_side: analysis.resolved_side,
            timestamps,
            x_indices,
            groups,
            buy_volume_yes,
            buy_volume_no,
            curves: analysis.metrics.curves.clone(),
            cumulative_buys: analysis.metrics.cumulative_buys.clone(),
            peaks: analysis.metrics.peaks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawTrade;
    use crate::engine::analyze;

    fn d(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    fn raw(ts: i64, price: &str, size: &str, outcome: &str, order_type: OrderType) -> RawTrade {
        RawTrade::new(TimeSec::new(ts), d(price), d(size), Some(outcome.into()), order_type)
    }

    #[test]
    fn test_groups_trades_by_timestamp() {
        let analysis = analyze(
            &[
                raw(100, "0.40", "10", "Up", OrderType::Buy),
                raw(100, "0.50", "4", "Down", OrderType::Buy),
                raw(200, "0.60", "5", "Up", OrderType::Sell),
                raw(300, "0.35", "8", "Down", OrderType::Buy),
            ],
            ResolvedSide::Yes,
        )
        .unwrap();
        let chart = ChartSeries::build(&analysis, "BTC");

        assert_eq!(
            chart.timestamps,
            vec![TimeSec::new(100), TimeSec::new(200), TimeSec::new(300)]
        );
        assert_eq!(chart.x_indices, vec![0, 0, 1, 2]);
        assert_eq!(chart.groups.len(), 3);

        let first = &chart.groups[0];
        assert_eq!(first.trade_indices, vec![0, 1]);
        assert_eq!(first.avg_price_cents, d("45"));
        assert_eq!(first.style, StyleKey::Mixed);
        assert_eq!(chart.groups[1].style, StyleKey::SellYes);
        assert_eq!(chart.groups[2].style, StyleKey::BuyNo);

        assert_eq!(chart.buy_volume_yes, vec![d("10"), d("0"), d("0")]);
        assert_eq!(chart.buy_volume_no, vec![d("4"), d("0"), d("8")]);
    }

    #[test]
    fn test_carries_curves_and_peaks() {
        let analysis = analyze(&[raw(1, "0.4", "10", "Up", OrderType::Buy)], ResolvedSide::No).unwrap();
        let chart = ChartSeries::build(&analysis, "ETH");
        assert_eq!(chart.curves.yes_dollar, vec![d("4")]);
        assert_eq!(chart.peaks.yes_dollar.value, d("4"));
        assert_eq!(chart.resolved_side, ResolvedSide::No);

        let v = serde_json::to_value(&chart).unwrap();
        assert_eq!(v["groups"][0]["style"]["label"], "Buy YES");
        assert_eq!(v["marketTitle"], "ETH");
    }
}
