//! Plain-text analysis report.

use crate::domain::{Decimal, TimeSec};
use crate::engine::Analysis;
use chrono::DateTime;

pub const REPORT_FILENAME: &str = "polymarket_report.txt";

const TABLE_HEADER: &str =
    "Idx | Time                | Type | Side | Price(c) |   Shares   |    Cost($)";
const TABLE_RULE: &str =
    "----+---------------------+------+------+----------+------------+------------";

fn fmt2(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// UTC `YYYY-MM-DD HH:MM:SS`.
fn format_time(ts: TimeSec) -> String {
    DateTime::from_timestamp(ts.as_i64(), 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.as_i64().to_string())
}

pub fn render_text_report(analysis: &Analysis, market_title: &str) -> String {
    let m = &analysis.metrics;
    let curves = &m.curves;
    let rollup = &m.rollup;
    let cum = &m.cumulative_buys;
    let peaks = &m.peaks;

    let (start_time, end_time) = match (analysis.trades.first(), analysis.trades.last()) {
        (Some(first), Some(last)) => (format_time(first.timestamp), format_time(last.timestamp)),
        _ => ("N/A".to_string(), "N/A".to_string()),
    };

    let mut lines = vec![
        format!("MARKET: {}", market_title),
        format!("RESOLUTION: {}", analysis.resolved_side),
        format!("TRADES: {}", m.trade_count),
        format!("TIME RANGE: {} to {}", start_time, end_time),
        format!(
            "PRICE RANGE: {} - {}",
            fmt2(m.min_price_cents),
            fmt2(m.max_price_cents)
        ),
        format!("CURRENT PNL (MtM): $ {}", fmt2(m.pnl.current_pnl)),
        format!("CURRENT VALUE:     $ {}", fmt2(m.pnl.current_value)),
        String::new(),
        "--- Position at resolution ---".to_string(),
        format!("Remaining YES shares: {}", fmt2(m.pnl.remaining_yes_shares)),
        format!("Remaining NO shares:  {}", fmt2(m.pnl.remaining_no_shares)),
        format!("Total spent (net exposure): $ {}", fmt2(m.pnl.total_spent)),
        String::new(),
        "IF RESOLVED YES:".to_string(),
        format!("  Final value: $ {}", fmt2(m.pnl.final_value_yes)),
        format!("  PnL:         $ {}", fmt2(m.pnl.pnl_yes)),
        String::new(),
        "IF RESOLVED NO:".to_string(),
        format!("  Final value: $ {}", fmt2(m.pnl.final_value_no)),
        format!("  PnL:         $ {}", fmt2(m.pnl.pnl_no)),
        String::new(),
        "--- Buy/Sell totals ---".to_string(),
        format!(
            "YES buys:  {} sh / $ {}",
            fmt2(rollup.yes_buy_shares),
            fmt2(rollup.yes_buy_cost)
        ),
        format!(
            "YES sells: {} sh / $ {}",
            fmt2(rollup.yes_sell_shares),
            fmt2(rollup.yes_sell_cost)
        ),
        format!(
            "NO buys:   {} sh / $ {}",
            fmt2(rollup.no_buy_shares),
            fmt2(rollup.no_buy_cost)
        ),
        format!(
            "NO sells:  {} sh / $ {}",
            fmt2(rollup.no_sell_shares),
            fmt2(rollup.no_sell_cost)
        ),
        String::new(),
        "--- Cumulative buys ---".to_string(),
        format!(
            "YES cumulative: {} sh / $ {}",
            fmt2(cum.yes_shares_total()),
            fmt2(cum.yes_cost_total())
        ),
        format!(
            "NO cumulative:  {} sh / $ {}",
            fmt2(cum.no_shares_total()),
            fmt2(cum.no_cost_total())
        ),
        String::new(),
        "--- Exposure peaks (trade index: earliest -> latest) ---".to_string(),
        format!(
            "YES dollar peak: $ {} at trade #{}",
            fmt2(peaks.yes_dollar.value),
            peaks.yes_dollar.index + 1
        ),
        format!(
            "NO dollar peak:  $ {} at trade #{}",
            fmt2(peaks.no_dollar.value),
            peaks.no_dollar.index + 1
        ),
        format!(
            "YES share peak:  {} sh at trade #{}",
            fmt2(peaks.yes_shares.value),
            peaks.yes_shares.index + 1
        ),
        format!(
            "NO share peak:   {} sh at trade #{}",
            fmt2(peaks.no_shares.value),
            peaks.no_shares.index + 1
        ),
        String::new(),
        "--- Final exposure ---".to_string(),
        format!(
            "YES exposure: $ {} | {} sh",
            fmt2(curves.final_yes_dollar()),
            fmt2(curves.remaining_yes_shares())
        ),
        format!(
            "NO exposure:  $ {} | {} sh",
            fmt2(curves.final_no_dollar()),
            fmt2(curves.remaining_no_shares())
        ),
        format!(
            "NET exposure: $ {} | {} sh",
            fmt2(curves.total_spent()),
            fmt2(curves.final_net_shares())
        ),
        String::new(),
        "--- Trades (Sorted by Timestamp) ---".to_string(),
        TABLE_HEADER.to_string(),
        TABLE_RULE.to_string(),
    ];

    for (i, t) in analysis.trades.iter().enumerate() {
        lines.push(format!(
            "{:3} | {} | {:<4} | {:<4} | {:>8} | {:>10} | $ {:>9}",
            i + 1,
            format_time(t.timestamp),
            t.order_type,
            t.side,
            fmt2(t.price_cents),
            fmt2(t.shares),
            fmt2(t.cost),
        ));
    }

    lines.join("\n")
}
