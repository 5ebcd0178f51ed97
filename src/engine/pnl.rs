//! Terminal and mark-to-market valuation of the final position.

use super::ledger::ExposureCurves;
use crate::domain::{Decimal, NormalizedTrade, Outcome};
use serde::{Deserialize, Serialize};

/// Valuation of the final position under each resolution and at market.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSummary {
    pub remaining_yes_shares: Decimal,
    pub remaining_no_shares: Decimal,
    pub total_spent: Decimal,
    pub final_value_yes: Decimal,
    pub pnl_yes: Decimal,
    pub final_value_no: Decimal,
    pub pnl_no: Decimal,
    /// Up price in cents used for mark-to-market.
    pub last_up_cents: Decimal,
    pub last_down_cents: Decimal,
    pub current_value: Decimal,
    pub current_pnl: Decimal,
}

/// Most recent observed price (cents) for each side.
///
/// Scans backward and stops once both sides are seen. A side with no
/// observation takes the complement of the other; with no trades both are 0.
/// A 0-cent trade is an observation: `[Up@30, Up@0]` gives `(0, 100)`, not
/// `(30, 70)`.
pub fn last_prices(trades: &[NormalizedTrade]) -> (Decimal, Decimal) {
    let mut last_up = None;
    let mut last_down = None;

    for trade in trades.iter().rev() {
        match trade.side {
            Outcome::Up if last_up.is_none() => last_up = Some(trade.price_cents),
            Outcome::Down if last_down.is_none() => last_down = Some(trade.price_cents),
            _ => {}
        }
        if last_up.is_some() && last_down.is_some() {
            break;
        }
    }

    let hundred = Decimal::hundred();
    match (last_up, last_down) {
        (Some(up), Some(down)) => (up, down),
        (Some(up), None) => (up, hundred - up),
        (None, Some(down)) => (hundred - down, down),
        (None, None) => (Decimal::zero(), Decimal::zero()),
    }
}

/// Evaluate the position left by `trades`, whose ledger output is `curves`.
pub fn evaluate(curves: &ExposureCurves, trades: &[NormalizedTrade]) -> PnlSummary {
    let remaining_yes_shares = curves.remaining_yes_shares();
    let remaining_no_shares = curves.remaining_no_shares();
    let total_spent = curves.total_spent();

    // Winning shares redeem at $1.
    let final_value_yes = remaining_yes_shares * Decimal::one();
    let final_value_no = remaining_no_shares * Decimal::one();

    let (last_up_cents, last_down_cents) = last_prices(trades);
    let current_value = remaining_yes_shares * last_up_cents.cents_to_probability()
        + remaining_no_shares * last_down_cents.cents_to_probability();

    PnlSummary {
        remaining_yes_shares,
        remaining_no_shares,
        total_spent,
        final_value_yes,
        pnl_yes: final_value_yes - total_spent,
        final_value_no,
        pnl_no: final_value_no - total_spent,
        last_up_cents,
        last_down_cents,
        current_value,
        current_pnl: current_value - total_spent,
    }
}
