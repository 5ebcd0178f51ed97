//! Buy/sell rollups, cumulative buy curves and curve peaks.

use super::ledger::{last_or_zero, ExposureCurves};
use crate::domain::{Decimal, NormalizedTrade, OrderType, Outcome};
use serde::{Deserialize, Serialize};

/// Share and dollar totals per (side, order type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRollup {
    pub yes_buy_shares: Decimal,
    pub yes_buy_cost: Decimal,
    pub yes_sell_shares: Decimal,
    pub yes_sell_cost: Decimal,
    pub no_buy_shares: Decimal,
    pub no_buy_cost: Decimal,
    pub no_sell_shares: Decimal,
    pub no_sell_cost: Decimal,
}

impl TradeRollup {
    pub fn from_trades(trades: &[NormalizedTrade]) -> Self {
        let mut rollup = Self::default();
        for t in trades {
            let (shares, cost) = match (t.side, t.order_type) {
                (Outcome::Up, OrderType::Buy) => {
                    (&mut rollup.yes_buy_shares, &mut rollup.yes_buy_cost)
                }
                (Outcome::Up, OrderType::Sell) => {
                    (&mut rollup.yes_sell_shares, &mut rollup.yes_sell_cost)
                }
                (Outcome::Down, OrderType::Buy) => {
                    (&mut rollup.no_buy_shares, &mut rollup.no_buy_cost)
                }
                (Outcome::Down, OrderType::Sell) => {
                    (&mut rollup.no_sell_shares, &mut rollup.no_sell_cost)
                }
            };
            *shares = shares.saturating_add(t.shares);
            *cost = cost.saturating_add(t.cost);
        }
        rollup
    }
}

/// Running totals of bought shares and dollars per side.
///
/// One entry per trade so the curves line up with the exposure curves;
/// sells and the other side's buys contribute 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeBuys {
    pub yes_shares: Vec<Decimal>,
    pub yes_cost: Vec<Decimal>,
    pub no_shares: Vec<Decimal>,
    pub no_cost: Vec<Decimal>,
}

impl CumulativeBuys {
    pub fn from_trades(trades: &[NormalizedTrade]) -> Self {
        let mut cum = Self {
            yes_shares: Vec::with_capacity(trades.len()),
            yes_cost: Vec::with_capacity(trades.len()),
            no_shares: Vec::with_capacity(trades.len()),
            no_cost: Vec::with_capacity(trades.len()),
        };

        let (mut yes_sh, mut yes_cost) = (Decimal::zero(), Decimal::zero());
        let (mut no_sh, mut no_cost) = (Decimal::zero(), Decimal::zero());

        for t in trades {
            if t.is_buy() {
                match t.side {
                    Outcome::Up => {
                        yes_sh = yes_sh.saturating_add(t.shares);
                        yes_cost = yes_cost.saturating_add(t.cost);
                    }
                    Outcome::Down => {
                        no_sh = no_sh.saturating_add(t.shares);
                        no_cost = no_cost.saturating_add(t.cost);
                    }
                }
            }
            cum.yes_shares.push(yes_sh);
            cum.yes_cost.push(yes_cost);
            cum.no_shares.push(no_sh);
            cum.no_cost.push(no_cost);
        }

        cum
    }

    pub fn yes_shares_total(&self) -> Decimal {
        last_or_zero(&self.yes_shares)
    }

    pub fn yes_cost_total(&self) -> Decimal {
        last_or_zero(&self.yes_cost)
    }

    pub fn no_shares_total(&self) -> Decimal {
        last_or_zero(&self.no_shares)
    }

    pub fn no_cost_total(&self) -> Decimal {
        last_or_zero(&self.no_cost)
    }
}

/// Maximum of a curve and the earliest index reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    pub index: usize,
    pub value: Decimal,
}

impl Peak {
    /// `(0, 0)` for an empty curve.
    pub fn of(curve: &[Decimal]) -> Self {
        let mut peak: Option<Peak> = None;
        for (index, &value) in curve.iter().enumerate() {
            match peak {
                // Strictly greater keeps the first occurrence on ties.
                Some(p) if value <= p.value => {}
                _ => peak = Some(Peak { index, value }),
            }
        }
        peak.unwrap_or_default()
    }
}

/// Peaks of the four primary exposure curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposurePeaks {
    pub yes_dollar: Peak,
    pub no_dollar: Peak,
    pub yes_shares: Peak,
    pub no_shares: Peak,
}

impl ExposurePeaks {
    pub fn from_curves(curves: &ExposureCurves) -> Self {
        Self {
            yes_dollar: Peak::of(&curves.yes_dollar),
            no_dollar: Peak::of(&curves.no_dollar),
            yes_shares: Peak::of(&curves.yes_shares),
            no_shares: Peak::of(&curves.no_shares),
        }
    }
}
