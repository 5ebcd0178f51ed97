//! Running per-side exposure over an ordered trade sequence.
//!
//! "Exposure" here is net cash outlay: buys add their cost, sells subtract
//! their proceeds. It is not a mark-to-market position value.

use crate::domain::{Decimal, NormalizedTrade, Outcome};
use serde::{Deserialize, Serialize};

/// Post-trade exposure values, one entry per trade, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureCurves {
    pub yes_dollar: Vec<Decimal>,
    pub no_dollar: Vec<Decimal>,
    pub net_dollar: Vec<Decimal>,
    pub yes_shares: Vec<Decimal>,
    pub no_shares: Vec<Decimal>,
    pub net_shares: Vec<Decimal>,
}

impl ExposureCurves {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            yes_dollar: Vec::with_capacity(n),
            no_dollar: Vec::with_capacity(n),
            net_dollar: Vec::with_capacity(n),
            yes_shares: Vec::with_capacity(n),
            no_shares: Vec::with_capacity(n),
            net_shares: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.net_dollar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.net_dollar.is_empty()
    }

    /// Shares of Up still held after the last trade (0 when empty).
    pub fn remaining_yes_shares(&self) -> Decimal {
        last_or_zero(&self.yes_shares)
    }

    pub fn remaining_no_shares(&self) -> Decimal {
        last_or_zero(&self.no_shares)
    }

    /// Net dollars spent across both sides after the last trade.
    pub fn total_spent(&self) -> Decimal {
        last_or_zero(&self.net_dollar)
    }

    pub fn final_yes_dollar(&self) -> Decimal {
        last_or_zero(&self.yes_dollar)
    }

    pub fn final_no_dollar(&self) -> Decimal {
        last_or_zero(&self.no_dollar)
    }

    pub fn final_net_shares(&self) -> Decimal {
        last_or_zero(&self.net_shares)
    }
}

pub(crate) fn last_or_zero(values: &[Decimal]) -> Decimal {
    values.last().copied().unwrap_or_default()
}

/// Current accumulator values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExposureState {
    pub yes_dollar: Decimal,
    pub no_dollar: Decimal,
    pub yes_shares: Decimal,
    pub no_shares: Decimal,
}

/// Single forward pass over trades, recording the state after each one.
/// Recorded entries are never revised.
pub struct ExposureLedger {
    pub state: ExposureState,
    curves: ExposureCurves,
}

impl ExposureLedger {
    pub fn new() -> Self {
        Self {
            state: ExposureState::default(),
            curves: ExposureCurves::default(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            state: ExposureState::default(),
            curves: ExposureCurves::with_capacity(n),
        }
    }

    /// Build the curves for a whole sequence.
    pub fn from_trades(trades: &[NormalizedTrade]) -> ExposureCurves {
        let mut ledger = Self::with_capacity(trades.len());
        for trade in trades {
            ledger.process_trade(trade);
        }
        ledger.into_curves()
    }

    pub fn process_trade(&mut self, trade: &NormalizedTrade) {
        let cost = trade.signed_cost();
        let shares = trade.signed_shares();

        match trade.side {
            Outcome::Up => {
                self.state.yes_dollar = self.state.yes_dollar.saturating_add(cost);
                self.state.yes_shares = self.state.yes_shares.saturating_add(shares);
            }
            Outcome::Down => {
                self.state.no_dollar = self.state.no_dollar.saturating_add(cost);
                self.state.no_shares = self.state.no_shares.saturating_add(shares);
            }
        }

        let s = self.state;
        self.curves.yes_dollar.push(s.yes_dollar);
        self.curves.no_dollar.push(s.no_dollar);
        self.curves.net_dollar.push(s.yes_dollar.saturating_add(s.no_dollar));
        self.curves.yes_shares.push(s.yes_shares);
        self.curves.no_shares.push(s.no_shares);
        self.curves.net_shares.push(s.yes_shares.saturating_add(s.no_shares));
    }

    pub fn into_curves(self) -> ExposureCurves {
        self.curves
    }
}

impl Default for ExposureLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderType, TimeSec};

    fn d(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    fn trade(order_type: OrderType, side: Outcome, cents: &str, shares: &str) -> NormalizedTrade {
        let price_cents = d(cents);
        let shares = d(shares);
        NormalizedTrade {
            order_type,
            side,
            price_cents,
            shares,
            cost: price_cents.cents_to_probability() * shares,
            timestamp: TimeSec::new(0),
        }
    }

    #[test]
    fn test_empty_ledger() {
        let curves = ExposureLedger::from_trades(&[]);
        assert!(curves.is_empty());
        assert_eq!(curves.remaining_yes_shares(), Decimal::zero());
        assert_eq!(curves.remaining_no_shares(), Decimal::zero());
        assert_eq!(curves.total_spent(), Decimal::zero());
    }

    #[test]
    fn test_state_after_each_trade() {
        let mut ledger = ExposureLedger::new();

        ledger.process_trade(&trade(OrderType::Buy, Outcome::Up, "40", "10"));
        assert_eq!(ledger.state.yes_dollar, d("4"));
        assert_eq!(ledger.state.yes_shares, d("10"));

        ledger.process_trade(&trade(OrderType::Sell, Outcome::Up, "60", "5"));
        assert_eq!(ledger.state.yes_dollar, d("1"));
        assert_eq!(ledger.state.yes_shares, d("5"));

        ledger.process_trade(&trade(OrderType::Buy, Outcome::Down, "35", "8"));
        assert_eq!(ledger.state.no_dollar, d("2.8"));
        assert_eq!(ledger.state.no_shares, d("8"));

        let curves = ledger.into_curves();
        assert_eq!(curves.yes_dollar, vec![d("4"), d("1"), d("1")]);
        assert_eq!(curves.no_dollar, vec![d("0"), d("0"), d("2.8")]);
        assert_eq!(curves.net_dollar, vec![d("4"), d("1"), d("3.8")]);
        assert_eq!(curves.yes_shares, vec![d("10"), d("5"), d("5")]);
        assert_eq!(curves.no_shares, vec![d("0"), d("0"), d("8")]);
        assert_eq!(curves.net_shares, vec![d("10"), d("5"), d("13")]);
        assert_eq!(curves.remaining_yes_shares(), d("5"));
        assert_eq!(curves.remaining_no_shares(), d("8"));
        assert_eq!(curves.total_spent(), d("3.8"));
    }

    #[test]
    fn test_net_curves_are_side_sums() {
        let trades = vec![
            trade(OrderType::Buy, Outcome::Down, "12", "100"),
            trade(OrderType::Buy, Outcome::Up, "88", "3"),
            trade(OrderType::Sell, Outcome::Down, "20", "40"),
            trade(OrderType::Sell, Outcome::Up, "95", "3"),
            trade(OrderType::Buy, Outcome::Up, "97", "50"),
        ];
        let curves = ExposureLedger::from_trades(&trades);
        assert_eq!(curves.len(), trades.len());
        for i in 0..curves.len() {
            assert_eq!(curves.net_dollar[i], curves.yes_dollar[i] + curves.no_dollar[i]);
            assert_eq!(curves.net_shares[i], curves.yes_shares[i] + curves.no_shares[i]);
        }
    }

    #[test]
    fn test_selling_more_than_bought_goes_negative() {
        let curves = ExposureLedger::from_trades(&[trade(OrderType::Sell, Outcome::Down, "50", "4")]);
        assert_eq!(curves.no_dollar, vec![d("-2")]);
        assert_eq!(curves.no_shares, vec![d("-4")]);
    }
}
