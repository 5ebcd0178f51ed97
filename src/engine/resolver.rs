//! Resolution-side inference from the latest trade.

use crate::domain::{Decimal, RawTrade, ResolvedSide};

/// Outcome of an inference attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideInference {
    /// `None` when the latest trade's outcome label is not `up`/`down`.
    pub side: Option<ResolvedSide>,
    /// The latest trade the inference looked at.
    pub reference: Option<RawTrade>,
}

/// Infers which side a market resolved to from the most recent trade.
///
/// A late trade at high probability on an outcome is read as the market
/// settling for it; a late trade at low probability as settling against it.
#[derive(Debug, Clone, Copy)]
pub struct SideResolver {
    threshold: Decimal,
}

impl SideResolver {
    pub fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }

    pub fn infer(&self, trades: &[RawTrade]) -> SideInference {
        let Some(latest) = latest_trade(trades) else {
            return SideInference {
                side: None,
                reference: None,
            };
        };

        let labelled = match latest.outcome_label().as_deref() {
            Some("up") => ResolvedSide::Yes,
            Some("down") => ResolvedSide::No,
            _ => {
                return SideInference {
                    side: None,
                    reference: Some(latest.clone()),
                }
            }
        };

        let side = if latest.price >= self.threshold {
            labelled
        } else {
            labelled.opposite()
        };

        SideInference {
            side: Some(side),
            reference: Some(latest.clone()),
        }
    }
}

impl Default for SideResolver {
    fn default() -> Self {
        // 0.5
        Self::new(Decimal::new(rust_decimal::Decimal::new(5, 1)))
    }
}

/// Trade with the greatest timestamp; the first one wins on ties.
fn latest_trade(trades: &[RawTrade]) -> Option<&RawTrade> {
    trades.iter().fold(None, |best: Option<&RawTrade>, t| match best {
        Some(b) if b.timestamp >= t.timestamp => Some(b),
        _ => Some(t),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderType, TimeSec};

    fn trade(ts: i64, outcome: &str, price: &str) -> RawTrade {
        RawTrade::new(
            TimeSec::new(ts),
            Decimal::parse(price).unwrap(),
            Decimal::one(),
            Some(outcome.to_string()),
            OrderType::Buy,
        )
    }

    #[test]
    fn test_empty_trades_infer_nothing() {
        let inference = SideResolver::default().infer(&[]);
        assert_eq!(inference.side, None);
        assert_eq!(inference.reference, None);
    }

    #[test]
    fn test_high_price_up_resolves_yes() {
        let inference = SideResolver::default().infer(&[trade(1, "up", "0.7")]);
        assert_eq!(inference.side, Some(ResolvedSide::Yes));
    }

    #[test]
    fn test_low_price_up_resolves_no() {
        let inference = SideResolver::default().infer(&[trade(1, "up", "0.3")]);
        assert_eq!(inference.side, Some(ResolvedSide::No));
    }

    #[test]
    fn test_down_outcomes() {
        let resolver = SideResolver::default();
        assert_eq!(
            resolver.infer(&[trade(1, "Down", "0.9")]).side,
            Some(ResolvedSide::No)
        );
        assert_eq!(
            resolver.infer(&[trade(1, "DOWN", "0.1")]).side,
            Some(ResolvedSide::Yes)
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let inference = SideResolver::default().infer(&[trade(1, "Up", "0.5")]);
        assert_eq!(inference.side, Some(ResolvedSide::Yes));
    }

    #[test]
    fn test_unknown_outcome_fails_but_keeps_reference() {
        let inference = SideResolver::default().infer(&[trade(1, "unknown", "0.9")]);
        assert_eq!(inference.side, None);
        assert_eq!(
            inference.reference.and_then(|t| t.outcome),
            Some("unknown".to_string())
        );
    }

    #[test]
    fn test_uses_latest_trade_regardless_of_input_order() {
        let trades = vec![trade(30, "up", "0.9"), trade(10, "up", "0.1"), trade(20, "down", "0.8")];
        let inference = SideResolver::default().infer(&trades);
        assert_eq!(inference.side, Some(ResolvedSide::Yes));
        assert_eq!(inference.reference.unwrap().timestamp, TimeSec::new(30));
    }

    #[test]
    fn test_timestamp_tie_takes_first() {
        let trades = vec![trade(10, "up", "0.9"), trade(10, "down", "0.9")];
        let inference = SideResolver::default().infer(&trades);
        assert_eq!(inference.side, Some(ResolvedSide::Yes));
    }

    #[test]
    fn test_custom_threshold() {
        let resolver = SideResolver::new(Decimal::parse("0.8").unwrap());
        assert_eq!(
            resolver.infer(&[trade(1, "up", "0.7")]).side,
            Some(ResolvedSide::No)
        );
    }
}
