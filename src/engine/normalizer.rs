use crate::domain::{NormalizedTrade, Outcome, RawTrade};

/// Convert a raw trade into the engine's canonical form.
///
/// `cost` is computed from the probability price, so
/// `cost == price_cents / 100 × shares` holds exactly. Costs beyond the
/// decimal range saturate.
pub fn normalize_trade(raw: &RawTrade) -> NormalizedTrade {
    NormalizedTrade {
        order_type: raw.order_type,
        side: Outcome::from_label(raw.outcome.as_deref()),
        price_cents: raw.price.to_cents(),
        shares: raw.size,
        cost: raw.price.saturating_mul(raw.size),
        timestamp: raw.timestamp,
    }
}

/// Normalize a chronologically sorted sequence. Order and length are preserved.
pub fn normalize_trades(raw: &[RawTrade]) -> Vec<NormalizedTrade> {
    raw.iter().map(normalize_trade).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, OrderType, TimeSec};

    fn d(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    fn raw(ts: i64, price: &str, size: &str, outcome: Option<&str>, order: OrderType) -> RawTrade {
        RawTrade::new(
            TimeSec::new(ts),
            d(price),
            d(size),
            outcome.map(str::to_string),
            order,
        )
    }

    #[test]
    fn test_normalize_buy_up() {
        let t = normalize_trade(&raw(1, "0.40", "10", Some("Up"), OrderType::Buy));
        assert_eq!(t.order_type, OrderType::Buy);
        assert_eq!(t.side, Outcome::Up);
        assert_eq!(t.price_cents, d("40"));
        assert_eq!(t.shares, d("10"));
        assert_eq!(t.cost, d("4"));
        assert_eq!(t.timestamp, TimeSec::new(1));
    }

    #[test]
    fn test_missing_outcome_defaults_to_up() {
        let t = normalize_trade(&raw(1, "0.5", "1", None, OrderType::Sell));
        assert_eq!(t.side, Outcome::Up);
        assert_eq!(t.order_type, OrderType::Sell);
    }

    #[test]
    fn test_cost_matches_cents_times_shares() {
        let trades = normalize_trades(&[
            raw(1, "0.333", "7.5", Some("Up"), OrderType::Buy),
            raw(2, "0.01", "1234.56", Some("Down"), OrderType::Sell),
            raw(3, "0.999", "0.001", Some("Down"), OrderType::Buy),
            raw(4, "0", "50", Some("Up"), OrderType::Buy),
        ]);
        for t in &trades {
            assert_eq!(t.cost, t.price_cents.cents_to_probability() * t.shares);
        }
    }

    #[test]
    fn test_order_and_length_preserved() {
        let input = vec![
            raw(5, "0.1", "1", Some("Up"), OrderType::Buy),
            raw(5, "0.2", "2", Some("Down"), OrderType::Buy),
            raw(9, "0.3", "3", Some("Up"), OrderType::Sell),
        ];
        let out = normalize_trades(&input);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].shares, d("1"));
        assert_eq!(out[1].shares, d("2"));
        assert_eq!(out[2].shares, d("3"));
    }
}
