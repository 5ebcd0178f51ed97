//! Raw and normalized trade records.

use crate::domain::{Decimal, OrderType, Outcome, TimeSec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An executed trade as supplied by an ingestion source.
///
/// Constructed through [`RawTrade::from_json`] (or the CSV reader), so the
/// fields are already typed: numeric fields are numbers, missing ones are 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    pub timestamp: TimeSec,
    /// Probability-scale price in [0, 1].
    pub price: Decimal,
    pub size: Decimal,
    /// Raw outcome label as sent by the source (e.g. "Up", "Down").
    pub outcome: Option<String>,
    pub order_type: OrderType,
    /// Market title, when the source carries one.
    pub title: Option<String>,
    pub condition_id: Option<String>,
}

impl RawTrade {
    pub fn new(
        timestamp: TimeSec,
        price: Decimal,
        size: Decimal,
        outcome: Option<String>,
        order_type: OrderType,
    ) -> Self {
        RawTrade {
            timestamp,
            price,
            size,
            outcome,
            order_type,
            title: None,
            condition_id: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse one record of the Polymarket trade shape.
    ///
    /// The order type is read from `side` (`"BUY"`/`"SELL"`) and the outcome
    /// label from `outcome`. Missing numeric fields default to 0; present but
    /// non-numeric ones are an error, as are prices outside [0, 1] and
    /// negative sizes.
    pub fn from_json(value: &Value) -> Result<Self, TradeParseError> {
        let obj = value.as_object().ok_or(TradeParseError::NotAnObject)?;

        let timestamp = match obj.get("timestamp") {
            None | Some(Value::Null) => TimeSec::default(),
            Some(v) => parse_timestamp(v).ok_or(TradeParseError::InvalidField("timestamp"))?,
        };
        let price = numeric_field(obj.get("price"), "price")?;
        let size = numeric_field(obj.get("size"), "size")?;
        check_trade_range(price, size)?;

        let text = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .map(|s| s.to_string())
        };

        Ok(RawTrade {
            timestamp,
            price,
            size,
            outcome: text("outcome"),
            order_type: OrderType::from_label(obj.get("side").and_then(Value::as_str)),
            title: text("title"),
            condition_id: text("conditionId"),
        })
    }

    /// Lower-cased outcome label, if any.
    pub fn outcome_label(&self) -> Option<String> {
        self.outcome.as_deref().map(|s| s.trim().to_ascii_lowercase())
    }
}

/// Price must be a probability and size non-negative.
pub fn check_trade_range(price: Decimal, size: Decimal) -> Result<(), TradeParseError> {
    if !price.within(Decimal::zero(), Decimal::one()) {
        return Err(TradeParseError::OutOfRange("price"));
    }
    if size < Decimal::zero() {
        return Err(TradeParseError::OutOfRange("size"));
    }
    Ok(())
}

fn numeric_field(value: Option<&Value>, name: &'static str) -> Result<Decimal, TradeParseError> {
    match value {
        None | Some(Value::Null) => Ok(Decimal::zero()),
        Some(v) => Decimal::from_json(v).ok_or(TradeParseError::InvalidField(name)),
    }
}

fn parse_timestamp(value: &Value) -> Option<TimeSec> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .map(TimeSec::new),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .map(TimeSec::new)
        }
        _ => None,
    }
}

/// Why a single raw record was rejected at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeParseError {
    NotAnObject,
    InvalidField(&'static str),
    OutOfRange(&'static str),
}

impl fmt::Display for TradeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeParseError::NotAnObject => write!(f, "trade record is not an object"),
            TradeParseError::InvalidField(name) => write!(f, "field '{}' is not numeric", name),
            TradeParseError::OutOfRange(name) => write!(f, "field '{}' is out of range", name),
        }
    }
}

impl std::error::Error for TradeParseError {}

/// Canonical trade representation consumed by the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTrade {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Outcome,
    /// Price in cents, [0, 100].
    pub price_cents: Decimal,
    pub shares: Decimal,
    /// Dollars paid or received: probability price × shares.
    pub cost: Decimal,
    pub timestamp: TimeSec,
}

impl NormalizedTrade {
    pub fn is_buy(&self) -> bool {
        self.order_type == OrderType::Buy
    }

    /// Cost with the sign of the order: positive for buys, negative for sells.
    pub fn signed_cost(&self) -> Decimal {
        match self.order_type {
            OrderType::Buy => self.cost,
            OrderType::Sell => -self.cost,
        }
    }

    pub fn signed_shares(&self) -> Decimal {
        match self.order_type {
            OrderType::Buy => self.shares,
            OrderType::Sell => -self.shares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    #[test]
    fn test_from_json_polymarket_shape() {
        let raw = RawTrade::from_json(&json!({
            "proxyWallet": "0xabc",
            "side": "SELL",
            "conditionId": "0xcond",
            "size": 5,
            "price": 0.6,
            "timestamp": 1700000100,
            "title": "Bitcoin Up or Down",
            "outcome": "Up",
            "transactionHash": "0xdead"
        }))
        .unwrap();

        assert_eq!(raw.timestamp, TimeSec::new(1700000100));
        assert_eq!(raw.price, d("0.6"));
        assert_eq!(raw.size, d("5"));
        assert_eq!(raw.order_type, OrderType::Sell);
        assert_eq!(raw.outcome.as_deref(), Some("Up"));
        assert_eq!(raw.title.as_deref(), Some("Bitcoin Up or Down"));
        assert_eq!(raw.condition_id.as_deref(), Some("0xcond"));
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let raw = RawTrade::from_json(&json!({})).unwrap();
        assert_eq!(raw.timestamp, TimeSec::new(0));
        assert_eq!(raw.price, Decimal::zero());
        assert_eq!(raw.size, Decimal::zero());
        assert_eq!(raw.order_type, OrderType::Buy);
        assert_eq!(raw.outcome, None);
    }

    #[test]
    fn test_from_json_accepts_numeric_strings() {
        let raw = RawTrade::from_json(&json!({
            "price": "0.35",
            "size": "8",
            "timestamp": "1700000000"
        }))
        .unwrap();
        assert_eq!(raw.price, d("0.35"));
        assert_eq!(raw.size, d("8"));
        assert_eq!(raw.timestamp, TimeSec::new(1700000000));
    }

    #[test]
    fn test_from_json_truncates_float_timestamp() {
        let raw = RawTrade::from_json(&json!({"timestamp": 1700000000.9})).unwrap();
        assert_eq!(raw.timestamp, TimeSec::new(1700000000));
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        assert_eq!(
            RawTrade::from_json(&json!({"price": "cheap", "size": 1})),
            Err(TradeParseError::InvalidField("price"))
        );
        assert_eq!(
            RawTrade::from_json(&json!({"price": 0.5, "size": [1]})),
            Err(TradeParseError::InvalidField("size"))
        );
        assert_eq!(
            RawTrade::from_json(&json!("trade")),
            Err(TradeParseError::NotAnObject)
        );
    }

    #[test]
    fn test_from_json_rejects_out_of_range() {
        assert_eq!(
            RawTrade::from_json(&json!({"price": 7, "size": 5})),
            Err(TradeParseError::OutOfRange("price"))
        );
        assert_eq!(
            RawTrade::from_json(&json!({"price": -0.1, "size": 5})),
            Err(TradeParseError::OutOfRange("price"))
        );
        assert_eq!(
            RawTrade::from_json(&json!({"price": 0.5, "size": -5})),
            Err(TradeParseError::OutOfRange("size"))
        );
        assert_eq!(
            RawTrade::from_json(&json!({"price": "79228162514264337593543950335", "size": 2})),
            Err(TradeParseError::OutOfRange("price"))
        );
        assert!(RawTrade::from_json(&json!({"price": 1, "size": 0})).is_ok());
    }

    #[test]
    fn test_signed_amounts() {
        let trade = NormalizedTrade {
            order_type: OrderType::Sell,
            side: Outcome::Up,
            price_cents: d("60"),
            shares: d("5"),
            cost: d("3"),
            timestamp: TimeSec::new(2),
        };
        assert_eq!(trade.signed_cost(), d("-3"));
        assert_eq!(trade.signed_shares(), d("-5"));
        assert!(!trade.is_buy());
    }

    #[test]
    fn test_normalized_trade_serializes_type_field() {
        let trade = NormalizedTrade {
            order_type: OrderType::Buy,
            side: Outcome::Down,
            price_cents: d("35"),
            shares: d("8"),
            cost: d("2.8"),
            timestamp: TimeSec::new(3),
        };
        let v = serde_json::to_value(&trade).unwrap();
        assert_eq!(v["type"], "Buy");
        assert_eq!(v["side"], "Down");
        assert_eq!(v["priceCents"].as_f64(), Some(35.0));
    }
}
