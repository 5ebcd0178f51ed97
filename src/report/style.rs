//! Fixed display styles for (order type, side) pairs.

use crate::domain::{NormalizedTrade, OrderType, Outcome};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    BuyYes,
    SellYes,
    BuyNo,
    SellNo,
    /// A group whose trades do not share one (order type, side) pair.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Marker {
    #[serde(rename = "x")]
    Cross,
    #[serde(rename = "o")]
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Style {
    pub color: &'static str,
    pub marker: Marker,
    pub label: &'static str,
}

impl StyleKey {
    pub fn of(order_type: OrderType, side: Outcome) -> Self {
        match (order_type, side) {
            (OrderType::Buy, Outcome::Up) => StyleKey::BuyYes,
            (OrderType::Sell, Outcome::Up) => StyleKey::SellYes,
            (OrderType::Buy, Outcome::Down) => StyleKey::BuyNo,
            (OrderType::Sell, Outcome::Down) => StyleKey::SellNo,
        }
    }

    /// Shared key of a group of trades, or [`StyleKey::Mixed`].
    pub fn of_group<'a>(trades: impl IntoIterator<Item = &'a NormalizedTrade>) -> Self {
        let mut keys = trades.into_iter().map(|t| Self::of(t.order_type, t.side));
        let Some(first) = keys.next() else {
            return StyleKey::Mixed;
        };
        if keys.all(|k| k == first) {
            first
        } else {
            StyleKey::Mixed
        }
    }

    pub fn style(&self) -> Style {
        let (color, marker, label) = match self {
            StyleKey::BuyYes => ("#008f00", Marker::Cross, "Buy YES"),
            StyleKey::SellYes => ("#00c800", Marker::Circle, "Sell YES"),
            StyleKey::BuyNo => ("#d000d0", Marker::Cross, "Buy NO"),
            StyleKey::SellNo => ("#d40000", Marker::Circle, "Sell NO"),
            StyleKey::Mixed => ("#1f77b4", Marker::Circle, "Mixed"),
        };
        Style {
            color,
            marker,
            label,
        }
    }
}

impl Serialize for StyleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.style().serialize(serializer)
    }
}
