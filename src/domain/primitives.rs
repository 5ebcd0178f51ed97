//! Domain primitives: TimeSec, Outcome, OrderType, ResolvedSide, SideSelection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade time in seconds since Unix epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSec(pub i64);

impl TimeSec {
    pub fn new(secs: i64) -> Self {
        TimeSec(secs)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// One of the two mutually exclusive outcomes of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Up,
    Down,
}

impl Outcome {
    /// Map a raw outcome label onto a side of the market.
    ///
    /// Missing or blank labels count as Up. Any label that is not recognisably
    /// Up is booked on the Down side.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()) {
            None => Outcome::Up,
            Some(l) if l.is_empty() || l == "up" || l == "yes" => Outcome::Up,
            Some(_) => Outcome::Down,
        }
    }

    /// The resolution under which holders of this outcome are paid.
    pub fn resolved_side(&self) -> ResolvedSide {
        match self {
            Outcome::Up => ResolvedSide::Yes,
            Outcome::Down => ResolvedSide::No,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Up => f.pad("Up"),
            Outcome::Down => f.pad("Down"),
        }
    }
}

/// Order type of an executed trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[default]
    Buy,
    Sell,
}

impl OrderType {
    /// Only an explicit `SELL` (any case) is a sell; everything else buys.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(l) if l.trim().eq_ignore_ascii_case("sell") => OrderType::Sell,
            _ => OrderType::Buy,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Buy => f.pad("Buy"),
            OrderType::Sell => f.pad("Sell"),
        }
    }
}

/// The side a market settled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolvedSide {
    Yes,
    No,
}

impl ResolvedSide {
    pub fn opposite(&self) -> Self {
        match self {
            ResolvedSide::Yes => ResolvedSide::No,
            ResolvedSide::No => ResolvedSide::Yes,
        }
    }
}

impl fmt::Display for ResolvedSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedSide::Yes => f.pad("YES"),
            ResolvedSide::No => f.pad("NO"),
        }
    }
}

/// A caller's resolved-side choice: explicit, or inferred from the trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideSelection {
    Explicit(ResolvedSide),
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideSelectionParseError(pub String);

impl fmt::Display for SideSelectionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid resolved side '{}'. Must be YES, NO, or AUTO",
            self.0
        )
    }
}

impl std::error::Error for SideSelectionParseError {}

impl FromStr for SideSelection {
    type Err = SideSelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YES" => Ok(SideSelection::Explicit(ResolvedSide::Yes)),
            "NO" => Ok(SideSelection::Explicit(ResolvedSide::No)),
            "AUTO" => Ok(SideSelection::Auto),
            _ => Err(SideSelectionParseError(s.to_string())),
        }
    }
}
