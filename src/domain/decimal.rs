//! Exact decimal numeric type for prices, share counts and dollar amounts.
//!
//! Trade prices arrive as probabilities (e.g. `0.35`); keeping them in
//! `rust_decimal` means `cost == price × shares` and the exposure sums hold
//! exactly instead of drifting like binary floats would.

use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exact decimal value used throughout the analysis engine.
///
/// Serializes to a JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parse a plain or scientific-notation number (`"0.35"`, `"3.5e-1"`).
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        let s = s.trim();
        RustDecimal::from_str(s)
            .or_else(|_| RustDecimal::from_scientific(s))
            .map(Decimal)
    }

    /// Convert a JSON number or numeric string. Returns `None` for anything else.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            // serde_json prints the shortest round-tripping form, so 0.35 stays 0.35.
            serde_json::Value::Number(n) => Self::parse(&n.to_string()).ok(),
            serde_json::Value::String(s) => Self::parse(s).ok(),
            _ => None,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }

    /// Canonical string without trailing zeros or exponent.
    pub fn to_canonical_string(&self) -> String {
        self.0.normalize().to_string()
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    pub fn one() -> Self {
        Decimal(RustDecimal::ONE)
    }

    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    /// `self + rhs`, clamped to the representable range.
    pub fn saturating_add(self, rhs: Decimal) -> Self {
        Decimal(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(self, rhs: Decimal) -> Self {
        Decimal(self.0.saturating_sub(rhs.0))
    }

    /// `self × rhs`, clamped to the representable range.
    pub fn saturating_mul(self, rhs: Decimal) -> Self {
        Decimal(self.0.saturating_mul(rhs.0))
    }

    /// Whether the value lies in `[low, high]`.
    pub fn within(&self, low: Decimal, high: Decimal) -> bool {
        *self >= low && *self <= high
    }

    /// Probability-scale price (0..=1) expressed in cents (0..=100).
    pub fn to_cents(self) -> Self {
        self * Self::hundred()
    }

    /// Cents (0..=100) back to probability scale (0..=1).
    pub fn cents_to_probability(self) -> Self {
        self / Self::hundred()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:.2}` in report output rounds half-even; bare `{}` is canonical.
        match f.precision() {
            Some(dp) => write!(f, "{:.*}", dp, self.0.round_dp(dp as u32)),
            None => write!(f, "{}", self.to_canonical_string()),
        }
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

// Add, Sub and Mul saturate at the representable bounds instead of panicking.
impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        self.saturating_add(rhs)
    }
}

impl std::ops::AddAssign for Decimal {
    fn add_assign(&mut self, rhs: Decimal) {
        *self = self.saturating_add(rhs);
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        self.saturating_sub(rhs)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        self.saturating_mul(rhs)
    }
}

impl std::ops::Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 / rhs.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl std::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Decimal {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}
