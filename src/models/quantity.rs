//! Milk quantity in litres, stored as millilitres

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use super::money::{parse_scaled, Money};

/// A volume of milk stored as whole millilitres
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub const fn from_ml(ml: i64) -> Self {
        Self(ml)
    }

    pub const fn from_litres(litres: i64) -> Self {
        Self(litres * 1000)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn ml(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Quantity in litres as a float, for display and CSV only
    pub fn as_litres_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Parse decimal litres: "2", "1.5", "0.250", "-1"
    pub fn parse(s: &str) -> Result<Self, QuantityParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest
            .strip_suffix('L')
            .or_else(|| rest.strip_suffix('l'))
            .unwrap_or(rest)
            .trim();

        let ml = parse_scaled(rest, 3)
            .ok_or_else(|| QuantityParseError::InvalidFormat(trimmed.to_string()))?;
        Ok(Self(if negative { -ml } else { ml }))
    }

    /// Sum of two quantities, `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Price of this quantity at `rate` per litre, rounded half away from
    /// zero to the nearest paisa. `None` on overflow.
    pub fn price_at(&self, rate: Money) -> Option<Money> {
        let product = i128::from(self.0) * i128::from(rate.paise());
        let half = if product < 0 { -500 } else { 500 };
        let paise = (product + half) / 1000;
        i64::try_from(paise).ok().map(Money::from_paise)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Quantity {
    /// Shortest litre representation: "2", "1.5", "0.25"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / 1000;
        let frac = abs % 1000;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::iter::Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

/// Error type for quantity parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityParseError {
    InvalidFormat(String),
}

impl fmt::Display for QuantityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid quantity: {}", s),
        }
    }
}

impl std::error::Error for QuantityParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Quantity::parse("2").unwrap().ml(), 2000);
        assert_eq!(Quantity::parse("1.5").unwrap().ml(), 1500);
        assert_eq!(Quantity::parse("0.25").unwrap().ml(), 250);
        assert_eq!(Quantity::parse("1.5L").unwrap().ml(), 1500);
        assert_eq!(Quantity::parse("-1").unwrap().ml(), -1000);
        assert!(Quantity::parse("two").is_err());
        assert!(Quantity::parse("1.2345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::from_ml(2000).to_string(), "2");
        assert_eq!(Quantity::from_ml(1500).to_string(), "1.5");
        assert_eq!(Quantity::from_ml(250).to_string(), "0.25");
        assert_eq!(Quantity::from_ml(1).to_string(), "0.001");
    }

    #[test]
    fn test_price_at() {
        let rate = Money::from_rupees(50);
        assert_eq!(Quantity::from_litres(2).price_at(rate), Some(Money::from_rupees(100)));
        assert_eq!(
            Quantity::from_ml(1500).price_at(Money::from_paise(4550)),
            Some(Money::from_paise(6825))
        );
        // 0.333 L at ₹45 = 14.985 → ₹14.99
        assert_eq!(
            Quantity::from_ml(333).price_at(Money::from_rupees(45)),
            Some(Money::from_paise(1499))
        );
    }

    #[test]
    fn test_price_overflow() {
        assert!(Quantity::from_ml(i64::MAX)
            .price_at(Money::from_paise(i64::MAX))
            .is_none());
    }

    #[test]
    fn test_checked_add() {
        let huge = Quantity::parse("5000000000000000").unwrap();
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(
            Quantity::from_ml(500).checked_add(Quantity::from_litres(1)),
            Some(Quantity::from_ml(1500))
        );
    }
}
