//! Amount type for envelope balances
//!
//! Balances are plain floating-point values on the wire. Query parameters
//! arrive as text, so every amount goes through [`Amount::parse`], which
//! accepts the whole trimmed string as a finite decimal number or reports
//! exactly why it could not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A monetary amount, serialized as a bare JSON number
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Wrap a raw value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// The raw floating-point value
    pub const fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Parse an amount from query text
    ///
    /// Surrounding whitespace is ignored. The remainder must be a complete
    /// decimal number ("12abc" is rejected, not truncated) and must be finite.
    ///
    /// # Examples
    /// ```
    /// use envelope_api::models::Amount;
    /// assert_eq!(Amount::parse(" 10.5 ").unwrap().value(), 10.5);
    /// assert!(Amount::parse("ten").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let value: f64 = s
            .parse()
            .map_err(|_| AmountError::NotANumber(s.to_string()))?;

        if !value.is_finite() {
            return Err(AmountError::NotFinite(s.to_string()));
        }

        Ok(Self(value))
    }

    /// Parse an optional query parameter, treating absence as an error
    pub fn from_param(param: Option<&str>) -> Result<Self, AmountError> {
        match param {
            Some(s) => Self::parse(s),
            None => Err(AmountError::Missing),
        }
    }

    /// Compare with another amount, tolerating accumulated rounding error
    #[cfg(test)]
    pub fn approx_eq(&self, other: Amount) -> bool {
        let scale = self.0.abs().max(other.0.abs()).max(1.0);
        (self.0 - other.0).abs() <= 1e-9 * scale
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${:.2}", self.0.abs())
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

/// Why a piece of query text is not a usable amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The parameter was not supplied at all
    Missing,
    /// The parameter was supplied but blank
    Empty,
    /// The text is not a decimal number
    NotANumber(String),
    /// The text parsed to infinity or NaN
    NotFinite(String),
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Missing => write!(f, "Amount is required"),
            AmountError::Empty => write!(f, "Amount is empty"),
            AmountError::NotANumber(s) => write!(f, "Invalid amount format: {}", s),
            AmountError::NotFinite(s) => write!(f, "Amount must be finite: {}", s),
        }
    }
}

impl std::error::Error for AmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_decimal_forms() {
        assert_eq!(Amount::parse("100").unwrap().value(), 100.0);
        assert_eq!(Amount::parse("10.50").unwrap().value(), 10.5);
        assert_eq!(Amount::parse("  7 ").unwrap().value(), 7.0);
        assert_eq!(Amount::parse(".5").unwrap().value(), 0.5);
        assert_eq!(Amount::parse("1e3").unwrap().value(), 1000.0);
        assert_eq!(Amount::parse("-20").unwrap().value(), -20.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Amount::parse(""), Err(AmountError::Empty));
        assert_eq!(Amount::parse("   "), Err(AmountError::Empty));
        assert!(matches!(Amount::parse("abc"), Err(AmountError::NotANumber(_))));
        assert!(matches!(Amount::parse("12abc"), Err(AmountError::NotANumber(_))));
        assert!(matches!(Amount::parse("$12"), Err(AmountError::NotANumber(_))));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(matches!(Amount::parse("inf"), Err(AmountError::NotFinite(_))));
        assert!(matches!(Amount::parse("NaN"), Err(AmountError::NotFinite(_))));
        assert!(matches!(Amount::parse("1e400"), Err(AmountError::NotFinite(_))));
    }

    #[test]
    fn test_from_param_missing() {
        assert_eq!(Amount::from_param(None), Err(AmountError::Missing));
        assert_eq!(Amount::from_param(Some("3")).unwrap().value(), 3.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(10.5).to_string(), "$10.50");
        assert_eq!(Amount::zero().to_string(), "$0.00");
        assert_eq!(Amount::new(-3.0).to_string(), "-$3.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let mut a = Amount::new(10.0);
        a += Amount::new(2.5);
        a -= Amount::new(0.5);
        assert_eq!(a.value(), 12.0);

        let total: Amount = [0.1, 0.2, 0.3].into_iter().map(Amount::new).sum();
        assert!(total.approx_eq(Amount::new(0.6)));
        assert!(!total.approx_eq(Amount::new(0.7)));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Amount::new(1000.0)).unwrap();
        assert_eq!(json, "1000.0");
    }
}
