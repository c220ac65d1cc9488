//! Strictly positive quantity type for movement detail lines.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input string is not a number.
    #[error("quantity must be a number")]
    NotANumber,
    /// The value is zero or negative.
    #[error("quantity must be greater than zero")]
    NotPositive,
}

/// A strictly positive quantity.
///
/// The inventory backend rejects non-positive quantities, but validation must
/// happen before any request is dispatched, so the invariant is enforced at
/// construction time. Decimal-based so fractional units (kg, liters) survive
/// round trips without float drift.
///
/// ## Examples
///
/// ```
/// use bodega_core::Quantity;
///
/// assert!(Quantity::parse("5").is_ok());
/// assert!(Quantity::parse("2.5").is_ok());
///
/// assert!(Quantity::parse("0").is_err());
/// assert!(Quantity::parse("-1").is_err());
/// assert!(Quantity::parse("five").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a `Quantity` from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] if the value is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, QuantityError> {
        if value <= Decimal::ZERO {
            return Err(QuantityError::NotPositive);
        }
        Ok(Self(value))
    }

    /// Parse a `Quantity` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotANumber`] if the input does not parse as a
    /// decimal, or [`QuantityError::NotPositive`] if it is zero or negative.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let value = Decimal::from_str(s.trim()).map_err(|_| QuantityError::NotANumber)?;
        Self::new(value)
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = QuantityError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_values_accepted() {
        assert_eq!(
            Quantity::parse("5").map(|q| q.to_string()),
            Ok("5".to_string())
        );
        assert_eq!(
            Quantity::parse(" 2.50 ").map(|q| q.to_string()),
            Ok("2.5".to_string())
        );
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        assert_eq!(Quantity::parse("0"), Err(QuantityError::NotPositive));
        assert_eq!(Quantity::parse("-3"), Err(QuantityError::NotPositive));
        assert_eq!(Quantity::parse("0.00"), Err(QuantityError::NotPositive));
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert_eq!(Quantity::parse(""), Err(QuantityError::NotANumber));
        assert_eq!(Quantity::parse("five"), Err(QuantityError::NotANumber));
        assert_eq!(Quantity::parse("1,5"), Err(QuantityError::NotANumber));
    }

    #[test]
    fn test_serde_rejects_non_positive() {
        let ok: Result<Quantity, _> = serde_json::from_str("\"5\"");
        assert!(ok.is_ok());
        let bad: Result<Quantity, _> = serde_json::from_str("\"0\"");
        assert!(bad.is_err());
    }
}
