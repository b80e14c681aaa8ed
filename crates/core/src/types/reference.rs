//! Order reference shown on the QR payment panel.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building an [`OrderReference`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderReferenceError {
    /// The number does not have exactly eight digits.
    #[error("order reference must be an 8-digit number (got {0})")]
    OutOfRange(u32),
    /// The string is not a decimal number.
    #[error("order reference must be numeric: {0}")]
    NotNumeric(String),
}

/// An 8-digit numeric order reference (`10000000..=99999999`).
///
/// References are display-only: they are neither persisted nor verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct OrderReference(u32);

impl OrderReference {
    /// Smallest valid reference.
    pub const MIN: u32 = 10_000_000;
    /// Largest valid reference.
    pub const MAX: u32 = 99_999_999;

    /// Create a reference from a number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderReferenceError::OutOfRange`] unless the number has
    /// exactly eight digits.
    pub fn from_number(n: u32) -> Result<Self, OrderReferenceError> {
        if n < Self::MIN || n > Self::MAX {
            return Err(OrderReferenceError::OutOfRange(n));
        }
        Ok(Self(n))
    }

    /// Get the underlying number.
    #[must_use]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderReference {
    type Err = OrderReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .parse::<u32>()
            .map_err(|_| OrderReferenceError::NotNumeric(s.to_owned()))?;
        Self::from_number(n)
    }
}

impl From<OrderReference> for String {
    fn from(reference: OrderReference) -> Self {
        reference.to_string()
    }
}

impl TryFrom<String> for OrderReference {
    type Error = OrderReferenceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(OrderReference::from_number(10_000_000).is_ok());
        assert!(OrderReference::from_number(99_999_999).is_ok());
        assert_eq!(
            OrderReference::from_number(9_999_999),
            Err(OrderReferenceError::OutOfRange(9_999_999))
        );
        assert!(OrderReference::from_number(100_000_000).is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let reference = OrderReference::from_number(48_213_907).unwrap();
        assert_eq!(serde_json::to_string(&reference).unwrap(), "\"48213907\"");
        let back: OrderReference = serde_json::from_str("\"48213907\"").unwrap();
        assert_eq!(back, reference);
        assert!(serde_json::from_str::<OrderReference>("\"abc\"").is_err());
    }
}
