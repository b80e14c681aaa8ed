//! Delivery phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::digits_only;

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input is empty or whitespace.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not contain exactly ten digits.
    #[error("phone number must have {expected} digits (got {actual})")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digits found in the input.
        actual: usize,
    },
}

/// A ten-digit delivery phone number.
///
/// Formatting characters are accepted and discarded: `"(081) 234-5678"` and
/// `"0812345678"` parse to the same value.
///
/// ## Examples
///
/// ```
/// use thai_orchid_core::PhoneNumber;
///
/// assert_eq!(PhoneNumber::parse("081-234-5678").unwrap().as_str(), "0812345678");
/// assert!(PhoneNumber::parse("").is_err());
/// assert!(PhoneNumber::parse("123").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 10;

    /// Parse a `PhoneNumber` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, or if it does not contain
    /// exactly ten digits once non-digits are removed.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.trim().is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = digits_only(s);
        if digits.len() != Self::DIGITS {
            return Err(PhoneError::WrongLength {
                expected: Self::DIGITS,
                actual: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_formatting() {
        let phone = PhoneNumber::parse("(081) 234 5678").unwrap();
        assert_eq!(phone.as_str(), "0812345678");
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            PhoneNumber::parse("123"),
            Err(PhoneError::WrongLength {
                expected: 10,
                actual: 3
            })
        );
        assert!(PhoneNumber::parse("081234567890").is_err());
    }
}
