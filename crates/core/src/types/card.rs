//! Payment card field types.
//!
//! Payment is simulated: these types only check the shape of what the
//! customer typed. No Luhn check, no expiry-in-the-future check.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::digits_only;

/// `MM/YY` in ASCII digits, nothing before or after.
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").expect("Invalid regex"));

/// Errors that can occur when parsing card fields.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// The input is empty or whitespace.
    #[error("value cannot be empty")]
    Empty,
    /// The card number does not have sixteen digits.
    #[error("card number must have 16 digits (got {0})")]
    NumberLength(usize),
    /// The expiry is not in `MM/YY` form.
    #[error("expiry must be in MM/YY format")]
    ExpiryFormat,
    /// The CVV does not have three or four digits.
    #[error("CVV must have 3 or 4 digits (got {0})")]
    CvvLength(usize),
}

fn non_blank(s: &str) -> Result<(), CardError> {
    if s.trim().is_empty() {
        Err(CardError::Empty)
    } else {
        Ok(())
    }
}

/// A sixteen-digit card number, stored without separators.
///
/// ```
/// use thai_orchid_core::CardNumber;
///
/// assert!(CardNumber::parse("4111-1111-1111-1111").is_ok());
/// assert!(CardNumber::parse("4111-1111-1111").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    /// Number of digits in a valid card number.
    pub const DIGITS: usize = 16;

    /// Parse a card number, ignoring spaces and dashes.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Empty`] for blank input and
    /// [`CardError::NumberLength`] unless exactly sixteen digits remain.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        non_blank(s)?;
        let digits = digits_only(s);
        if digits.len() != Self::DIGITS {
            return Err(CardError::NumberLength(digits.len()));
        }
        Ok(Self(digits))
    }
}

/// A card expiry in `MM/YY` form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CardExpiry(String);

impl CardExpiry {
    /// Parse an expiry. The raw input must be exactly `DD/DD`.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Empty`] for blank input and
    /// [`CardError::ExpiryFormat`] for anything else that is not `MM/YY`.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        non_blank(s)?;
        if !EXPIRY_RE.is_match(s) {
            return Err(CardError::ExpiryFormat);
        }
        Ok(Self(s.to_owned()))
    }
}

/// A three- or four-digit card verification value.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CardCvv(String);

impl CardCvv {
    /// Parse a CVV, ignoring any non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::Empty`] for blank input and
    /// [`CardError::CvvLength`] unless three or four digits remain.
    pub fn parse(s: &str) -> Result<Self, CardError> {
        non_blank(s)?;
        let digits = digits_only(s);
        if !(3..=4).contains(&digits.len()) {
            return Err(CardError::CvvLength(digits.len()));
        }
        Ok(Self(digits))
    }
}

impl std::fmt::Debug for CardCvv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CardCvv([REDACTED])")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number() {
        let number = CardNumber::parse("4111 1111 1111 1234").unwrap();
        assert_eq!(number, CardNumber::parse("4111-1111-1111-1234").unwrap());
        assert_eq!(CardNumber::parse(" "), Err(CardError::Empty));
        assert_eq!(
            CardNumber::parse("4111-1111-1111"),
            Err(CardError::NumberLength(12))
        );
    }

    #[test]
    fn test_expiry_is_strict() {
        assert!(CardExpiry::parse("09/27").is_ok());
        assert_eq!(CardExpiry::parse("9/27"), Err(CardError::ExpiryFormat));
        assert_eq!(CardExpiry::parse("09/2027"), Err(CardError::ExpiryFormat));
        assert_eq!(CardExpiry::parse(" 09/27"), Err(CardError::ExpiryFormat));
        assert_eq!(CardExpiry::parse(""), Err(CardError::Empty));
        // Thai and Arabic-Indic numerals
        assert_eq!(CardExpiry::parse("๐๙/๒๘"), Err(CardError::ExpiryFormat));
        assert_eq!(CardExpiry::parse("٠٩/٢٨"), Err(CardError::ExpiryFormat));
    }

    #[test]
    fn test_cvv() {
        assert!(CardCvv::parse("123").is_ok());
        assert!(CardCvv::parse("1234").is_ok());
        assert_eq!(CardCvv::parse("12"), Err(CardError::CvvLength(2)));
        assert_eq!(CardCvv::parse("12345"), Err(CardError::CvvLength(5)));
    }

    #[test]
    fn test_cvv_debug_is_redacted() {
        let cvv = CardCvv::parse("987").unwrap();
        assert!(!format!("{cvv:?}").contains("987"));
    }
}
