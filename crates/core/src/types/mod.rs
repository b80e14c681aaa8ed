//! Core types for Thai Orchid.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod card;
pub mod id;
pub mod phone;
pub mod price;
pub mod reference;
pub mod status;

pub use card::{CardCvv, CardError, CardExpiry, CardNumber};
pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use price::{CurrencyCode, Price};
pub use reference::{OrderReference, OrderReferenceError};
pub use status::*;

/// Strip every non-ASCII-digit character from `input`.
///
/// Phone and card inputs are accepted with spaces, dashes or parentheses;
/// only the digits count towards their length rules.
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
