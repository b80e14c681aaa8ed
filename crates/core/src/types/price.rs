//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Menu prices are kept as exact decimals; totals are computed with
/// `Decimal` arithmetic so no floating-point drift ever reaches a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g. baht, not satang).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Multiply by a fixed display factor (e.g. the QR payment amount).
    #[must_use]
    pub fn scaled(self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency_code)
    }

    /// Format with two decimal places (e.g. `"฿280.00"`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{rounded:.2}", self.currency_code.symbol())
    }

    /// Format rounded to whole units (e.g. `"฿280"`), as shown in the cart.
    #[must_use]
    pub fn display_whole(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{rounded:.0}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    THB,
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::THB => "฿",
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        let price = Price::new(Decimal::new(2805, 1), CurrencyCode::THB);
        assert_eq!(price.display(), "฿280.50");
        assert_eq!(price.to_string(), "฿280.50");
    }

    #[test]
    fn test_display_whole_rounds_half_up() {
        let price = Price::new(Decimal::new(2805, 1), CurrencyCode::THB);
        assert_eq!(price.display_whole(), "฿281");
    }

    #[test]
    fn test_scaled() {
        let price = Price::new(Decimal::new(1250, 2), CurrencyCode::USD);
        assert_eq!(price.scaled(Decimal::from(35)).display(), "$437.50");
    }
}
