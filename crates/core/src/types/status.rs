//! Status enums for the checkout flow.

use serde::{Deserialize, Serialize};

/// The current step of the checkout sequence.
///
/// Phases are strictly ordered; transitions move one step forward or back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Cart,
    Delivery,
    Payment,
    Confirmation,
}

impl CheckoutPhase {
    /// The next phase, or `None` at the end of the sequence.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Cart => Some(Self::Delivery),
            Self::Delivery => Some(Self::Payment),
            Self::Payment => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// The previous phase, or `None` at the start of the sequence.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Cart => None,
            Self::Delivery => Some(Self::Cart),
            Self::Payment => Some(Self::Delivery),
            Self::Confirmation => Some(Self::Payment),
        }
    }
}

impl std::fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cart => write!(f, "cart"),
            Self::Delivery => write!(f, "delivery"),
            Self::Payment => write!(f, "payment"),
            Self::Confirmation => write!(f, "confirmation"),
        }
    }
}

/// How the customer pays on the payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    QrCode,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::QrCode => write!(f, "qr_code"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "qrcode" | "qr_code" => Ok(Self::QrCode),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_sequence_is_linear() {
        let mut phase = CheckoutPhase::Cart;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            assert_eq!(next.previous(), Some(phase));
            phase = next;
            seen.push(phase);
        }
        assert_eq!(
            seen,
            [
                CheckoutPhase::Cart,
                CheckoutPhase::Delivery,
                CheckoutPhase::Payment,
                CheckoutPhase::Confirmation,
            ]
        );
        assert_eq!(CheckoutPhase::Cart.previous(), None);
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert_eq!("qrcode".parse::<PaymentMethod>(), Ok(PaymentMethod::QrCode));
        assert!("cash".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::QrCode.to_string(), "qr_code");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&CheckoutPhase::Confirmation).unwrap(),
            "\"confirmation\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::QrCode).unwrap(),
            "\"qr_code\""
        );
        assert_eq!(
            serde_json::to_value(PaymentMethod::QrCode).unwrap(),
            PaymentMethod::QrCode.to_string()
        );
    }
}
