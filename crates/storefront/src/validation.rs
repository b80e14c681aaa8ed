//! Delivery and payment form validation.
//!
//! Validators are pure: they read a form and return every applicable
//! field error at once, never stopping at the first failure. The shape
//! rules themselves live in `thai_orchid_core` (`PhoneNumber`,
//! `CardNumber`, ...); this module maps their errors to the messages the
//! customer sees.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use thai_orchid_core::{
    CardCvv, CardError, CardExpiry, CardNumber, PaymentMethod, PhoneError, PhoneNumber,
};

/// A field or payment method name sent by the client that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}

/// Parse a payment method name as sent by the client.
///
/// # Errors
///
/// Returns [`FieldError::UnknownPaymentMethod`] for anything other than
/// `card`, `qrcode` or `qr_code`.
pub fn parse_payment_method(s: &str) -> Result<PaymentMethod, FieldError> {
    s.parse()
        .map_err(|_| FieldError::UnknownPaymentMethod(s.to_string()))
}

// =============================================================================
// Forms
// =============================================================================

/// Delivery details, edited field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub instructions: String,
}

/// Card details. Ignored entirely when paying by QR code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub card_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryField {
    Name,
    Address,
    Phone,
    Instructions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    CardName,
    CardNumber,
    Expiry,
    Cvv,
}

/// Any editable checkout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Delivery(DeliveryField),
    Payment(PaymentField),
}

impl std::str::FromStr for FormField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => Self::Delivery(DeliveryField::Name),
            "address" => Self::Delivery(DeliveryField::Address),
            "phone" => Self::Delivery(DeliveryField::Phone),
            "instructions" => Self::Delivery(DeliveryField::Instructions),
            "cardName" => Self::Payment(PaymentField::CardName),
            "cardNumber" => Self::Payment(PaymentField::CardNumber),
            "expiry" => Self::Payment(PaymentField::Expiry),
            "cvv" => Self::Payment(PaymentField::Cvv),
            other => return Err(FieldError::UnknownField(other.to_string())),
        })
    }
}

impl DeliveryForm {
    /// Overwrite one field.
    pub fn set(&mut self, field: DeliveryField, value: String) {
        let slot = match field {
            DeliveryField::Name => &mut self.name,
            DeliveryField::Address => &mut self.address,
            DeliveryField::Phone => &mut self.phone,
            DeliveryField::Instructions => &mut self.instructions,
        };
        *slot = value;
    }
}

impl PaymentForm {
    /// Overwrite one field.
    pub fn set(&mut self, field: PaymentField, value: String) {
        let slot = match field {
            PaymentField::CardName => &mut self.card_name,
            PaymentField::CardNumber => &mut self.card_number,
            PaymentField::Expiry => &mut self.expiry,
            PaymentField::Cvv => &mut self.cvv,
        };
        *slot = value;
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Field name → message for one form.
pub type FieldErrors<F> = BTreeMap<F, String>;

/// Validation errors currently shown on the checkout forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub delivery: FieldErrors<DeliveryField>,
    pub payment: FieldErrors<PaymentField>,
}

impl FormErrors {
    /// Drop the message for one field, if any.
    pub fn clear_field(&mut self, field: FormField) {
        match field {
            FormField::Delivery(f) => {
                self.delivery.remove(&f);
            }
            FormField::Payment(f) => {
                self.payment.remove(&f);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delivery.is_empty() && self.payment.is_empty()
    }
}

// =============================================================================
// Validators
// =============================================================================

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate the delivery form, collecting every error.
#[must_use]
pub fn validate_delivery(form: &DeliveryForm) -> FieldErrors<DeliveryField> {
    let mut errors = FieldErrors::new();

    if is_blank(&form.name) {
        errors.insert(DeliveryField::Name, "Name is required".to_string());
    }

    if is_blank(&form.address) {
        errors.insert(DeliveryField::Address, "Address is required".to_string());
    }

    if let Err(e) = PhoneNumber::parse(&form.phone) {
        let message = match e {
            PhoneError::Empty => "Phone number is required",
            PhoneError::WrongLength { .. } => "Please enter a valid phone number",
        };
        errors.insert(DeliveryField::Phone, message.to_string());
    }

    errors
}

/// Validate the payment form for `method`.
///
/// QR code payments always pass without looking at the form.
#[must_use]
pub fn validate_payment(method: PaymentMethod, form: &PaymentForm) -> FieldErrors<PaymentField> {
    let mut errors = FieldErrors::new();
    if method == PaymentMethod::QrCode {
        return errors;
    }

    if is_blank(&form.card_name) {
        errors.insert(PaymentField::CardName, "Name on card is required".to_string());
    }

    if let Err(e) = CardNumber::parse(&form.card_number) {
        errors.insert(
            PaymentField::CardNumber,
            card_message(
                &e,
                "Card number is required",
                "Please enter a valid 16-digit card number",
            ),
        );
    }

    if let Err(e) = CardExpiry::parse(&form.expiry) {
        errors.insert(
            PaymentField::Expiry,
            card_message(&e, "Expiry date is required", "Please use MM/YY format"),
        );
    }

    if let Err(e) = CardCvv::parse(&form.cvv) {
        errors.insert(
            PaymentField::Cvv,
            card_message(&e, "CVV is required", "Please enter a valid CVV"),
        );
    }

    errors
}

fn card_message(error: &CardError, required: &str, invalid: &str) -> String {
    match error {
        CardError::Empty => required.to_string(),
        _ => invalid.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_delivery() -> DeliveryForm {
        DeliveryForm {
            name: "Somchai".to_string(),
            address: "12 Sukhumvit Soi 11, Bangkok".to_string(),
            phone: "081-234-5678".to_string(),
            instructions: String::new(),
        }
    }

    fn valid_card() -> PaymentForm {
        PaymentForm {
            card_name: "Somchai Jaidee".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            expiry: "09/28".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_valid_delivery_passes() {
        assert!(validate_delivery(&valid_delivery()).is_empty());
    }

    #[test]
    fn test_delivery_collects_all_errors() {
        let form = DeliveryForm {
            name: String::new(),
            address: String::new(),
            phone: "123".to_string(),
            instructions: String::new(),
        };
        let errors = validate_delivery(&form);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[&DeliveryField::Name], "Name is required");
        assert_eq!(errors[&DeliveryField::Address], "Address is required");
        assert_eq!(
            errors[&DeliveryField::Phone],
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn test_delivery_whitespace_is_blank() {
        let form = DeliveryForm {
            name: "  ".to_string(),
            phone: " ".to_string(),
            ..valid_delivery()
        };
        let errors = validate_delivery(&form);
        assert_eq!(errors[&DeliveryField::Name], "Name is required");
        assert_eq!(errors[&DeliveryField::Phone], "Phone number is required");
        assert!(!errors.contains_key(&DeliveryField::Address));
    }

    #[test]
    fn test_instructions_are_optional() {
        let form = DeliveryForm {
            instructions: String::new(),
            ..valid_delivery()
        };
        assert!(validate_delivery(&form).is_empty());
    }

    #[test]
    fn test_valid_card_passes() {
        assert!(validate_payment(PaymentMethod::Card, &valid_card()).is_empty());
    }

    #[test]
    fn test_qr_code_ignores_form() {
        let empty = PaymentForm::default();
        assert!(validate_payment(PaymentMethod::QrCode, &empty).is_empty());
        let garbage = PaymentForm {
            card_name: String::new(),
            card_number: "12".to_string(),
            expiry: "soon".to_string(),
            cvv: "x".to_string(),
        };
        assert!(validate_payment(PaymentMethod::QrCode, &garbage).is_empty());
    }

    #[test]
    fn test_empty_card_form_requires_everything() {
        let errors = validate_payment(PaymentMethod::Card, &PaymentForm::default());
        assert_eq!(errors[&PaymentField::CardName], "Name on card is required");
        assert_eq!(errors[&PaymentField::CardNumber], "Card number is required");
        assert_eq!(errors[&PaymentField::Expiry], "Expiry date is required");
        assert_eq!(errors[&PaymentField::Cvv], "CVV is required");
    }

    #[test]
    fn test_card_number_length() {
        let dashed = PaymentForm {
            card_number: "4111-1111-1111-1111".to_string(),
            ..valid_card()
        };
        assert!(validate_payment(PaymentMethod::Card, &dashed).is_empty());

        let short = PaymentForm {
            card_number: "4111-1111-1111".to_string(),
            ..valid_card()
        };
        let errors = validate_payment(PaymentMethod::Card, &short);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[&PaymentField::CardNumber],
            "Please enter a valid 16-digit card number"
        );
    }

    #[test]
    fn test_expiry_and_cvv_format() {
        let form = PaymentForm {
            expiry: "0928".to_string(),
            cvv: "12".to_string(),
            ..valid_card()
        };
        let errors = validate_payment(PaymentMethod::Card, &form);
        assert_eq!(errors[&PaymentField::Expiry], "Please use MM/YY format");
        assert_eq!(errors[&PaymentField::Cvv], "Please enter a valid CVV");

        let four_digit_cvv = PaymentForm {
            cvv: "1234".to_string(),
            ..valid_card()
        };
        assert!(validate_payment(PaymentMethod::Card, &four_digit_cvv).is_empty());
    }

    #[test]
    fn test_form_field_from_str() {
        assert_eq!(
            "cardNumber".parse::<FormField>(),
            Ok(FormField::Payment(PaymentField::CardNumber))
        );
        assert_eq!(
            "instructions".parse::<FormField>(),
            Ok(FormField::Delivery(DeliveryField::Instructions))
        );
        assert_eq!(
            "email".parse::<FormField>(),
            Err(FieldError::UnknownField("email".to_string()))
        );
    }

    #[test]
    fn test_clear_field() {
        let mut errors = FormErrors {
            delivery: validate_delivery(&DeliveryForm::default()),
            payment: validate_payment(PaymentMethod::Card, &PaymentForm::default()),
        };
        errors.clear_field(FormField::Delivery(DeliveryField::Phone));
        errors.clear_field(FormField::Payment(PaymentField::Cvv));
        assert!(!errors.delivery.contains_key(&DeliveryField::Phone));
        assert!(errors.delivery.contains_key(&DeliveryField::Name));
        assert!(!errors.payment.contains_key(&PaymentField::Cvv));
        assert_eq!(errors.payment.len(), 3);
    }

    #[test]
    fn test_errors_serialize_with_field_names() {
        let errors = FormErrors {
            delivery: validate_delivery(&DeliveryForm::default()),
            payment: FieldErrors::new(),
        };
        let json = serde_json::to_value(&errors).unwrap_or_default();
        assert_eq!(json["delivery"]["phone"], "Phone number is required");
        assert_eq!(json["payment"], serde_json::json!({}));
    }

    #[test]
    fn test_parse_payment_method() {
        assert_eq!(parse_payment_method("qrcode"), Ok(PaymentMethod::QrCode));
        assert_eq!(parse_payment_method("card"), Ok(PaymentMethod::Card));
        assert_eq!(
            parse_payment_method("cash"),
            Err(FieldError::UnknownPaymentMethod("cash".to_string()))
        );
    }
}
