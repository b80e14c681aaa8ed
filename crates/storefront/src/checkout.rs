//! Checkout session: the single state container for one customer.
//!
//! A [`CheckoutSession`] owns the cart, the checkout phase, both forms, their
//! validation errors, the payment method and the order reference. It is only
//! ever mutated through the intent methods below, each of which runs to
//! completion synchronously; the rendering layer reads
//! [`CheckoutSession::snapshot`] and never touches state directly.
//!
//! # Phase transitions
//!
//! ```text
//!           advance (cart non-empty)   advance (delivery valid)   advance (card valid | QR)
//!   Cart ───────────────────────► Delivery ──────────────► Payment ──────────────► Confirmation
//!    ▲  ◄─────────────────────────        ◄──────────────         ◄──────────────      │
//!    │            retreat                      retreat                  retreat         │
//!    └──────────────────────────── acknowledge (clear cart, close) ────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use thai_orchid_core::{
    CheckoutPhase, CurrencyCode, MenuItemId, OrderReference, PaymentMethod, Price,
};

use crate::cart::{Cart, CartEvent, CartLine};
use crate::catalog::Catalog;
use crate::notifications::{DEFAULT_DURATION, Notification, NotificationSink};
use crate::validation::{
    DeliveryForm, FormErrors, FormField, PaymentForm, validate_delivery, validate_payment,
};

/// A transition attempted against an unmet precondition.
///
/// Always recoverable: the session stays where it was and the customer is
/// told why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardRejection {
    #[error("cart is empty")]
    CartEmpty,
    #[error("delivery details are incomplete")]
    InvalidDelivery,
    #[error("payment details are incomplete")]
    InvalidPayment,
    #[error("payment method can only be chosen on the payment step (currently {0})")]
    PaymentMethodLocked(CheckoutPhase),
}

/// Result of a phase intent that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Moved {
        from: CheckoutPhase,
        to: CheckoutPhase,
    },
    /// Nothing to do from this phase (e.g. retreat from the cart).
    Stayed { phase: CheckoutPhase },
}

/// Per-deployment knobs for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Display time for cart add/remove notifications.
    pub cart_notification: Duration,
    /// Display time for every other notification.
    pub default_notification: Duration,
    /// Factor applied to the total for the QR payment amount.
    pub qr_multiplier: Decimal,
    pub currency: CurrencyCode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cart_notification: Duration::from_millis(2000),
            default_notification: DEFAULT_DURATION,
            qr_multiplier: Decimal::from(35),
            currency: CurrencyCode::THB,
        }
    }
}

/// State of one customer's storefront visit.
pub struct CheckoutSession {
    catalog: Arc<Catalog>,
    notifier: Arc<dyn NotificationSink>,
    settings: SessionSettings,
    cart: Cart,
    phase: CheckoutPhase,
    is_open: bool,
    delivery: DeliveryForm,
    payment: PaymentForm,
    errors: FormErrors,
    payment_method: PaymentMethod,
    order_reference: OrderReference,
}

impl std::fmt::Debug for CheckoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSession")
            .field("phase", &self.phase)
            .field("is_open", &self.is_open)
            .field("cart_lines", &self.cart.len())
            .field("payment_method", &self.payment_method)
            .field("order_reference", &self.order_reference)
            .finish_non_exhaustive()
    }
}

fn generate_reference() -> OrderReference {
    let n = rand::rng().random_range(OrderReference::MIN..=OrderReference::MAX);
    // The range is exactly the valid domain.
    OrderReference::from_number(n).unwrap_or_else(|_| unreachable!("reference in range"))
}

impl CheckoutSession {
    /// Start an empty session.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        notifier: Arc<dyn NotificationSink>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            catalog,
            notifier,
            settings,
            cart: Cart::new(),
            phase: CheckoutPhase::Cart,
            is_open: false,
            delivery: DeliveryForm::default(),
            payment: PaymentForm::default(),
            errors: FormErrors::default(),
            payment_method: PaymentMethod::default(),
            order_reference: generate_reference(),
        }
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn notify_cart(&self, event: CartEvent) {
        let notification = match event {
            CartEvent::Added { item_name } => Notification::new(
                "Added to cart",
                format!("{item_name} has been added to your cart."),
            ),
            CartEvent::Removed { item_name } => Notification::new(
                "Removed from cart",
                format!("{item_name} has been removed from your cart."),
            ),
        };
        self.notify(notification.with_duration(self.settings.cart_notification));
    }

    fn notify_default(&self, notification: Notification) {
        self.notify(notification.with_duration(self.settings.default_notification));
    }

    // =========================================================================
    // Cart intents
    // =========================================================================

    /// Add one unit of the catalog item `id`.
    ///
    /// Ids missing from the catalog are ignored. Returns whether the cart
    /// changed.
    pub fn add_item(&mut self, id: &MenuItemId) -> bool {
        let Some(item) = self.catalog.get(id) else {
            debug!(%id, "add_item: not in catalog, ignoring");
            return false;
        };
        let event = self.cart.add_item(item);
        self.notify_cart(event);
        true
    }

    /// Remove one unit of `id` from the cart.
    ///
    /// Ids not in the cart are ignored. Returns whether the cart changed.
    pub fn remove_one_unit(&mut self, id: &MenuItemId) -> bool {
        match self.cart.remove_one_unit(id) {
            Some(event) => {
                self.notify_cart(event);
                true
            }
            None => {
                debug!(%id, "remove_one_unit: not in cart, ignoring");
                false
            }
        }
    }

    // =========================================================================
    // Checkout view
    // =========================================================================

    /// Show the checkout view, always starting from the cart step.
    pub fn open_checkout(&mut self) {
        self.is_open = true;
        self.phase = CheckoutPhase::Cart;
        self.order_reference = generate_reference();
        debug!(reference = %self.order_reference, "Checkout opened");
    }

    /// Hide the checkout view. The phase is reset on the next open.
    pub fn close_checkout(&mut self) {
        self.is_open = false;
    }

    /// Cart-icon behaviour: flip visibility, landing on the cart step.
    pub fn toggle_checkout(&mut self) {
        if self.is_open {
            self.close_checkout();
            self.phase = CheckoutPhase::Cart;
        } else {
            self.open_checkout();
        }
    }

    // =========================================================================
    // Phase intents
    // =========================================================================

    /// Move one step forward if the current step's guard holds.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardRejection`] (after notifying the customer and, for
    /// form steps, populating the form errors) when the guard fails.
    pub fn advance(&mut self) -> Result<Transition, GuardRejection> {
        let from = self.phase;
        match from {
            CheckoutPhase::Cart => {
                if self.cart.is_empty() {
                    self.notify_default(
                        Notification::new(
                            "Cart is empty",
                            "Please add items to your cart before proceeding to checkout.",
                        )
                        .destructive(),
                    );
                    return Err(GuardRejection::CartEmpty);
                }
            }
            CheckoutPhase::Delivery => {
                self.errors.delivery = validate_delivery(&self.delivery);
                if !self.errors.delivery.is_empty() {
                    self.notify_default(
                        Notification::new(
                            "Missing information",
                            "Please fill in all required fields.",
                        )
                        .destructive(),
                    );
                    return Err(GuardRejection::InvalidDelivery);
                }
            }
            CheckoutPhase::Payment => {
                self.errors.payment = validate_payment(self.payment_method, &self.payment);
                if !self.errors.payment.is_empty() {
                    self.notify_default(
                        Notification::new(
                            "Missing information",
                            "Please fill in all required payment fields.",
                        )
                        .destructive(),
                    );
                    return Err(GuardRejection::InvalidPayment);
                }
            }
            CheckoutPhase::Confirmation => {
                return Ok(Transition::Stayed { phase: from });
            }
        }

        let Some(to) = from.next() else {
            return Ok(Transition::Stayed { phase: from });
        };
        self.phase = to;

        if to == CheckoutPhase::Confirmation {
            info!(
                reference = %self.order_reference,
                method = %self.payment_method,
                items = self.cart.total_items(),
                total = %self.cart.total_price(),
                "Order placed"
            );
            self.notify_default(Notification::new(
                "Order placed successfully!",
                "Your order has been confirmed.",
            ));
        } else {
            debug!(%from, %to, "Checkout advanced");
        }

        Ok(Transition::Moved { from, to })
    }

    /// Move one step back. No-op on the cart step.
    pub fn retreat(&mut self) -> Transition {
        let from = self.phase;
        match from.previous() {
            Some(to) => {
                self.phase = to;
                debug!(%from, %to, "Checkout retreated");
                Transition::Moved { from, to }
            }
            None => Transition::Stayed { phase: from },
        }
    }

    /// Finish after the confirmation step: empty the cart, close the view and
    /// return to the cart step. No-op in any other phase.
    pub fn acknowledge_confirmation(&mut self) -> Transition {
        let from = self.phase;
        if from != CheckoutPhase::Confirmation {
            return Transition::Stayed { phase: from };
        }
        self.cart.clear();
        self.is_open = false;
        self.phase = CheckoutPhase::Cart;
        Transition::Moved {
            from,
            to: CheckoutPhase::Cart,
        }
    }

    // =========================================================================
    // Form intents
    // =========================================================================

    /// Set one form field, clearing its error first.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.errors.clear_field(field);
        let value = value.into();
        match field {
            FormField::Delivery(f) => self.delivery.set(f, value),
            FormField::Payment(f) => self.payment.set(f, value),
        }
    }

    /// Choose how to pay. Only allowed on the payment step.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::PaymentMethodLocked`] in any other phase.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), GuardRejection> {
        if self.phase != CheckoutPhase::Payment {
            return Err(GuardRejection::PaymentMethodLocked(self.phase));
        }
        self.payment_method = method;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn delivery(&self) -> &DeliveryForm {
        &self.delivery
    }

    #[must_use]
    pub const fn payment(&self) -> &PaymentForm {
        &self.payment
    }

    #[must_use]
    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub const fn order_reference(&self) -> OrderReference {
        self.order_reference
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read-only copy of everything the rendering layer needs.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let currency = self.settings.currency;
        let total = Price::new(self.cart.total_price(), currency);
        SessionSnapshot {
            is_open: self.is_open,
            phase: self.phase,
            cart: CartSnapshot {
                lines: self.cart.lines().to_vec(),
                total_items: self.cart.total_items(),
                total_price: total.amount,
                total_display: total.display_whole(),
            },
            delivery: self.delivery.clone(),
            payment: self.payment.clone(),
            errors: self.errors.clone(),
            payment_method: self.payment_method,
            order_reference: self.order_reference,
            qr_amount: total.scaled(self.settings.qr_multiplier).display(),
        }
    }
}

/// Cart portion of a [`SessionSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total_items: u32,
    pub total_price: Decimal,
    /// Total rounded to whole baht, e.g. `"฿280"`.
    pub total_display: String,
}

/// Everything the rendering layer reads, as of one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub is_open: bool,
    pub phase: CheckoutPhase,
    pub cart: CartSnapshot,
    pub delivery: DeliveryForm,
    pub payment: PaymentForm,
    pub errors: FormErrors,
    pub payment_method: PaymentMethod,
    pub order_reference: OrderReference,
    /// Amount shown on the QR payment panel.
    pub qr_amount: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{catalog, item};
    use crate::notifications::RecordingSink;
    use crate::validation::{DeliveryField, PaymentField};
    use thai_orchid_core::NotificationVariant;

    fn session() -> (CheckoutSession, RecordingSink) {
        session_with(catalog())
    }

    fn session_with(catalog: Catalog) -> (CheckoutSession, RecordingSink) {
        let sink = RecordingSink::new();
        let session = CheckoutSession::new(
            Arc::new(catalog),
            Arc::new(sink.clone()),
            SessionSettings::default(),
        );
        (session, sink)
    }

    fn id(s: &str) -> MenuItemId {
        MenuItemId::new(s)
    }

    fn fill_delivery(session: &mut CheckoutSession) {
        session.set_field("name".parse().unwrap(), "Somchai");
        session.set_field("address".parse().unwrap(), "12 Sukhumvit Soi 11");
        session.set_field("phone".parse().unwrap(), "081 234 5678");
    }

    fn fill_card(session: &mut CheckoutSession) {
        session.set_field("cardName".parse().unwrap(), "Somchai Jaidee");
        session.set_field("cardNumber".parse().unwrap(), "4111-1111-1111-1111");
        session.set_field("expiry".parse().unwrap(), "09/28");
        session.set_field("cvv".parse().unwrap(), "123");
    }

    fn to_payment(session: &mut CheckoutSession) {
        session.add_item(&id("pad-thai"));
        session.open_checkout();
        fill_delivery(session);
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Payment);
    }

    #[test]
    fn test_new_session_is_empty_cart_phase() {
        let (session, sink) = session();
        assert_eq!(session.phase(), CheckoutPhase::Cart);
        assert!(!session.is_open());
        assert!(session.cart().is_empty());
        assert_eq!(session.payment_method(), PaymentMethod::Card);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_add_item_notifies_with_cart_duration() {
        let (mut session, sink) = session();
        assert!(session.add_item(&id("pad-thai")));

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Added to cart");
        assert_eq!(events[0].description, "Pad Thai has been added to your cart.");
        assert_eq!(events[0].duration, Duration::from_millis(2000));
        assert_eq!(events[0].variant, NotificationVariant::Default);
    }

    #[test]
    fn test_add_unknown_item_is_silent_noop() {
        let (mut session, sink) = session();
        assert!(!session.add_item(&id("pizza")));
        assert!(session.cart().is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_remove_notifies_only_when_present() {
        let (mut session, sink) = session();
        assert!(!session.remove_one_unit(&id("pad-thai")));
        assert!(sink.events().is_empty());

        session.add_item(&id("pad-thai"));
        assert!(session.remove_one_unit(&id("pad-thai")));
        let events = sink.events();
        assert_eq!(events[1].title, "Removed from cart");
        assert_eq!(
            events[1].description,
            "Pad Thai has been removed from your cart."
        );
    }

    #[test]
    fn test_advance_with_empty_cart_is_rejected() {
        let (mut session, sink) = session();
        session.open_checkout();

        assert_eq!(session.advance(), Err(GuardRejection::CartEmpty));
        assert_eq!(session.phase(), CheckoutPhase::Cart);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Cart is empty");
        assert_eq!(events[0].variant, NotificationVariant::Destructive);
        assert_eq!(events[0].duration, DEFAULT_DURATION);
    }

    #[test]
    fn test_invalid_delivery_populates_errors_and_stays() {
        let (mut session, sink) = session();
        session.add_item(&id("pad-thai"));
        session.open_checkout();
        session.advance().unwrap();
        session.set_field("phone".parse().unwrap(), "123");

        assert_eq!(session.advance(), Err(GuardRejection::InvalidDelivery));
        assert_eq!(session.phase(), CheckoutPhase::Delivery);
        assert_eq!(session.errors().delivery.len(), 3);
        assert_eq!(sink.titles().last().unwrap(), "Missing information");
    }

    #[test]
    fn test_editing_field_clears_only_its_error() {
        let (mut session, _sink) = session();
        session.add_item(&id("pad-thai"));
        session.open_checkout();
        session.advance().unwrap();
        session.advance().unwrap_err();

        session.set_field(FormField::Delivery(DeliveryField::Name), "S");
        assert!(!session.errors().delivery.contains_key(&DeliveryField::Name));
        assert!(session.errors().delivery.contains_key(&DeliveryField::Address));
        assert!(session.errors().delivery.contains_key(&DeliveryField::Phone));
    }

    #[test]
    fn test_failed_validation_replaces_errors_wholesale() {
        let (mut session, _sink) = session();
        session.add_item(&id("pad-thai"));
        session.open_checkout();
        session.advance().unwrap();
        session.advance().unwrap_err();
        assert_eq!(session.errors().delivery.len(), 3);

        session.set_field("name".parse().unwrap(), "Somchai");
        session.set_field("address".parse().unwrap(), "Soi 11");
        session.set_field("phone".parse().unwrap(), "12345");
        session.advance().unwrap_err();
        assert_eq!(session.errors().delivery.len(), 1);
        assert_eq!(
            session.errors().delivery[&DeliveryField::Phone],
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn test_invalid_card_is_rejected() {
        let (mut session, sink) = session();
        to_payment(&mut session);
        session.set_field("cardNumber".parse().unwrap(), "4111-1111-1111");

        assert_eq!(session.advance(), Err(GuardRejection::InvalidPayment));
        assert_eq!(session.phase(), CheckoutPhase::Payment);
        assert_eq!(
            session.errors().payment[&PaymentField::CardNumber],
            "Please enter a valid 16-digit card number"
        );
        let last = sink.events().pop().unwrap();
        assert_eq!(last.description, "Please fill in all required payment fields.");
    }

    #[test]
    fn test_qr_payment_skips_card_validation() {
        let (mut session, sink) = session();
        to_payment(&mut session);
        session.set_payment_method(PaymentMethod::QrCode).unwrap();

        assert_eq!(
            session.advance(),
            Ok(Transition::Moved {
                from: CheckoutPhase::Payment,
                to: CheckoutPhase::Confirmation
            })
        );
        assert!(session.errors().payment.is_empty());
        assert_eq!(sink.titles().last().unwrap(), "Order placed successfully!");
    }

    #[test]
    fn test_payment_method_locked_outside_payment() {
        let (mut session, _sink) = session();
        assert_eq!(
            session.set_payment_method(PaymentMethod::QrCode),
            Err(GuardRejection::PaymentMethodLocked(CheckoutPhase::Cart))
        );
        assert_eq!(session.payment_method(), PaymentMethod::Card);
    }

    #[test]
    fn test_retreat_walks_back_one_step() {
        let (mut session, _sink) = session();
        to_payment(&mut session);
        fill_card(&mut session);
        session.advance().unwrap();

        assert_eq!(
            session.retreat(),
            Transition::Moved {
                from: CheckoutPhase::Confirmation,
                to: CheckoutPhase::Payment
            }
        );
        session.retreat();
        session.retreat();
        assert_eq!(session.phase(), CheckoutPhase::Cart);
        assert_eq!(
            session.retreat(),
            Transition::Stayed {
                phase: CheckoutPhase::Cart
            }
        );
    }

    #[test]
    fn test_advance_at_confirmation_stays() {
        let (mut session, _sink) = session();
        to_payment(&mut session);
        fill_card(&mut session);
        session.advance().unwrap();
        assert_eq!(
            session.advance(),
            Ok(Transition::Stayed {
                phase: CheckoutPhase::Confirmation
            })
        );
    }

    #[test]
    fn test_open_checkout_resets_phase() {
        let (mut session, _sink) = session();
        to_payment(&mut session);
        session.close_checkout();
        assert_eq!(session.phase(), CheckoutPhase::Payment);

        session.open_checkout();
        assert!(session.is_open());
        assert_eq!(session.phase(), CheckoutPhase::Cart);
    }

    #[test]
    fn test_toggle_checkout() {
        let (mut session, _sink) = session();
        session.toggle_checkout();
        assert!(session.is_open());
        session.add_item(&id("pad-thai"));
        session.advance().unwrap();

        session.toggle_checkout();
        assert!(!session.is_open());
        assert_eq!(session.phase(), CheckoutPhase::Cart);
    }

    #[test]
    fn test_reference_is_stable_until_reopened() {
        let (mut session, _sink) = session();
        to_payment(&mut session);
        let reference = session.order_reference();
        session.retreat();
        session.advance().unwrap();
        assert_eq!(session.order_reference(), reference);
        let n = reference.as_u32();
        assert!((OrderReference::MIN..=OrderReference::MAX).contains(&n));
    }

    #[test]
    fn test_acknowledge_only_from_confirmation() {
        let (mut session, _sink) = session();
        session.add_item(&id("pad-thai"));
        session.open_checkout();
        assert_eq!(
            session.acknowledge_confirmation(),
            Transition::Stayed {
                phase: CheckoutPhase::Cart
            }
        );
        assert_eq!(session.cart().len(), 1);
        assert!(session.is_open());
    }

    #[test]
    fn test_end_to_end_card_checkout() {
        let catalog = Catalog::new(vec![item("a", "A", 120, None), item("b", "B", 80, None)])
            .unwrap();
        let (mut session, sink) = session_with(catalog);

        session.add_item(&id("a"));
        session.add_item(&id("b"));
        session.add_item(&id("b"));
        assert_eq!(session.cart().total_price(), Decimal::from(280));
        assert_eq!(session.cart().total_items(), 3);

        session.open_checkout();
        session.advance().unwrap();
        fill_delivery(&mut session);
        session.advance().unwrap();
        fill_card(&mut session);
        session.advance().unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Confirmation);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.cart.total_display, "฿280");
        assert_eq!(snapshot.qr_amount, "฿9800.00");

        assert_eq!(
            session.acknowledge_confirmation(),
            Transition::Moved {
                from: CheckoutPhase::Confirmation,
                to: CheckoutPhase::Cart
            }
        );
        assert!(session.cart().is_empty());
        assert!(!session.is_open());
        assert_eq!(session.phase(), CheckoutPhase::Cart);
        assert_eq!(sink.titles().last().unwrap(), "Order placed successfully!");
    }

    #[test]
    fn test_snapshot_serializes() {
        let (mut session, _sink) = session();
        session.add_item(&id("green-curry"));
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["phase"], "cart");
        assert_eq!(json["cart"]["total_items"], 1);
        assert_eq!(json["cart"]["lines"][0]["id"], "green-curry");
        assert_eq!(json["payment_method"], "card");
        assert_eq!(
            json["order_reference"].as_str().unwrap().len(),
            8,
            "reference is an 8-digit string"
        );
    }
}
