//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Health check
//! GET    /menu?q=                   - Menu, filtered by search query
//! GET    /session                   - Current checkout session
//!
//! # Cart
//! POST   /cart/add                  - Add one unit {id}
//! POST   /cart/remove               - Remove one unit {id}
//!
//! # Checkout
//! POST   /checkout/open             - Show checkout at the cart step
//! POST   /checkout/close            - Hide checkout
//! POST   /checkout/toggle           - Cart icon toggle
//! POST   /checkout/advance          - Next step (guarded)
//! POST   /checkout/retreat          - Previous step
//! POST   /checkout/acknowledge      - Finish after confirmation
//! POST   /checkout/field            - Edit a form field {field, value}
//! POST   /checkout/payment-method   - Choose payment method {method}
//!
//! # Notifications
//! DELETE /notifications/{id}        - Dismiss a toast
//! ```

pub mod cart;
pub mod checkout;
pub mod menu;
pub mod notifications;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(checkout::open))
        .route("/close", post(checkout::close))
        .route("/toggle", post(checkout::toggle))
        .route("/advance", post(checkout::advance))
        .route("/retreat", post(checkout::retreat))
        .route("/acknowledge", post(checkout::acknowledge))
        .route("/field", post(checkout::set_field))
        .route("/payment-method", post(checkout::set_payment_method))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/menu", get(menu::index))
        .route("/session", get(checkout::show))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/notifications/{id}", delete(notifications::dismiss))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
