//! Cart route handlers.
//!
//! Both handlers return the full session view so the client can re-render
//! the cart badge, the cart list and the toast stack in one go.

use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use thai_orchid_core::MenuItemId;

use crate::error::add_breadcrumb;
use crate::middleware::CurrentCheckout;
use crate::sessions::SessionView;

/// Body naming a menu item.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub id: MenuItemId,
}

/// Add one unit of an item.
#[instrument(skip_all, fields(item_id = %body.id))]
pub async fn add(
    CurrentCheckout(shared): CurrentCheckout,
    Json(body): Json<ItemRequest>,
) -> Json<SessionView> {
    let mut entry = shared.lock().await;
    if entry.session.add_item(&body.id) {
        add_breadcrumb("cart", &format!("Added {}", body.id));
    }
    Json(entry.view())
}

/// Remove one unit of an item.
#[instrument(skip_all, fields(item_id = %body.id))]
pub async fn remove(
    CurrentCheckout(shared): CurrentCheckout,
    Json(body): Json<ItemRequest>,
) -> Json<SessionView> {
    let mut entry = shared.lock().await;
    if entry.session.remove_one_unit(&body.id) {
        add_breadcrumb("cart", &format!("Removed {}", body.id));
    }
    Json(entry.view())
}
