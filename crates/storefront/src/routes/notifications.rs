//! Notification route handlers.

use axum::{Json, extract::Path};
use tracing::instrument;

use thai_orchid_core::NotificationId;

use crate::error::{AppError, Result};
use crate::middleware::CurrentCheckout;
use crate::sessions::SessionView;

/// Dismiss a toast before its timer runs out.
#[instrument(skip(shared))]
pub async fn dismiss(
    CurrentCheckout(shared): CurrentCheckout,
    Path(id): Path<NotificationId>,
) -> Result<Json<SessionView>> {
    let entry = shared.lock().await;
    if !entry.toaster.dismiss(id) {
        return Err(AppError::NotFound(format!("notification {id}")));
    }
    Ok(Json(entry.view()))
}
