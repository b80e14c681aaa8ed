//! Session middleware configuration.
//!
//! Sets up cookie sessions using tower-sessions backed by a bounded moka
//! cache. The cookie session only carries the id of the customer's checkout
//! session; the checkout state itself lives in
//! [`SessionStore`](crate::sessions::SessionStore).

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;
use tracing::debug;

use thai_orchid_core::SessionId;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::sessions::SharedSession;
use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "orchid_session";

/// Most cookie sessions held at once. Matches the checkout session cap.
pub const MAX_COOKIE_SESSIONS: u64 = crate::sessions::MAX_SESSIONS;

/// Keys stored in the cookie session.
pub mod session_keys {
    /// Id of the customer's checkout session.
    pub const CHECKOUT_SESSION_ID: &str = "checkout_session_id";
}

/// Create the session layer with a bounded in-memory store.
///
/// Cookie sessions expire after the same idle period as checkout sessions;
/// the store starts evicting records once it holds [`MAX_COOKIE_SESSIONS`].
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    let idle_seconds = i64::try_from(config.session_idle.as_secs()).unwrap_or(i64::MAX);

    SessionManagerLayer::new(MokaStore::new(Some(MAX_COOKIE_SESSIONS)))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Look up the checkout session id in the cookie session, assigning one on
/// first use.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn checkout_session_id(
    session: &Session,
) -> Result<SessionId, tower_sessions::session::Error> {
    if let Some(id) = session
        .get::<SessionId>(session_keys::CHECKOUT_SESSION_ID)
        .await?
    {
        return Ok(id);
    }

    let id = SessionId::generate();
    session
        .insert(session_keys::CHECKOUT_SESSION_ID, id)
        .await?;
    debug!(session_id = %id, "Assigned checkout session");
    Ok(id)
}

/// Extractor for the caller's checkout session.
///
/// Creates the checkout session on first use and records its id on the
/// current span.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentCheckout(shared): CurrentCheckout) -> Json<SessionView> {
///     Json(shared.lock().await.view())
/// }
/// ```
pub struct CurrentCheckout(pub SharedSession);

impl FromRequestParts<AppState> for CurrentCheckout {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let id = checkout_session_id(session).await?;
        tracing::Span::current().record("session_id", tracing::field::display(id));

        Ok(Self(state.sessions().get_or_create(id).await))
    }
}
