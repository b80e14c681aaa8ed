//! Live checkout sessions, keyed by session id.
//!
//! Sessions live only in memory. Each one sits behind its own
//! `tokio::sync::Mutex` so a request applies its intent atomically; idle
//! sessions are evicted by the cache after the configured timeout.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use thai_orchid_core::SessionId;

use crate::catalog::Catalog;
use crate::checkout::{CheckoutSession, SessionSettings, SessionSnapshot};
use crate::notifications::{Toast, Toaster};

/// One customer's checkout session plus its toast list.
#[derive(Debug)]
pub struct SessionEntry {
    pub session: CheckoutSession,
    pub toaster: Toaster,
}

impl SessionEntry {
    fn new(catalog: Arc<Catalog>, settings: SessionSettings) -> Self {
        let toaster = Toaster::new();
        let session = CheckoutSession::new(catalog, Arc::new(toaster.clone()), settings);
        Self { session, toaster }
    }

    /// Snapshot of the session together with the live toasts.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            snapshot: self.session.snapshot(),
            toasts: self.toaster.toasts(),
        }
    }
}

/// What the HTTP layer returns after every intent.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    pub toasts: Vec<Toast>,
}

/// Most checkout sessions held at once.
pub const MAX_SESSIONS: u64 = 10_000;

/// Shared handle to one session.
pub type SharedSession = Arc<Mutex<SessionEntry>>;

/// In-memory session registry.
#[derive(Clone)]
pub struct SessionStore {
    catalog: Arc<Catalog>,
    settings: SessionSettings,
    cache: Cache<SessionId, SharedSession>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.cache.entry_count())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store whose sessions expire after `idle` without access.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, settings: SessionSettings, idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(idle)
            .eviction_listener(|id: Arc<SessionId>, entry: SharedSession, cause| {
                debug!(session_id = %id, ?cause, "Checkout session evicted");
                if let Ok(entry) = entry.try_lock() {
                    entry.toaster.clear();
                }
            })
            .build();

        Self {
            catalog,
            settings,
            cache,
        }
    }

    /// Fetch the session for `id`, starting a fresh one if none is live.
    pub async fn get_or_create(&self, id: SessionId) -> SharedSession {
        let catalog = Arc::clone(&self.catalog);
        let settings = self.settings;
        self.cache
            .get_with(id, async move {
                debug!(session_id = %id, "Starting checkout session");
                Arc::new(Mutex::new(SessionEntry::new(catalog, settings)))
            })
            .await
    }
}
