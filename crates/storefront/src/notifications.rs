//! Customer-facing notifications ("toasts").
//!
//! The checkout core only *emits* notifications through [`NotificationSink`].
//! [`Toaster`] is the sink used by the service: it keeps the list of live
//! toasts and dismisses each one on a cancellable timer.
//!
//! # Lifecycle
//!
//! ```text
//! notify ──► visible ──(duration)──► hidden ──(exit delay)──► removed
//! ```
//!
//! Timers are tokio tasks keyed by toast identity. Re-emitting a
//! notification with the same title and description while it is still live
//! refreshes that toast and replaces its timer instead of stacking a copy;
//! `dismiss` and `clear` abort timers explicitly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use thai_orchid_core::{NotificationId, NotificationVariant};

/// Default display time for a notification.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// How long a hidden toast lingers for its exit animation.
pub const EXIT_DELAY: Duration = Duration::from_millis(300);

/// A notification emitted by the checkout core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    pub duration: Duration,
}

impl Notification {
    /// A normal notification with the default duration.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
            duration: DEFAULT_DURATION,
        }
    }

    /// Mark as destructive (errors, rejected actions).
    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.variant = NotificationVariant::Destructive;
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Receiver for notifications emitted by a checkout session.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

// =============================================================================
// Toaster
// =============================================================================

/// A toast as the rendering layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: NotificationId,
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    pub duration_ms: u64,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    generation: u64,
}

#[derive(Default)]
struct ToasterInner {
    toasts: Vec<Toast>,
    timers: HashMap<NotificationId, JoinHandle<()>>,
    next_generation: u64,
}

impl ToasterInner {
    fn cancel_timer(&mut self, id: NotificationId) {
        if let Some(handle) = self.timers.remove(&id) {
            handle.abort();
        }
    }
}

/// Live toast list with timed dismissal.
///
/// Cheap to clone; clones share the same list.
#[derive(Clone)]
pub struct Toaster {
    inner: Arc<Mutex<ToasterInner>>,
    exit_delay: Duration,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("toasts", &self.lock().toasts.len())
            .field("exit_delay", &self.exit_delay)
            .finish()
    }
}

impl Toaster {
    /// Create an empty toaster.
    #[must_use]
    pub fn new() -> Self {
        Self::with_exit_delay(EXIT_DELAY)
    }

    #[must_use]
    pub fn with_exit_delay(exit_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ToasterInner::default())),
            exit_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ToasterInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of current toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    /// Remove a toast now and cancel its timer.
    ///
    /// Returns `false` if no such toast exists.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut inner = self.lock();
        inner.cancel_timer(id);
        let before = inner.toasts.len();
        inner.toasts.retain(|toast| toast.id != id);
        before != inner.toasts.len()
    }

    /// Remove every toast and cancel all timers.
    pub fn clear(&self) {
        let mut inner = self.lock();
        for (_, handle) in inner.timers.drain() {
            handle.abort();
        }
        inner.toasts.clear();
    }

    /// Show `notification`, returning the id of the toast displaying it.
    pub fn push(&self, notification: Notification) -> NotificationId {
        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;
        let duration_ms = u64::try_from(notification.duration.as_millis()).unwrap_or(u64::MAX);

        let existing = inner.toasts.iter_mut().find(|toast| {
            toast.title == notification.title && toast.description == notification.description
        });

        let id = if let Some(toast) = existing {
            toast.variant = notification.variant;
            toast.duration_ms = duration_ms;
            toast.visible = true;
            toast.created_at = Utc::now();
            toast.generation = generation;
            debug!(id = %toast.id, title = %toast.title, "Toast superseded");
            toast.id
        } else {
            let id = NotificationId::generate();
            inner.toasts.push(Toast {
                id,
                title: notification.title,
                description: notification.description,
                variant: notification.variant,
                duration_ms,
                visible: true,
                created_at: Utc::now(),
                generation,
            });
            id
        };

        inner.cancel_timer(id);
        if let Some(handle) = self.schedule_dismissal(id, generation, notification.duration) {
            inner.timers.insert(id, handle);
        }
        id
    }

    /// Spawn the hide-then-remove task for one toast generation.
    ///
    /// Without a tokio runtime the toast stays until dismissed.
    fn schedule_dismissal(
        &self,
        id: NotificationId,
        generation: u64,
        duration: Duration,
    ) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(%id, "No runtime, toast will not auto-dismiss");
            return None;
        };

        let inner = Arc::clone(&self.inner);
        let exit_delay = self.exit_delay;
        let deadline = tokio::time::Instant::now() + duration;
        Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            {
                let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
                match guard
                    .toasts
                    .iter_mut()
                    .find(|t| t.id == id && t.generation == generation)
                {
                    Some(toast) => toast.visible = false,
                    None => return,
                }
            }

            tokio::time::sleep(exit_delay).await;
            let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
            let before = guard.toasts.len();
            guard
                .toasts
                .retain(|t| !(t.id == id && t.generation == generation));
            if guard.toasts.len() != before {
                guard.timers.remove(&id);
            }
        }))
    }
}

impl NotificationSink for Toaster {
    fn notify(&self, notification: Notification) {
        self.push(notification);
    }
}

/// Sink that records notifications in memory, for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Titles of everything notified so far.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.events().into_iter().map(|n| n.title).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
