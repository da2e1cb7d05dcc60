//! Transient notification queue.
//!
//! Toasts append in posting order and each evicts itself after a fixed
//! lifetime. Eviction and manual dismissal both remove by id, so a toast
//! dismissed early makes the later timer a no-op rather than an error.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::lock;

/// How long a toast stays visible before evicting itself.
pub const TOAST_TTL: Duration = Duration::from_millis(3000);

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// Identity of a posted toast.
///
/// Derived from the posting wall-clock millisecond, bumped past the previous
/// id when two posts land in the same millisecond, so ids are unique for the
/// lifetime of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastId(i64);

/// One visible notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
}

/// Shared notification queue. Cloning is cheap; all clones feed one list.
///
/// Posting spawns the eviction timer on the ambient tokio runtime, so the
/// queue must be used from within one.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    ttl: Duration,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<Toast>,
    last_id: i64,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(TOAST_TTL)
    }

    /// Queue with a custom lifetime. Used by tests to tighten timing.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Appends a toast and schedules its eviction.
    pub fn post(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let id = {
            let mut state = lock(&self.inner.state);
            let now = chrono::Utc::now().timestamp_millis();
            let id = ToastId(now.max(state.last_id + 1));
            state.last_id = id.0;
            state.entries.push(Toast {
                id,
                message: message.into(),
                severity,
            });
            id
        };

        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(queue.inner.ttl).await;
            queue.dismiss(id);
        });
        id
    }

    /// Removes a toast by id. Unknown and already-evicted ids are ignored.
    pub fn dismiss(&self, id: ToastId) {
        lock(&self.inner.state).entries.retain(|t| t.id != id);
    }

    /// The visible toasts in posting order.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        lock(&self.inner.state).entries.clone()
    }

    /// Takes every visible toast, leaving the queue empty. Pending eviction
    /// timers for the taken toasts become no-ops.
    #[must_use]
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut lock(&self.inner.state).entries)
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}
