//! Listener registration and fan-out.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use dashmap::DashMap;
use soundtouch_api::{Notification, NotifyKind};

/// Callback run on the dispatcher thread for each matching event.
pub type Listener = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Per-kind listener table shared between the façade and the dispatcher.
///
/// Listeners are identified by `Arc` pointer: adding the same `Arc` under
/// a kind twice keeps a single copy, and removal only takes out the exact
/// `Arc` it is handed.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: DashMap<NotifyKind, Vec<Listener>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for one kind. Returns false when that exact
    /// `Arc` is already registered there.
    pub(crate) fn add(&self, kind: NotifyKind, listener: Listener) -> bool {
        let mut group = self.listeners.entry(kind).or_default();
        if group.iter().any(|existing| Arc::ptr_eq(existing, &listener)) {
            return false;
        }
        group.push(listener);
        true
    }

    /// Removes a previously registered listener. Returns false when it was
    /// not registered under the kind.
    pub(crate) fn remove(&self, kind: NotifyKind, listener: &Listener) -> bool {
        match self.listeners.get_mut(&kind) {
            Some(mut group) => {
                let before = group.len();
                group.retain(|existing| !Arc::ptr_eq(existing, listener));
                group.len() < before
            }
            None => false,
        }
    }

    /// Drops every registered listener.
    pub(crate) fn clear(&self) {
        self.listeners.clear();
    }

    fn catch_all_active(&self) -> bool {
        self.listeners
            .get(&NotifyKind::All)
            .map(|group| !group.is_empty())
            .unwrap_or(false)
    }

    /// Delivers one event.
    ///
    /// While any catch-all listener is registered the event goes to the
    /// catch-all set alone; otherwise to the listeners of its kind.
    /// `Dropped` and `Raw` events only ever reach catch-all listeners.
    pub(crate) fn dispatch(&self, event: &Notification) {
        if self.catch_all_active() {
            self.deliver(NotifyKind::All, event);
            return;
        }
        let kind = event.kind();
        if kind == NotifyKind::All {
            return;
        }
        self.deliver(kind, event);
    }

    fn deliver(&self, kind: NotifyKind, event: &Notification) {
        // Clone the group out so a listener can re-enter the registry
        // without deadlocking on the shard lock.
        let group: Vec<Listener> = match self.listeners.get(&kind) {
            Some(group) => group.value().clone(),
            None => return,
        };
        for listener in group {
            if panic::catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                tracing::error!("{} listener panicked, event skipped for it", kind.as_str());
            }
        }
    }
}
