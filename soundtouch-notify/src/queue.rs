//! Bounded hand-off between the socket worker and the dispatcher.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use soundtouch_api::Notification;

/// Drop-oldest queue feeding the dispatcher thread.
///
/// `push` never blocks: at capacity the oldest queued event is discarded,
/// and the loss is surfaced as [`Notification::Dropped`] ahead of whatever
/// is still queued. Discarded events were older than everything the queue
/// retains, so the report stays in arrival order.
pub(crate) struct DispatchQueue {
    inner: Mutex<Inner>,
    ready: Condvar,
    capacity: usize,
}

struct Inner {
    events: VecDeque<Notification>,
    dropped: u64,
    closed: bool,
}

impl DispatchQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        DispatchQueue {
            inner: Mutex::new(Inner {
                events: VecDeque::new(),
                dropped: 0,
                closed: false,
            }),
            ready: Condvar::new(),
            // A queue that can hold nothing could never deliver.
            capacity: capacity.max(1),
        }
    }

    // No listener code runs under this lock, so a poisoned guard still
    // holds a structurally sound queue.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueues an event, discarding the oldest when full.
    pub(crate) fn push(&self, event: Notification) {
        let mut inner = self.lock();
        if inner.closed {
            return;
        }
        if inner.events.len() == self.capacity {
            inner.events.pop_front();
            inner.dropped += 1;
            tracing::debug!("dispatch queue full, discarded the oldest event");
        }
        inner.events.push_back(event);
        drop(inner);
        self.ready.notify_one();
    }

    /// Dequeues the next event, blocking until one arrives.
    ///
    /// Pending losses are reported first. Returns `None` once the queue
    /// has been closed and drained.
    pub(crate) fn pop(&self) -> Option<Notification> {
        let mut inner = self.lock();
        loop {
            if inner.dropped > 0 {
                let count = inner.dropped;
                inner.dropped = 0;
                return Some(Notification::Dropped { count });
            }
            if let Some(event) = inner.events.pop_front() {
                return Some(event);
            }
            if inner.closed {
                return None;
            }
            inner = self
                .ready
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Stops accepting events; `pop` drains what is queued, then ends.
    pub(crate) fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }
}
