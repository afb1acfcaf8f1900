//! Sync façade over the notification socket.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use soundtouch_api::events::ChannelState;
use soundtouch_api::{Endpoint, NotifyKind};
use url::Url;

use crate::config::NotifyConfig;
use crate::error::{NotifyError, Result};
use crate::queue::DispatchQueue;
use crate::registry::{Listener, ListenerRegistry};
use crate::worker::{spawn_dispatcher, spawn_socket_worker, Command};

/// Push notification channel of one SoundTouch device.
///
/// Wraps the device's WebSocket feed behind a synchronous API: listeners
/// registered per [`NotifyKind`] run on a background dispatcher thread,
/// while a worker thread owns the socket and its tokio runtime. Listeners
/// survive [`close`]; a closed channel can be started again.
///
/// [`close`]: NotifyChannel::close
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use soundtouch_notify::{Listener, Notification, NotifyChannel, NotifyKind};
///
/// # fn main() -> soundtouch_notify::Result<()> {
/// let mut channel = NotifyChannel::new("192.168.1.80");
///
/// let on_volume: Listener = Arc::new(|event: &Notification| {
///     if let Notification::Volume(volume) = event {
///         println!("volume now {}", volume.actual);
///     }
/// });
/// channel.add_listener(NotifyKind::VolumeUpdated, on_volume);
///
/// channel.start()?;
/// // ... events arrive on the dispatcher thread ...
/// channel.close();
/// # Ok(())
/// # }
/// ```
pub struct NotifyChannel {
    endpoint: Endpoint,
    config: NotifyConfig,
    registry: Arc<ListenerRegistry>,
    state: Arc<Mutex<ChannelState>>,
    worker: Option<Worker>,
}

/// Live threads of a started channel.
struct Worker {
    command_tx: Sender<Command>,
    queue: Arc<DispatchQueue>,
    socket: JoinHandle<()>,
    dispatcher: JoinHandle<()>,
}

impl NotifyChannel {
    /// Creates a channel for a device with default tunables.
    pub fn new(endpoint: impl Into<Endpoint>) -> Self {
        Self::with_config(endpoint, NotifyConfig::default())
    }

    /// Creates a channel with explicit tunables.
    pub fn with_config(endpoint: impl Into<Endpoint>, config: NotifyConfig) -> Self {
        NotifyChannel {
            endpoint: endpoint.into(),
            config,
            registry: Arc::new(ListenerRegistry::new()),
            state: Arc::new(Mutex::new(ChannelState::Disconnected)),
            worker: None,
        }
    }

    /// The device this channel listens to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Current lifecycle state of the socket.
    pub fn state(&self) -> ChannelState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener for one event kind.
    ///
    /// Listeners registered under [`NotifyKind::All`] take over delivery:
    /// while any exist, every event goes to them alone. Returns false when
    /// this exact `Arc` is already registered for the kind.
    pub fn add_listener(&self, kind: NotifyKind, listener: Listener) -> bool {
        self.registry.add(kind, listener)
    }

    /// Removes a listener registered for a kind.
    ///
    /// Matching is by `Arc` identity. Returns false when it was not
    /// registered.
    pub fn remove_listener(&self, kind: NotifyKind, listener: &Listener) -> bool {
        self.registry.remove(kind, listener)
    }

    /// Removes every registered listener.
    pub fn clear_listeners(&self) {
        self.registry.clear();
    }

    /// Connects to the device and starts delivering events.
    ///
    /// Spawns the socket worker and the dispatcher. Calling this on a
    /// running channel is a no-op; to restart one, [`close`] it first.
    ///
    /// [`close`]: NotifyChannel::close
    ///
    /// # Errors
    ///
    /// [`NotifyError::Endpoint`] when the host does not form a valid
    /// WebSocket URL, [`NotifyError::Worker`] when a background thread
    /// cannot be spawned.
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Ok(());
        }
        let raw = format!("ws://{}:{}/", self.endpoint.host, self.endpoint.notify_port);
        let url = Url::parse(&raw).map_err(|err| NotifyError::Endpoint(err.to_string()))?;

        let queue = Arc::new(DispatchQueue::new(self.config.buffer_size));
        let (command_tx, command_rx) = mpsc::channel();
        let socket = spawn_socket_worker(
            url,
            self.config.clone(),
            Arc::clone(&queue),
            Arc::clone(&self.state),
            command_rx,
        )
        .map_err(|err| NotifyError::Worker(err.to_string()))?;
        let dispatcher = spawn_dispatcher(Arc::clone(&queue), Arc::clone(&self.registry))
            .map_err(|err| NotifyError::Worker(err.to_string()))?;

        self.worker = Some(Worker {
            command_tx,
            queue,
            socket,
            dispatcher,
        });
        Ok(())
    }

    /// Stops the channel.
    ///
    /// Tells the worker to stop reconnecting and close the socket with a
    /// close frame, then blocks until every already-queued event has been
    /// delivered. Safe to call on a channel that never started.
    pub fn close(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.command_tx.send(Command::Close);
        if worker.socket.join().is_err() {
            tracing::error!("notification socket worker panicked");
        }
        worker.queue.close();
        if worker.dispatcher.join().is_err() {
            tracing::error!("notification dispatcher panicked");
        }
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = ChannelState::Disconnected;
    }
}

impl Drop for NotifyChannel {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use soundtouch_api::Notification;

    use super::*;

    #[test]
    fn test_a_new_channel_is_disconnected() {
        let channel = NotifyChannel::new("192.168.1.80");
        assert_eq!(channel.state(), ChannelState::Disconnected);
        assert_eq!(channel.endpoint().host, "192.168.1.80");
        assert_eq!(channel.endpoint().notify_port, 8080);
    }

    #[test]
    fn test_listener_registration_roundtrip() {
        let channel = NotifyChannel::new("192.168.1.80");
        let listener: Listener = Arc::new(|_event: &Notification| {});

        assert!(channel.add_listener(NotifyKind::VolumeUpdated, Arc::clone(&listener)));
        assert!(!channel.add_listener(NotifyKind::VolumeUpdated, Arc::clone(&listener)));
        assert!(channel.remove_listener(NotifyKind::VolumeUpdated, &listener));
        assert!(!channel.remove_listener(NotifyKind::VolumeUpdated, &listener));
    }

    #[test]
    fn test_clear_listeners_forgets_all_registrations() {
        let channel = NotifyChannel::new("192.168.1.80");
        let listener: Listener = Arc::new(|_event: &Notification| {});

        channel.add_listener(NotifyKind::VolumeUpdated, Arc::clone(&listener));
        channel.add_listener(NotifyKind::All, Arc::clone(&listener));
        channel.clear_listeners();
        assert!(!channel.remove_listener(NotifyKind::VolumeUpdated, &listener));
        assert!(!channel.remove_listener(NotifyKind::All, &listener));
    }

    #[test]
    fn test_start_rejects_an_empty_host() {
        let mut channel = NotifyChannel::new("");
        match channel.start() {
            Err(NotifyError::Endpoint(_)) => {}
            other => panic!("expected an endpoint error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_close_without_start_is_a_noop() {
        let mut channel = NotifyChannel::new("192.168.1.80");
        channel.close();
        assert_eq!(channel.state(), ChannelState::Disconnected);
    }
}
