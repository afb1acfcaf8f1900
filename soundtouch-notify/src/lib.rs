//! WebSocket notification channel for Bose SoundTouch devices.
//!
//! SoundTouch speakers push state changes over a WebSocket listener on
//! port 8080 (subprotocol `gabbo`). This crate keeps that connection up
//! and fans incoming events out to registered listeners, all behind a
//! synchronous API:
//!
//! - a worker thread owns the socket and its current-thread tokio
//!   runtime, reconnecting with backoff after unexpected drops;
//! - a dispatcher thread runs listeners, so a slow or panicking listener
//!   never stalls the socket;
//! - a bounded queue between them drops the oldest events under pressure
//!   and reports the loss as [`Notification::Dropped`].
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use soundtouch_notify::{Listener, Notification, NotifyChannel, NotifyKind};
//!
//! # fn main() -> soundtouch_notify::Result<()> {
//! let mut channel = NotifyChannel::new("192.168.1.80");
//!
//! let on_volume: Listener = Arc::new(|event: &Notification| {
//!     if let Notification::Volume(volume) = event {
//!         println!("volume: {}", volume.actual);
//!     }
//! });
//! channel.add_listener(NotifyKind::VolumeUpdated, on_volume);
//!
//! channel.start()?;
//! // ... listeners run on a background thread ...
//! channel.close();
//! # Ok(())
//! # }
//! ```
//!
//! The socket's own lifecycle surfaces the same way: transitions arrive
//! as [`Notification::ChannelState`] events under
//! [`NotifyKind::ConnectionStateUpdated`].

pub mod channel;
pub mod config;
pub mod error;
mod queue;
mod registry;
mod worker;

pub use channel::NotifyChannel;
pub use config::NotifyConfig;
pub use error::{NotifyError, Result};
pub use registry::Listener;

// Re-export the address and event types the façade trades in.
pub use soundtouch_api::events::ChannelState;
pub use soundtouch_api::{Endpoint, Notification, NotifyKind};

/// Prelude module for convenient imports
///
/// ```
/// use soundtouch_notify::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ChannelState, Endpoint, Listener, Notification, NotifyChannel, NotifyConfig,
        NotifyError, NotifyKind, Result,
    };
}
