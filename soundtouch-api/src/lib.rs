//! Typed client for the Bose SoundTouch Web API.
//!
//! SoundTouch speakers expose an XML-over-HTTP control API on port 8090.
//! This crate wraps it with typed records and a blocking client: reads
//! decode device documents into the structs under [`models`], writes
//! serialize those structs back into request bodies, and device error
//! documents surface as [`SoundTouchError::Device`] regardless of HTTP
//! status.
//!
//! ```no_run
//! use soundtouch_api::SoundTouchClient;
//!
//! # fn main() -> soundtouch_api::Result<()> {
//! let client = SoundTouchClient::new("192.168.1.80");
//! for preset in &client.presets()?.items {
//!     println!("{}: {}", preset.id, preset.name().unwrap_or("(empty)"));
//! }
//! client.select_preset_slot(2)?;
//! # Ok(())
//! # }
//! ```
//!
//! The WebSocket notification feed (port 8080) shares this crate's record
//! types through the [`events`] module; the `soundtouch-notify` crate
//! runs the connection itself.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod models;
pub mod uris;
pub mod xml;

pub use client::SoundTouchClient;
pub use endpoint::{Endpoint, DEFAULT_API_PORT, DEFAULT_NOTIFY_PORT};
pub use error::{Result, SoundTouchError};
pub use events::{Notification, NotifyKind};
pub use uris::Uri;
