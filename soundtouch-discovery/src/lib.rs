//! SoundTouch device discovery over mDNS.
//!
//! SoundTouch speakers announce a `_soundtouch._tcp.local.` service on the
//! local network. This crate browses for those announcements and returns
//! one entry per `"host:port"`, each carrying an endpoint ready to hand to
//! a `soundtouch_api::SoundTouchClient`.
//!
//! # Quick Start
//!
//! ```no_run
//! let devices = soundtouch_discovery::discover();
//! for (key, device) in &devices {
//!     println!("Found {} at {}", device.friendly_name, key);
//! }
//! ```
//!
//! # Iterator-based Discovery
//!
//! For streaming results and early termination, use the iterator API:
//!
//! ```no_run
//! use soundtouch_discovery::discover_iter;
//!
//! for device in discover_iter() {
//!     println!("Found {}", device);
//!     // Can break early if needed
//! }
//! ```
//!
//! # Verification
//!
//! A plain browse trusts the announcement. [`Discovery::with_verification`]
//! additionally reads `/info` from every device, so the results only carry
//! populated `device_info` for devices that answered the Web API.

mod device;
mod discovery;
mod error;
mod mdns;

pub use device::DiscoveredDevice;
pub use discovery::DiscoveryIterator;
pub use error::{DiscoveryError, Result};
pub use mdns::{Discovery, SERVICE_TYPE};

use std::collections::BTreeMap;
use std::time::Duration;

/// Discovers all SoundTouch devices with the default 5-second window.
///
/// Convenience wrapper over [`Discovery`]. A daemon that cannot start is
/// logged and treated as an empty network.
pub fn discover() -> BTreeMap<String, DiscoveredDevice> {
    discover_with_timeout(mdns::DEFAULT_TIMEOUT)
}

/// Discovers all SoundTouch devices within the given window.
///
/// # Arguments
///
/// * `timeout` - How long to keep the browse window open
pub fn discover_with_timeout(timeout: Duration) -> BTreeMap<String, DiscoveredDevice> {
    Discovery::new()
        .with_timeout(timeout)
        .run()
        .unwrap_or_else(|err| {
            tracing::warn!("discovery could not start: {}", err);
            BTreeMap::new()
        })
}

/// Streams devices as they resolve, with the default 5-second window.
pub fn discover_iter() -> DiscoveryIterator {
    discover_iter_with_timeout(mdns::DEFAULT_TIMEOUT)
}

/// Streams devices as they resolve within the given window.
///
/// A daemon that cannot start is logged and yields an empty iterator.
///
/// # Arguments
///
/// * `timeout` - How long to keep the browse window open
pub fn discover_iter_with_timeout(timeout: Duration) -> DiscoveryIterator {
    DiscoveryIterator::new(timeout, false).unwrap_or_else(|err| {
        tracing::warn!("discovery could not start: {}", err);
        DiscoveryIterator::empty()
    })
}
