//! Error type for the discovery crate.

use thiserror::Error;

/// Failure starting or running an mDNS browse.
///
/// Covers daemon startup and browse registration. A browse window that
/// simply finds nothing is not an error, and neither is a device that
/// fails its optional verification probe.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The mDNS service daemon could not start or browse.
    #[error("mDNS daemon error: {0}")]
    Daemon(String),
}

/// Convenience alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
