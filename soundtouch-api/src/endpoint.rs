use std::fmt;

use serde::{Deserialize, Serialize};

/// Default port of the device's HTTP Web API.
pub const DEFAULT_API_PORT: u16 = 8090;

/// Default port of the device's WebSocket notification listener.
pub const DEFAULT_NOTIFY_PORT: u16 = 8080;

/// Network address of a SoundTouch device.
///
/// An endpoint carries the host plus both well-known ports so the same
/// value can drive API calls and notification subscriptions.
///
/// # Example
///
/// ```no_run
/// use soundtouch_api::Endpoint;
///
/// let endpoint = Endpoint::new("192.168.1.80");
/// assert_eq!(endpoint.port, 8090);
/// assert_eq!(endpoint.notify_port, 8080);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Hostname or IP address of the device.
    pub host: String,
    /// Port of the HTTP Web API.
    pub port: u16,
    /// Port of the WebSocket notification listener.
    pub notify_port: u16,
}

impl Endpoint {
    /// Creates an endpoint on the default ports.
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname or IP address of the device
    pub fn new(host: impl Into<String>) -> Self {
        Endpoint {
            host: host.into(),
            port: DEFAULT_API_PORT,
            notify_port: DEFAULT_NOTIFY_PORT,
        }
    }

    /// Creates an endpoint with an explicit API port.
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname or IP address of the device
    /// * `port` - Port of the HTTP Web API
    pub fn with_port(host: impl Into<String>, port: u16) -> Self {
        Endpoint {
            host: host.into(),
            port,
            notify_port: DEFAULT_NOTIFY_PORT,
        }
    }

    /// Sets the WebSocket notification port.
    pub fn notify_port(mut self, port: u16) -> Self {
        self.notify_port = port;
        self
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl From<&str> for Endpoint {
    fn from(host: &str) -> Self {
        Endpoint::new(host)
    }
}

impl From<String> for Endpoint {
    fn from(host: String) -> Self {
        Endpoint::new(host)
    }
}
