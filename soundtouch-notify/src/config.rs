use std::time::Duration;

/// Tunables for the notification channel.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use soundtouch_notify::NotifyConfig;
///
/// let config = NotifyConfig::new()
///     .with_ping_interval(Duration::from_secs(30))
///     .with_reconnect(false);
/// assert_eq!(config.buffer_size, 256);
/// ```
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Capacity of the dispatch queue between the socket and listeners.
    ///
    /// When the queue is full the oldest event is discarded and the loss
    /// is reported to catch-all listeners as a `Dropped` event.
    pub buffer_size: usize,
    /// Cadence of `KeepAlive` pings. `Duration::ZERO` disables pinging.
    pub ping_interval: Duration,
    /// Whether to redial after an unexpected socket drop.
    pub reconnect: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            buffer_size: 256,
            ping_interval: Duration::from_secs(60),
            reconnect: true,
        }
    }
}

impl NotifyConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dispatch queue capacity.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the keep-alive ping cadence. Zero disables pinging.
    pub fn with_ping_interval(mut self, interval: Duration) -> Self {
        self.ping_interval = interval;
        self
    }

    /// Enables or disables reconnection after unexpected drops.
    pub fn with_reconnect(mut self, reconnect: bool) -> Self {
        self.reconnect = reconnect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotifyConfig::default();
        assert_eq!(config.buffer_size, 256);
        assert_eq!(config.ping_interval, Duration::from_secs(60));
        assert!(config.reconnect);
    }

    #[test]
    fn test_builders_override_fields() {
        let config = NotifyConfig::new()
            .with_buffer_size(16)
            .with_ping_interval(Duration::ZERO)
            .with_reconnect(false);
        assert_eq!(config.buffer_size, 16);
        assert!(config.ping_interval.is_zero());
        assert!(!config.reconnect);
    }
}
