use thiserror::Error;

/// Errors raised while standing up the notification channel.
///
/// A running channel handles socket failures internally: they are logged
/// and, while reconnection is enabled, retried with backoff. Only setup
/// problems surface through this type.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The endpoint could not be rendered as a WebSocket URL.
    #[error("invalid notification endpoint: {0}")]
    Endpoint(String),

    /// A background thread could not be spawned.
    #[error("notification worker could not start: {0}")]
    Worker(String),
}

/// Result type for notification channel operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
