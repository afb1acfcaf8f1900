//! Error types for the SoundTouch API

use thiserror::Error;
use webapi_client::TransportError;

/// Errors that can occur during SoundTouch API operations
#[derive(Debug, Error)]
pub enum SoundTouchError {
    /// A request argument failed validation before any I/O happened
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The device sent XML whose shape or content could not be decoded
    #[error("malformed XML in <{tag}>: {text}")]
    MalformedXml { tag: String, text: String },

    /// The device answered with a non-success HTTP status
    #[error("device returned HTTP {status} for {path}")]
    DeviceHttp {
        status: u16,
        path: String,
        body: String,
    },

    /// The device answered 200 but the body was an error document
    #[error("device error {code} ({name}): {message}")]
    Device {
        code: u16,
        name: String,
        severity: String,
        message: String,
    },

    /// The device could not be reached, or the connection broke mid-exchange
    #[error("device unreachable at {host}:{port}: {cause}")]
    Unreachable {
        host: String,
        port: u16,
        cause: String,
    },

    /// The operation's deadline elapsed before the request was dispatched
    #[error("operation canceled")]
    Canceled,
}

impl From<TransportError> for SoundTouchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable { host, port, cause } => {
                SoundTouchError::Unreachable { host, port, cause }
            }
            TransportError::HttpStatus { status, path, body } => {
                SoundTouchError::DeviceHttp { status, path, body }
            }
            TransportError::Parse(msg) => SoundTouchError::MalformedXml {
                tag: String::new(),
                text: msg,
            },
            TransportError::Canceled => SoundTouchError::Canceled,
        }
    }
}

/// Convenience Result type alias for SoundTouch API operations.
pub type Result<T> = std::result::Result<T, SoundTouchError>;
