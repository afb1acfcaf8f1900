//! Error types for the Web API client

use thiserror::Error;

/// Errors that can occur while talking to a device's Web API port
#[derive(Debug, Error)]
pub enum TransportError {
    /// The device could not be reached, or the connection broke mid-exchange
    #[error("device unreachable at {host}:{port}: {cause}")]
    Unreachable {
        host: String,
        port: u16,
        cause: String,
    },

    /// The device answered with a non-success HTTP status
    #[error("HTTP {status} from {path}")]
    HttpStatus {
        status: u16,
        path: String,
        body: String,
    },

    /// The response body was not well-formed XML
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// The caller's deadline had already elapsed before the request was sent
    #[error("request canceled before dispatch")]
    Canceled,
}
