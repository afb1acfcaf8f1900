//! Private HTTP client for SoundTouch device communication
//!
//! This crate provides a minimal blocking HTTP client specifically designed
//! for the XML Web API that SoundTouch speakers expose on port 8090. It
//! handles URL construction, per-request deadlines, and parsing response
//! bodies into XML element trees.

mod error;

pub use error::TransportError;

use std::time::Duration;
use xmltree::Element;

/// Default deadline applied to requests issued without an explicit timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A minimal HTTP client for SoundTouch device communication
#[derive(Debug, Clone)]
pub struct WebApiClient {
    agent: ureq::Agent,
}

impl WebApiClient {
    /// Create a new Web API client with default configuration
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .build(),
        }
    }

    /// Fetch an endpoint with the default 30-second deadline.
    pub fn get(&self, host: &str, port: u16, path: &str) -> Result<Element, TransportError> {
        self.get_with_timeout(host, port, path, DEFAULT_TIMEOUT)
    }

    /// Fetch an endpoint and parse the response body as XML.
    ///
    /// # Arguments
    /// * `host` - Device host name or IP address
    /// * `port` - Device Web API port (typically 8090)
    /// * `path` - Endpoint path including the leading slash
    /// * `timeout` - Overall deadline for the request
    pub fn get_with_timeout(
        &self,
        host: &str,
        port: u16,
        path: &str,
        timeout: Duration,
    ) -> Result<Element, TransportError> {
        if timeout.is_zero() {
            return Err(TransportError::Canceled);
        }

        let url = format!("http://{}:{}{}", host, port, path);
        let response = self
            .agent
            .get(&url)
            .timeout(timeout)
            .call()
            .map_err(|e| Self::classify(e, host, port, path))?;

        Self::read_body(response, host, port)
    }

    /// Send an XML request body with the default 30-second deadline.
    pub fn post(
        &self,
        host: &str,
        port: u16,
        path: &str,
        body: &str,
    ) -> Result<Element, TransportError> {
        self.post_with_timeout(host, port, path, body, DEFAULT_TIMEOUT)
    }

    /// Send an XML request body and parse the response body as XML.
    ///
    /// # Arguments
    /// * `host` - Device host name or IP address
    /// * `port` - Device Web API port (typically 8090)
    /// * `path` - Endpoint path including the leading slash
    /// * `body` - UTF-8 XML request body, sent without an XML declaration
    /// * `timeout` - Overall deadline for the request
    pub fn post_with_timeout(
        &self,
        host: &str,
        port: u16,
        path: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<Element, TransportError> {
        if timeout.is_zero() {
            return Err(TransportError::Canceled);
        }

        let url = format!("http://{}:{}{}", host, port, path);
        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/xml")
            .timeout(timeout)
            .send_string(body)
            .map_err(|e| Self::classify(e, host, port, path))?;

        Self::read_body(response, host, port)
    }

    /// Split a ureq failure into the HTTP-status and unreachable cases.
    fn classify(err: ureq::Error, host: &str, port: u16, path: &str) -> TransportError {
        match err {
            ureq::Error::Status(status, response) => TransportError::HttpStatus {
                status,
                path: path.to_string(),
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => TransportError::Unreachable {
                host: host.to_string(),
                port,
                cause: transport.to_string(),
            },
        }
    }

    fn read_body(
        response: ureq::Response,
        host: &str,
        port: u16,
    ) -> Result<Element, TransportError> {
        // A connection dropped mid-body surfaces here, not in call()
        let text = response
            .into_string()
            .map_err(|e| TransportError::Unreachable {
                host: host.to_string(),
                port,
                cause: e.to_string(),
            })?;

        Element::parse(text.as_bytes()).map_err(|e| TransportError::Parse(e.to_string()))
    }
}

impl Default for WebApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let _client = WebApiClient::new();
        let _default_client = WebApiClient::default();
    }

    #[test]
    fn test_zero_timeout_is_canceled_without_io() {
        let client = WebApiClient::new();

        // Nothing listens on this address; the request must fail before
        // touching the socket.
        let result = client.get_with_timeout("192.0.2.1", 8090, "/volume", Duration::ZERO);

        match result {
            Err(TransportError::Canceled) => {}
            other => panic!("Expected Canceled, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_timeout_post_is_canceled_without_io() {
        let client = WebApiClient::new();

        let result = client.post_with_timeout(
            "192.0.2.1",
            8090,
            "/volume",
            "<volume>10</volume>",
            Duration::ZERO,
        );

        match result {
            Err(TransportError::Canceled) => {}
            other => panic!("Expected Canceled, got {:?}", other),
        }
    }

    #[test]
    fn test_connection_refused_is_unreachable() {
        let client = WebApiClient::new();

        // Bind and immediately drop a listener so the port is closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = client.get_with_timeout(
            "127.0.0.1",
            port,
            "/info",
            Duration::from_secs(2),
        );

        match result {
            Err(TransportError::Unreachable { host, port: p, .. }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(p, port);
            }
            other => panic!("Expected Unreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::HttpStatus {
            status: 500,
            path: "/volume".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 500 from /volume");

        let err = TransportError::Unreachable {
            host: "192.168.1.80".to_string(),
            port: 8090,
            cause: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("192.168.1.80:8090"));
    }
}
