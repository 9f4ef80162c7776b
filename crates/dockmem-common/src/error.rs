//! Unified error types for the dockmem workspace.
//!
//! Library crates return [`DockmemError`]; the binary wraps it in
//! `anyhow` context at each collaborator boundary.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DockmemError {
    /// An I/O operation against an endpoint or terminal failed.
    #[error("I/O error on {endpoint}: {source}")]
    Io {
        /// Endpoint (socket, address, or sink) where the error occurred.
        endpoint: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The daemon answered with a non-success status.
    #[error("daemon returned {status}: {message}")]
    Daemon {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the daemon.
        message: String,
    },

    /// An HTTP exchange with the daemon failed below the status line.
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        /// Daemon endpoint the request was sent to.
        endpoint: String,
        /// Description reported by the HTTP client.
        message: String,
    },

    /// The daemon's response could not be understood.
    #[error("protocol error: {message}")]
    Protocol {
        /// Description of the malformed response.
        message: String,
    },

    /// A stats record or daemon payload could not be decoded.
    #[error("decode error: {source}")]
    Decode {
        /// Underlying deserialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl DockmemError {
    /// Wraps an I/O error with the endpoint it happened on.
    pub fn io(endpoint: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Wraps an HTTP client failure with the endpoint it happened on.
    pub fn transport(endpoint: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// Builds a protocol error from a message.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DockmemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daemon_error_includes_status_and_message() {
        let err = DockmemError::Daemon {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "daemon returned 500: boom");
    }

    #[test]
    fn not_found_names_kind_and_id() {
        let err = DockmemError::NotFound {
            kind: "container",
            id: "web".into(),
        };
        assert_eq!(err.to_string(), "container not found: web");
    }

    #[test]
    fn decode_error_converts_from_serde() {
        let source = serde_json::from_str::<u64>("nope").unwrap_err();
        let err: DockmemError = source.into();
        assert!(matches!(err, DockmemError::Decode { .. }));
        assert!(err.to_string().starts_with("decode error:"));
    }

    #[test]
    fn transport_error_names_endpoint() {
        let err = DockmemError::transport("tcp://127.0.0.1:2375", "connection refused");
        assert_eq!(
            err.to_string(),
            "request to tcp://127.0.0.1:2375 failed: connection refused"
        );
    }

    #[test]
    fn io_helper_keeps_endpoint() {
        let err = DockmemError::io(
            "/var/run/docker.sock",
            std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        );
        assert!(err.to_string().contains("/var/run/docker.sock"));
    }
}
