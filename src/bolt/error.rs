//! Bolt protocol error types.

use std::io;

use thiserror::Error;

use super::packstream::PackStreamError;

/// Result type for Bolt operations.
pub type BoltResult<T> = Result<T, BoltError>;

/// Classifying tag for wire-level violations. Errors carrying this tag
/// are fatal to the connection.
pub const PROTOCOL_ERROR: &str = "ProtocolError";

/// Classifying tag for caller mistakes: unpackable parameter values and
/// capabilities the negotiated protocol version lacks.
pub const CLIENT_ERROR: &str = "ClientError";

/// Classifying tag for transport failures.
pub const SERVICE_UNAVAILABLE: &str = "ServiceUnavailable";

/// Bolt protocol errors.
#[derive(Error, Debug)]
pub enum BoltError {
    /// Wire-level violation (invalid message format, unexpected data)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Caller supplied something the protocol cannot express
    #[error("Usage error: {0}")]
    Usage(String),

    /// Operation requires a capability the peer or protocol version lacks
    #[error("Capability error: {0}")]
    Capability(String),

    /// PackStream codec error
    #[error("PackStream error: {0}")]
    PackStream(#[from] PackStreamError),

    /// FAILURE response from the server
    #[error("Server failure: {code}: {message}")]
    Server {
        /// Server error code, `Neo.{classification}.{category}.{title}`
        code: String,
        /// Human-readable server message
        message: String,
    },

    /// I/O error from the transport
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BoltError {
    /// Create a protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Create a capability error.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    /// Create a server failure from a FAILURE response.
    pub fn server(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Server {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The error-classifying tag.
    pub fn classification(&self) -> &str {
        match self {
            BoltError::Protocol(_) => PROTOCOL_ERROR,
            BoltError::PackStream(e) if e.is_protocol_violation() => PROTOCOL_ERROR,
            BoltError::PackStream(_) | BoltError::Usage(_) | BoltError::Capability(_) => {
                CLIENT_ERROR
            }
            BoltError::Server { code, .. } => code,
            BoltError::Io(_) => SERVICE_UNAVAILABLE,
        }
    }

    /// True when the connection cannot be reused after this error.
    ///
    /// Codec violations and transport failures tear the connection down;
    /// usage and capability mistakes are reported to the caller and leave
    /// the connection intact (the façade escalates the ones that must be
    /// fatal, such as transaction configuration on v1).
    pub fn is_fatal(&self) -> bool {
        match self {
            BoltError::Protocol(_) | BoltError::Io(_) => true,
            BoltError::PackStream(e) => e.is_protocol_violation(),
            BoltError::Usage(_) | BoltError::Capability(_) | BoltError::Server { .. } => false,
        }
    }
}
