//! Error types for framing and dispatch.
//!
//! Errors are split by how much of the stream they poison. A fatal error means
//! message boundaries can no longer be trusted and the read loop must stop.
//! Recoverable conditions never show up here: the reader logs them and reports
//! "no message" instead.

use std::fmt;
use thiserror::Error;

/// A specialized Result type for framing and dispatch operations.
pub type Result<T> = std::result::Result<T, LspError>;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum LspError {
    /// IO errors from the underlying byte stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors for individual values
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The `jsonrpc` field was missing or not "2.0"
    #[error("unsupported JSON-RPC version: {0}")]
    VersionMismatch(String),

    /// No blank line terminated the header block within the allowed number of lines
    #[error("header block not terminated within {0} lines")]
    HeaderOverflow(usize),

    /// A header line longer than the allowed number of bytes
    #[error("header line longer than {0} bytes")]
    HeaderLineTooLong(usize),

    /// A Content-Length above the allowed body size
    #[error("Content-Length {value} exceeds the limit of {limit} bytes")]
    ContentTooLarge { value: String, limit: usize },

    /// The stream ended after a frame had started
    #[error("stream ended inside a frame: {0}")]
    TruncatedFrame(String),

    /// A length-delimited body that is not valid JSON
    #[error("malformed message body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// A document URI that does not parse as a URL
    #[error("invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    /// Protocol-level errors carried in a response
    #[error("LSP protocol error: {0}")]
    Protocol(#[from] ResponseError),

    /// The connection's background reader or writer is gone
    #[error("Connection error: {0}")]
    Connection(String),
}

impl LspError {
    /// Whether the stream can no longer be trusted after this error.
    ///
    /// Value-level `Json` and `Protocol` errors concern a single message and
    /// leave the framing intact.
    pub fn is_fatal(&self) -> bool {
        match self {
            LspError::Io(_)
            | LspError::VersionMismatch(_)
            | LspError::HeaderOverflow(_)
            | LspError::HeaderLineTooLong(_)
            | LspError::ContentTooLarge { .. }
            | LspError::TruncatedFrame(_)
            | LspError::MalformedBody(_)
            | LspError::Connection(_) => true,
            LspError::Json(_) | LspError::InvalidUri(_) | LspError::Protocol(_) => false,
        }
    }

    /// Whether the peer closed the stream between frames.
    ///
    /// A stream that ends partway through a frame is a
    /// [`LspError::TruncatedFrame`] instead.
    pub fn is_eof(&self) -> bool {
        matches!(self, LspError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

/// LSP ResponseError as defined by the JSON-RPC specification.
/// This corresponds to the error object in LSP response messages.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResponseError {
    /// A number indicating the error type that occurred.
    pub code: i32,
    /// A string providing a short description of the error.
    pub message: String,
    /// A primitive or structured value that contains additional information about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ResponseError {}

/// Error codes as defined by the LSP specification.
pub mod error_codes {
    // JSON RPC error codes
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const SERVER_NOT_INITIALIZED: i32 = -32002;
    pub const UNKNOWN_ERROR_CODE: i32 = -32001;

    // LSP reserved
    pub const CONTENT_MODIFIED: i32 = -32801;
    pub const REQUEST_CANCELLED: i32 = -32800;
}

impl ResponseError {
    /// Create a new ResponseError with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a new ResponseError with additional data.
    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a parse error.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::PARSE_ERROR, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, message)
    }

    /// Create a method not found error.
    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(error_codes::METHOD_NOT_FOUND, message)
    }

    /// Create an invalid params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message)
    }

    /// Create an internal error.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }

    /// Create a server not initialized error.
    pub fn server_not_initialized(message: impl Into<String>) -> Self {
        Self::new(error_codes::SERVER_NOT_INITIALIZED, message)
    }

    /// Create a request cancelled error.
    pub fn request_cancelled(message: impl Into<String>) -> Self {
        Self::new(error_codes::REQUEST_CANCELLED, message)
    }

    /// Create a content modified error.
    pub fn content_modified(message: impl Into<String>) -> Self {
        Self::new(error_codes::CONTENT_MODIFIED, message)
    }
}
