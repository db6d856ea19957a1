//! JSON-RPC 2.0 message envelopes.
//!
//! Inbound messages are resolved to [`IncomingMessage`], one variant per
//! supported [`Method`]. Outbound messages are [`ResponseMessage`] and
//! [`NotificationMessage`].

use crate::codec;
use crate::error::{ResponseError, Result};
use crate::types::{
    CodeLens, CodeLensParams, DocumentSymbolParams, InitializeParams, LogMessageParams,
    MessageType, RequestId, WorkspaceSymbolParams,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The only protocol version this crate speaks.
pub const JSONRPC_VERSION: &str = "2.0";

/// Methods this crate decodes into typed messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    CancelRequest,
    Initialize,
    Initialized,
    DocumentSymbol,
    CodeLens,
    CodeLensResolve,
    WorkspaceSymbol,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::CancelRequest,
        Method::Initialize,
        Method::Initialized,
        Method::DocumentSymbol,
        Method::CodeLens,
        Method::CodeLensResolve,
        Method::WorkspaceSymbol,
    ];

    /// The wire name of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::CancelRequest => "$/cancelRequest",
            Method::Initialize => "initialize",
            Method::Initialized => "initialized",
            Method::DocumentSymbol => "textDocument/documentSymbol",
            Method::CodeLens => "textDocument/codeLens",
            Method::CodeLensResolve => "codeLens/resolve",
            Method::WorkspaceSymbol => "workspace/symbol",
        }
    }

    /// Whether messages of this method carry no id and expect no response.
    pub fn is_notification(&self) -> bool {
        matches!(self, Method::CancelRequest | Method::Initialized)
    }

    /// Decode a whole message document as this method.
    pub fn decode(self, document: serde_json::Value) -> Result<IncomingMessage> {
        let message = match self {
            Method::CancelRequest => {
                IncomingMessage::CancelRequest(codec::decode_member(&document, "params")?)
            }
            Method::Initialize => IncomingMessage::Initialize(codec::decode(document)?),
            Method::Initialized => IncomingMessage::Initialized,
            Method::DocumentSymbol => IncomingMessage::DocumentSymbol(codec::decode(document)?),
            Method::CodeLens => IncomingMessage::CodeLens(codec::decode(document)?),
            Method::CodeLensResolve => IncomingMessage::CodeLensResolve(codec::decode(document)?),
            Method::WorkspaceSymbol => IncomingMessage::WorkspaceSymbol(codec::decode(document)?),
        };
        Ok(message)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == name)
            .ok_or_else(|| format!("unsupported method: {}", name))
    }
}

/// A request: an id to answer and typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request<P> {
    pub id: RequestId,
    pub params: P,
}

/// Parameters for the $/cancelRequest notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelParams {
    /// The request ID to cancel.
    pub id: RequestId,
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingMessage {
    CancelRequest(CancelParams),
    Initialize(Request<InitializeParams>),
    Initialized,
    DocumentSymbol(Request<DocumentSymbolParams>),
    CodeLens(Request<CodeLensParams>),
    CodeLensResolve(Request<CodeLens>),
    WorkspaceSymbol(Request<WorkspaceSymbolParams>),
}

impl IncomingMessage {
    /// The method this message was sent as.
    pub fn method(&self) -> Method {
        match self {
            IncomingMessage::CancelRequest(_) => Method::CancelRequest,
            IncomingMessage::Initialize(_) => Method::Initialize,
            IncomingMessage::Initialized => Method::Initialized,
            IncomingMessage::DocumentSymbol(_) => Method::DocumentSymbol,
            IncomingMessage::CodeLens(_) => Method::CodeLens,
            IncomingMessage::CodeLensResolve(_) => Method::CodeLensResolve,
            IncomingMessage::WorkspaceSymbol(_) => Method::WorkspaceSymbol,
        }
    }

    /// The id to answer, for requests.
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            IncomingMessage::Initialize(req) => Some(&req.id),
            IncomingMessage::DocumentSymbol(req) => Some(&req.id),
            IncomingMessage::CodeLens(req) => Some(&req.id),
            IncomingMessage::CodeLensResolve(req) => Some(&req.id),
            IncomingMessage::WorkspaceSymbol(req) => Some(&req.id),
            IncomingMessage::CancelRequest(_) | IncomingMessage::Initialized => None,
        }
    }

    pub fn is_request(&self) -> bool {
        !self.method().is_notification()
    }

    pub fn is_notification(&self) -> bool {
        self.method().is_notification()
    }
}

/// Response message sent as a result of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage<T = serde_json::Value> {
    /// JSON-RPC version
    pub jsonrpc: String,
    /// The request ID (same as the request, or null when it could not be read)
    pub id: Option<RequestId>,
    /// The result of a successful request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// The error object in case of failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl<T> ResponseMessage<T> {
    /// Create a successful response.
    pub fn success(id: RequestId, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<RequestId>, error: ResponseError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response represents an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Notification message.
/// A processed notification message must not send a response back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage<P = serde_json::Value> {
    /// JSON-RPC version
    pub jsonrpc: String,
    /// The method to be invoked
    pub method: String,
    /// The notification's parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
}

impl<P> NotificationMessage<P> {
    /// Create a new notification message.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params: None,
        }
    }

    /// Create a new notification message with parameters.
    pub fn with_params(method: impl Into<String>, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params: Some(params),
        }
    }
}

/// Where a window message ends up on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    /// Appended to the output log.
    Log,
    /// Shown to the user in a popup.
    Show,
}

/// A `window/logMessage` or `window/showMessage` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowLogMessage {
    pub display_type: DisplayType,
    pub params: LogMessageParams,
}

impl ShowLogMessage {
    pub fn log(kind: MessageType, message: impl Into<String>) -> Self {
        Self::new(DisplayType::Log, kind, message)
    }

    pub fn show(kind: MessageType, message: impl Into<String>) -> Self {
        Self::new(DisplayType::Show, kind, message)
    }

    fn new(display_type: DisplayType, kind: MessageType, message: impl Into<String>) -> Self {
        Self {
            display_type,
            params: LogMessageParams {
                kind,
                message: message.into(),
            },
        }
    }

    /// The wire method, which depends on the display type.
    pub fn method(&self) -> &'static str {
        match self.display_type {
            DisplayType::Log => "window/logMessage",
            DisplayType::Show => "window/showMessage",
        }
    }

    pub fn into_notification(self) -> NotificationMessage<LogMessageParams> {
        NotificationMessage::with_params(self.method(), self.params)
    }
}
