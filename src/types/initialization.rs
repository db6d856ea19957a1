//! Parameters of the initialization handshake.

use crate::types::{DocumentUri, TraceLevel};
use serde::{Deserialize, Serialize};

/// Parameters of the `initialize` request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// The process id of the parent process that started the server.
    #[serde(default)]
    pub process_id: Option<u32>,

    /// Information about the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_info: Option<ClientInfo>,

    /// The rootPath of the workspace. Is null if no folder is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,

    /// The rootUri of the workspace. Is null if no folder is open.
    #[serde(default)]
    pub root_uri: Option<DocumentUri>,

    /// User provided initialization options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialization_options: Option<serde_json::Value>,

    /// The capabilities provided by the client, kept as sent.
    #[serde(default)]
    pub capabilities: serde_json::Value,

    /// The initial trace setting. If omitted trace is disabled ('off').
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceLevel>,
}

impl InitializeParams {
    /// The effective trace level.
    pub fn trace_level(&self) -> TraceLevel {
        self.trace.unwrap_or_default()
    }

    /// The workspace root as a filesystem path, preferring `rootUri` over
    /// the deprecated `rootPath`.
    pub fn root_directory(&self) -> Option<String> {
        self.root_uri
            .as_ref()
            .map(DocumentUri::path)
            .or_else(|| self.root_path.clone())
    }
}

/// Information about the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// The name of the client as defined by the client.
    pub name: String,

    /// The client's version as defined by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
