//! Method name to decoder table.
//!
//! A [`MessageRegistry`] is built once at startup and then only read. Share it
//! between readers with an `Arc`.

use crate::codec::{self, NodeKind};
use crate::error::{LspError, Result};
use crate::types::{IncomingMessage, Method, JSONRPC_VERSION};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Builds a typed message from a whole message document.
pub type Decoder = Box<dyn Fn(Value) -> Result<IncomingMessage> + Send + Sync>;

/// Maps wire method names to decoders.
pub struct MessageRegistry {
    decoders: HashMap<String, Decoder>,
}

impl MessageRegistry {
    /// Create a registry with nothing registered.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Create a registry with every [`Method`] registered under its wire name.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for method in Method::ALL {
            registry.register_method(method);
        }
        registry
    }

    /// Associate `method` with `decoder`, returning the decoder it replaces.
    pub fn register(&mut self, method: impl Into<String>, decoder: Decoder) -> Option<Decoder> {
        let method = method.into();
        let previous = self.decoders.insert(method.clone(), decoder);
        if previous.is_some() {
            log::debug!("Replaced decoder for method \"{}\"", method);
        }
        previous
    }

    /// Register a [`Method`] with its own decoder.
    pub fn register_method(&mut self, method: Method) -> Option<Decoder> {
        self.register(method.as_str(), Box::new(move |document| method.decode(document)))
    }

    pub fn contains(&self, method: &str) -> bool {
        self.decoders.contains_key(method)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Resolve a message document to a typed message.
    ///
    /// A wrong or missing `jsonrpc` version is an error. A missing or unknown
    /// method, or params that do not decode, are logged and give `Ok(None)`.
    pub fn dispatch(&self, document: Value) -> Result<Option<IncomingMessage>> {
        match codec::str_member(&document, "jsonrpc") {
            Some(JSONRPC_VERSION) => {}
            Some(other) => return Err(LspError::VersionMismatch(other.to_string())),
            None => {
                let found = document.get("jsonrpc").map_or("nothing".to_string(), |version| {
                    format!("{} ({})", version, NodeKind::of(version))
                });
                return Err(LspError::VersionMismatch(found));
            }
        }

        let method = match codec::str_member(&document, "method") {
            Some(method) => method.to_string(),
            None => {
                log::error!("Dropping message without a method: {}", document);
                return Ok(None);
            }
        };

        let Some(decoder) = self.decoders.get(&method) else {
            log::warn!("Unable to find registered handler for method \"{}\"", method);
            return Ok(None);
        };

        match decoder(document) {
            Ok(message) => {
                log::trace!("Dispatched {}", method);
                Ok(Some(message))
            }
            Err(e) => {
                log::warn!("Dropping \"{}\" message with unreadable params: {}", method, e);
                Ok(None)
            }
        }
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for MessageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("MessageRegistry")
            .field("methods", &methods)
            .finish()
    }
}
