//! # lsp-wire
//!
//! Message framing and typed dispatch for JSON-RPC based editor protocols such
//! as the Language Server Protocol.
//!
//! Bytes come in as `Content-Length` framed JSON bodies. A [`FrameReader`]
//! takes one frame at a time off the stream and a [`MessageRegistry`] turns
//! the body into an [`IncomingMessage`], whose variants carry strongly typed
//! parameters. What to do with each message is up to the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lsp_wire::{FrameReader, MessageRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(MessageRegistry::with_defaults());
//!     let mut reader = FrameReader::new(tokio::io::stdin(), registry);
//!
//!     loop {
//!         match reader.read_message().await? {
//!             Some(message) => println!("{} {:?}", message.method(), message.id()),
//!             None => continue,
//!         }
//!     }
//! }
//! ```

pub mod codec;
pub mod connection;
pub mod error;
pub mod registry;
pub mod transport;
pub mod types;

pub use connection::Connection;
pub use error::{LspError, ResponseError, Result};
pub use registry::MessageRegistry;
pub use transport::{FrameReader, FrameWriter, ReaderOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::connection::Connection;
    pub use crate::error::{LspError, ResponseError, Result};
    pub use crate::registry::MessageRegistry;
    pub use crate::transport::{FrameReader, FrameWriter};
    pub use crate::types::*;
}
