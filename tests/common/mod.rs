//! Common test utilities for lsp-wire tests
//!
//! Frame builders, canned message bodies and a few value constructors shared
//! by the integration tests.
#![allow(dead_code)]
use lsp_wire::{transport::encode_frame, types::*, MessageRegistry};
use std::sync::Arc;

/// Wrap a JSON body in a Content-Length header block
pub fn frame(body: &str) -> Vec<u8> {
    encode_frame(body.as_bytes())
}

/// Concatenate several frames into one byte stream
pub fn frames(bodies: &[&str]) -> Vec<u8> {
    bodies.iter().flat_map(|body| frame(body)).collect()
}

/// A registry with every supported method
pub fn registry() -> Arc<MessageRegistry> {
    Arc::new(MessageRegistry::with_defaults())
}

/// Sample message bodies for testing
pub struct TestMessages;

impl TestMessages {
    pub fn initialize_request() -> String {
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"processId":12345,"rootUri":"file:///test/project","capabilities":{"textDocument":{"codeLens":{"dynamicRegistration":false}}},"trace":"verbose"}}"#.to_string()
    }

    pub fn initialized_notification() -> String {
        r#"{"jsonrpc":"2.0","method":"initialized","params":{}}"#.to_string()
    }

    pub fn document_symbol_request() -> String {
        r#"{"jsonrpc":"2.0","id":2,"method":"textDocument/documentSymbol","params":{"textDocument":{"uri":"file:///test/project/main.cc"}}}"#.to_string()
    }

    pub fn code_lens_request() -> String {
        r#"{"jsonrpc":"2.0","id":"lens-3","method":"textDocument/codeLens","params":{"textDocument":{"uri":"file:///test/project/main.cc"}}}"#.to_string()
    }

    pub fn code_lens_resolve_request() -> String {
        r#"{"jsonrpc":"2.0","id":4,"method":"codeLens/resolve","params":{"range":{"start":{"line":3,"character":0},"end":{"line":3,"character":4}},"command":{"title":"2 references","command":"superindex.showReferences","arguments":["file:///test/project/main.cc",{"line":3,"character":0},[{"uri":"file:///test/project/a.cc","range":{"start":{"line":9,"character":2},"end":{"line":9,"character":6}}}]]}}}"#.to_string()
    }

    pub fn workspace_symbol_request() -> String {
        r#"{"jsonrpc":"2.0","id":5,"method":"workspace/symbol","params":{"query":"Foo"}}"#.to_string()
    }

    pub fn cancel_notification() -> String {
        r#"{"jsonrpc":"2.0","method":"$/cancelRequest","params":{"id":5}}"#.to_string()
    }

    pub fn unknown_method() -> String {
        r#"{"jsonrpc":"2.0","method":"totally/unknown","params":{}}"#.to_string()
    }

    pub fn wrong_version() -> String {
        r#"{"jsonrpc":"1.0","method":"initialized"}"#.to_string()
    }
}

/// Assert that two JSON values are equivalent, ignoring field order
pub fn assert_json_eq(expected: &str, actual: &str) {
    let expected: serde_json::Value =
        serde_json::from_str(expected).expect("Expected JSON should be valid");
    let actual: serde_json::Value =
        serde_json::from_str(actual).expect("Actual JSON should be valid");
    assert_eq!(expected, actual, "JSON values should be equal");
}

/// Create a range for testing
pub fn test_range() -> Range {
    Range::new(Position::new(0, 0), Position::new(0, 5))
}

/// Create a location for testing
pub fn test_location(path: &str, line: u32) -> Location {
    Location::new(
        DocumentUri::from_path(path),
        Range::from_coords(line, 0, line, 4),
    )
}
