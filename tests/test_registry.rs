//! Message registry tests
//!
//! Dispatch outcomes for well-formed, unknown, malformed and foreign-version
//! documents, and registration overrides.

mod common;

use common::*;
use lsp_wire::{registry::Decoder, types::*, LspError, MessageRegistry};
use serde_json::{json, Value};

fn document(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[test]
fn test_dispatch_typed_payloads() {
    let registry = MessageRegistry::with_defaults();

    let message = registry
        .dispatch(document(&TestMessages::document_symbol_request()))
        .unwrap();
    match message {
        Some(IncomingMessage::DocumentSymbol(request)) => {
            assert_eq!(request.id, RequestId::Number(2));
            assert_eq!(
                request.params.text_document.uri.path(),
                "/test/project/main.cc"
            );
        }
        other => panic!("Expected documentSymbol request, got {:?}", other),
    }

    let message = registry
        .dispatch(document(&TestMessages::code_lens_request()))
        .unwrap()
        .unwrap();
    assert_eq!(message.id(), Some(&RequestId::from("lens-3")));
}

#[test]
fn test_dispatch_version_mismatch() {
    let registry = MessageRegistry::with_defaults();
    let result = registry.dispatch(document(&TestMessages::wrong_version()));
    assert!(matches!(result, Err(LspError::VersionMismatch(_))));
}

#[test]
fn test_dispatch_unknown_method() {
    let registry = MessageRegistry::with_defaults();
    let result = registry.dispatch(document(&TestMessages::unknown_method()));
    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_empty_registry_drops_everything() {
    let registry = MessageRegistry::new();
    let result = registry.dispatch(document(&TestMessages::initialize_request()));
    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_non_string_method_is_dropped() {
    let registry = MessageRegistry::with_defaults();
    let result = registry.dispatch(json!({"jsonrpc": "2.0", "method": 17}));
    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_request_missing_params_is_dropped() {
    let registry = MessageRegistry::with_defaults();
    let result = registry.dispatch(json!({"jsonrpc": "2.0", "id": 1, "method": "workspace/symbol"}));
    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_custom_decoder_for_unlisted_method() {
    let mut registry = MessageRegistry::with_defaults();
    let decoder: Decoder = Box::new(|document: Value| {
        let query: String = lsp_wire::codec::decode_member(&document["params"], "text")?;
        Ok(IncomingMessage::WorkspaceSymbol(Request {
            id: lsp_wire::codec::decode_member(&document, "id")?,
            params: WorkspaceSymbolParams { query },
        }))
    });
    assert!(registry.register("$superindex/search", decoder).is_none());

    let message = registry
        .dispatch(json!({
            "jsonrpc": "2.0",
            "id": 11,
            "method": "$superindex/search",
            "params": {"text": "Foo::bar"}
        }))
        .unwrap()
        .unwrap();

    assert_eq!(message.method(), Method::WorkspaceSymbol);
    assert_eq!(message.id(), Some(&RequestId::Number(11)));
}

#[test]
fn test_reregistration_overwrites() {
    let mut registry = MessageRegistry::with_defaults();
    let before = registry.len();

    let previous = registry.register(
        Method::WorkspaceSymbol.as_str(),
        Box::new(|_| Ok(IncomingMessage::Initialized)),
    );
    assert!(previous.is_some());
    assert_eq!(registry.len(), before);

    let message = registry
        .dispatch(document(&TestMessages::workspace_symbol_request()))
        .unwrap();
    assert_eq!(message, Some(IncomingMessage::Initialized));
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = registry();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                registry
                    .dispatch(document(&TestMessages::cancel_notification()))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            Some(IncomingMessage::CancelRequest(CancelParams {
                id: RequestId::Number(5)
            }))
        );
    }
}

#[test]
fn test_debug_lists_methods() {
    let registry = MessageRegistry::with_defaults();
    let debug = format!("{:?}", registry);
    assert!(debug.contains("codeLens/resolve"));
    assert!(debug.contains("$/cancelRequest"));
}
