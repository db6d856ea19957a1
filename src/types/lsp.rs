//! Core LSP types as defined by the Language Server Protocol specification.
//!
//! Positions, ranges and locations, plus the payloads of the document symbol,
//! code lens, workspace symbol and window message methods.

use crate::types::DocumentUri;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Position in a text document expressed as zero-based line and character offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line position in a document (zero-based).
    pub line: u32,
    /// Character offset on a line in a document (zero-based).
    pub character: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Create a position at the start of a document.
    pub fn start() -> Self {
        Self::new(0, 0)
    }
}

/// A range in a text document expressed as (zero-based) start and end positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// The range's start position.
    pub start: Position,
    /// The range's end position.
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a zero-width range at the given position.
    pub fn at(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Create a range from line/character coordinates.
    pub fn from_coords(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> Self {
        Self::new(
            Position::new(start_line, start_char),
            Position::new(end_line, end_char),
        )
    }

    /// Check if this range contains the given position.
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }

    /// Check if this range is empty (start equals end).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Position> for Range {
    fn from(position: Position) -> Self {
        Range::at(position)
    }
}

/// Represents a location inside a resource, such as a line inside a text file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// The resource's URI.
    pub uri: DocumentUri,
    /// The range in the document.
    pub range: Range,
}

impl Location {
    /// Create a new location.
    pub fn new(uri: DocumentUri, range: Range) -> Self {
        Self { uri, range }
    }
}

/// The trace setting a client asks for at initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TraceLevel {
    #[default]
    Off,
    Messages,
    Verbose,
}

impl TraceLevel {
    /// The wire spelling of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLevel::Off => "off",
            TraceLevel::Messages => "messages",
            TraceLevel::Verbose => "verbose",
        }
    }

    /// Look up a wire spelling.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "off" => Some(TraceLevel::Off),
            "messages" => Some(TraceLevel::Messages),
            "verbose" => Some(TraceLevel::Verbose),
            _ => None,
        }
    }

    /// Apply a wire spelling. Unknown spellings keep the current level.
    pub fn update_from_wire(&mut self, value: &str) {
        match Self::from_wire(value) {
            Some(level) => *self = level,
            None => log::debug!("Ignoring unknown trace level {:?}, keeping {:?}", value, self),
        }
    }
}

impl Serialize for TraceLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TraceLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        let mut level = TraceLevel::default();
        level.update_from_wire(&value);
        Ok(level)
    }
}

/// Arguments of the "show references" command attached to a code lens.
///
/// Written as the positional array `[uri, position, locations]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArguments {
    pub uri: DocumentUri,
    pub position: Position,
    pub locations: Vec<Location>,
}

impl Serialize for CommandArguments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.uri)?;
        tuple.serialize_element(&self.position)?;
        tuple.serialize_element(&self.locations)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for CommandArguments {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ArgumentsVisitor;

        impl<'de> Visitor<'de> for ArgumentsVisitor {
            type Value = CommandArguments;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of [uri, position, locations]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<CommandArguments, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let uri = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let position = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let locations = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                Ok(CommandArguments {
                    uri,
                    position,
                    locations,
                })
            }
        }

        deserializer.deserialize_seq(ArgumentsVisitor)
    }
}

/// A command attached to a code lens or code action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command<A = Vec<serde_json::Value>> {
    /// Title of the command, like 'save'.
    pub title: String,
    /// The identifier of the actual command handler.
    pub command: String,
    /// Arguments that the command handler should be invoked with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<A>,
}

/// A code lens: a command shown inline with source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeLens {
    /// The range in which this code lens is valid. Should only span a single line.
    pub range: Range,
    /// The command this code lens represents. Filled in by `codeLens/resolve`
    /// when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Command<CommandArguments>>,
    /// Data preserved between a `textDocument/codeLens` and a `codeLens/resolve` request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Text documents are identified using a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextDocumentIdentifier {
    /// The text document's URI.
    pub uri: DocumentUri,
}

impl TextDocumentIdentifier {
    pub fn new(uri: DocumentUri) -> Self {
        Self { uri }
    }
}

/// Parameters of `textDocument/documentSymbol`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSymbolParams {
    pub text_document: TextDocumentIdentifier,
}

/// Parameters of `textDocument/codeLens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLensParams {
    pub text_document: TextDocumentIdentifier,
}

/// Parameters of `workspace/symbol`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSymbolParams {
    /// A query string to filter symbols by. Clients may send an empty string
    /// to request all symbols.
    pub query: String,
}

/// The kind of a window message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Error = 1,
    Warning = 2,
    Info = 3,
    Log = 4,
}

impl Serialize for MessageType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        match value {
            1 => Ok(MessageType::Error),
            2 => Ok(MessageType::Warning),
            3 => Ok(MessageType::Info),
            4 => Ok(MessageType::Log),
            _ => Err(de::Error::custom(format!(
                "Invalid message type: {}",
                value
            ))),
        }
    }
}

/// Parameters of `window/logMessage` and `window/showMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessageParams {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub message: String,
}
