//! Wire value types.
//!
//! This module contains the identifier and URI types every message carries,
//! and re-exports the JSON-RPC envelope and LSP payload types.

use crate::error::Result;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub mod initialization;
pub mod jsonrpc;
pub mod lsp;

pub use initialization::*;
pub use jsonrpc::*;
pub use lsp::*;

/// Identifier of a request, echoed back in its response.
/// Either a number or a string as in JSON-RPC 2.0; `Number(1)` and
/// `String("1")` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        RequestId::Number(value)
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        RequestId::String(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        RequestId::String(value.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for RequestId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RequestId::Number(n) => serializer.serialize_i64(*n),
            RequestId::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestIdVisitor;

        impl<'de> Visitor<'de> for RequestIdVisitor {
            type Value = RequestId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or a string request id")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<RequestId, E> {
                Ok(RequestId::Number(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<RequestId, E> {
                i64::try_from(v)
                    .map(RequestId::Number)
                    .map_err(|_| E::custom(format!("request id {} is out of range", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RequestId, E> {
                Ok(RequestId::String(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<RequestId, E> {
                Ok(RequestId::String(v))
            }
        }

        deserializer.deserialize_any(RequestIdVisitor)
    }
}

const FILE_SCHEME: &str = "file:///";

/// A `file:///` URI naming a document on disk.
///
/// Built from a filesystem path with [`DocumentUri::from_path`] and turned
/// back into one with [`DocumentUri::path`]. The encoder only escapes the
/// colon of a leading drive letter (`C:` becomes `C%3A`); everything else is
/// copied as is. Because existing `%3A` text is not escaped, a POSIX path
/// whose first component is literally `c%3A` comes back as the drive path
/// `c:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentUri(String);

impl DocumentUri {
    /// Wrap an already-encoded URI string as received on the wire.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Encode a filesystem path.
    ///
    /// `/home/a.rs` becomes `file:///home/a.rs`, `C:\a.rs` becomes
    /// `file:///C%3A\a.rs`. A single leading `/` before a drive letter is
    /// dropped.
    pub fn from_path(path: &str) -> Self {
        let rest = path.strip_prefix('/').unwrap_or(path);

        let mut raw = String::with_capacity(FILE_SCHEME.len() + rest.len() + 2);
        raw.push_str(FILE_SCHEME);
        match split_drive(rest, ":") {
            Some((letter, tail)) => {
                raw.push(letter);
                raw.push_str("%3A");
                raw.push_str(tail);
            }
            None => raw.push_str(rest),
        }
        Self(raw)
    }

    /// Decode the filesystem path, with backslashes normalized to `/`.
    ///
    /// URIs that are not `file:///` URIs are returned unchanged apart from
    /// the slash normalization.
    pub fn path(&self) -> String {
        let path = match self.0.strip_prefix(FILE_SCHEME) {
            Some(rest) => match split_drive(rest, "%3A").or_else(|| split_drive(rest, "%3a")) {
                Some((letter, tail)) => format!("{}:{}", letter, tail),
                None => format!("/{}", rest),
            },
            None => self.0.clone(),
        };
        path.replace('\\', "/")
    }

    /// The raw URI string as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a [`url::Url`].
    pub fn to_url(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.0)?)
    }
}

/// Split `<ascii letter><separator><tail>` into the letter and the tail.
fn split_drive<'a>(s: &'a str, separator: &str) -> Option<(char, &'a str)> {
    let mut chars = s.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    let tail = chars.as_str().strip_prefix(separator)?;
    Some((letter, tail))
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<url::Url> for DocumentUri {
    fn from(url: url::Url) -> Self {
        Self(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_id_arms_are_distinct() {
        assert_ne!(RequestId::Number(1), RequestId::String("1".to_string()));

        let number: RequestId = serde_json::from_value(json!(1)).unwrap();
        let string: RequestId = serde_json::from_value(json!("1")).unwrap();
        assert_eq!(number, RequestId::Number(1));
        assert_eq!(string, RequestId::String("1".to_string()));
    }

    #[test]
    fn test_request_id_rejects_other_kinds() {
        assert!(serde_json::from_value::<RequestId>(json!(true)).is_err());
        assert!(serde_json::from_value::<RequestId>(json!(null)).is_err());
        assert!(serde_json::from_value::<RequestId>(json!(1.5)).is_err());
        assert!(serde_json::from_value::<RequestId>(json!([1])).is_err());
        assert!(serde_json::from_value::<RequestId>(json!(u64::MAX)).is_err());
    }

    #[test]
    fn test_uri_from_windows_path() {
        let uri = DocumentUri::from_path("c:/Users/jacob/Desktop/superindex");
        assert_eq!(uri.as_str(), "file:///c%3A/Users/jacob/Desktop/superindex");
        assert_eq!(uri.path(), "c:/Users/jacob/Desktop/superindex");

        let uri = DocumentUri::from_path("C:\\src\\main.cc");
        assert_eq!(uri.as_str(), "file:///C%3A\\src\\main.cc");
        assert_eq!(uri.path(), "C:/src/main.cc");
    }

    #[test]
    fn test_uri_from_posix_path() {
        let uri = DocumentUri::from_path("/home/user/a.rs");
        assert_eq!(uri.as_str(), "file:///home/user/a.rs");
        assert_eq!(uri.path(), "/home/user/a.rs");
    }

    #[test]
    fn test_uri_only_escapes_drive_colon() {
        let uri = DocumentUri::from_path("/srv/a:b/c.rs");
        assert_eq!(uri.as_str(), "file:///srv/a:b/c.rs");
        assert_eq!(uri.path(), "/srv/a:b/c.rs");

        let uri = DocumentUri::from_path("D:/x:y");
        assert_eq!(uri.as_str(), "file:///D%3A/x:y");
        assert_eq!(uri.path(), "D:/x:y");
    }

    #[test]
    fn test_uri_literal_escape_is_ambiguous() {
        // Not a drive letter on the way in, read as one on the way out.
        let uri = DocumentUri::from_path("/c%3A/notes");
        assert_eq!(uri.as_str(), "file:///c%3A/notes");
        assert_eq!(uri.path(), "c:/notes");

        let uri = DocumentUri::from_path("/tmp/a%3Ab");
        assert_eq!(uri.path(), "/tmp/a%3Ab");
    }

    #[test]
    fn test_uri_lowercase_escape_from_editor() {
        let uri = DocumentUri::from_raw("file:///d%3a/proj/lib.rs");
        assert_eq!(uri.path(), "d:/proj/lib.rs");
    }

    #[test]
    fn test_non_file_uri_path() {
        let uri = DocumentUri::from_raw("untitled:Untitled-1");
        assert_eq!(uri.path(), "untitled:Untitled-1");
    }

    #[test]
    fn test_uri_serializes_as_string() {
        let uri = DocumentUri::from_path("/a.rs");
        assert_eq!(serde_json::to_value(&uri).unwrap(), json!("file:///a.rs"));

        let back: DocumentUri = serde_json::from_value(json!("file:///a.rs")).unwrap();
        assert_eq!(back, uri);
    }

    #[test]
    fn test_uri_to_url() {
        let url = DocumentUri::from_path("/home/user/a.rs").to_url().unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.path(), "/home/user/a.rs");

        assert!(DocumentUri::from_raw("not a uri").to_url().is_err());
    }
}
