//! Type aliases and helpers for the JSON values a result is made of.

use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
pub use serde_json_bytes::Value;

/// A JSON object in a GraphQL result.
pub type Object = Map<ByteString, Value>;

/// The type-discriminator property the gateway injects into composite
/// results.
pub(crate) const TYPENAME: &str = "__typename";

/// Canonical string form of a scalar result value, as handed to the masking
/// collaborator.
///
/// Null, the empty string and nested structures have no maskable form.
pub(crate) fn scalar_source(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.as_str().is_empty() => Some(s.as_str().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
