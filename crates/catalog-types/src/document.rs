//! Schema-less documents as they come out of a document store

use serde_json::{Map, Value};

/// A stored record: a string-keyed JSON object
pub type Document = Map<String, Value>;

/// Key the storage backends use for their internal identifier
pub const INTERNAL_ID: &str = "_id";

/// Key the internal identifier is exposed under
pub const PUBLIC_ID: &str = "id";

/// Rename the internal `_id` key to a public, stringified `id`.
///
/// Documents without an `_id` are returned unchanged.
pub fn expose_id(mut doc: Document) -> Document {
    if let Some(id) = doc.remove(INTERNAL_ID) {
        let id = match id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        doc.insert(PUBLIC_ID.to_string(), Value::String(id));
    }
    doc
}
