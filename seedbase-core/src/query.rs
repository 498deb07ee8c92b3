// seedbase-core/src/query.rs
//! Equality matching of JSON filters against documents.
//!
//! Filters are flat objects; each entry names a (possibly dotted) field
//! path and the exact value it must hold. Nothing in the fixture
//! workload queries by range or combinator, so no operator registry.

use serde_json::Value;

use crate::document::Document;

/// Check a document against an equality filter.
///
/// Every field in `filter` must equal the document value at that path.
/// An empty filter matches all documents; a non-object filter matches
/// none.
pub fn matches_filter(document: &Document, filter: &Value) -> bool {
    let Some(conditions) = filter.as_object() else {
        return false;
    };
    conditions.iter().all(|(path, expected)| {
        if path == "_id" {
            return &document.id_value() == expected;
        }
        document.get(path) == Some(expected)
    })
}
