// seedbase-core/src/document.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored document: the store-assigned `_id` plus the inserted fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: DocumentId,

    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

/// Document id variants.
/// Untagged so ids appear as plain values in documents: {"_id": 2}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum DocumentId {
    Int(i64),
    String(String),
}

impl DocumentId {
    /// Next auto-increment id after `last_id`.
    pub fn new_auto(last_id: u64) -> Self {
        DocumentId::Int((last_id + 1) as i64)
    }
}

impl Document {
    pub fn new(id: DocumentId, fields: HashMap<String, Value>) -> Self {
        Document { id, fields }
    }

    /// Field lookup with dot-notation paths into nested objects and
    /// arrays, e.g. `"resource.guid"` or `"complex.array.0"`.
    /// `_id` is held outside `fields`; see [`Document::id_value`].
    pub fn get(&self, field: &str) -> Option<&Value> {
        if field.is_empty() {
            return None;
        }
        let mut parts = field.split('.');
        let mut value = self.fields.get(parts.next()?)?;
        for part in parts {
            value = match value {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(value)
    }

    /// The `_id` as a JSON value, for filter matching.
    pub fn id_value(&self) -> Value {
        match &self.id {
            DocumentId::Int(i) => Value::from(*i),
            DocumentId::String(s) => Value::from(s.as_str()),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        let mut map = serde_json::Map::new();
        map.insert("_id".to_string(), doc.id_value());
        for (key, value) in doc.fields {
            map.insert(key, value);
        }
        Value::Object(map)
    }
}
