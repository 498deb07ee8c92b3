// seedbase-core/src/store.rs

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use crate::document::{Document, DocumentId};
use crate::error::{Result, SeedBaseError};
use crate::log_debug;
use crate::query::matches_filter;

/// The target data store, as the loader sees it: named collections,
/// uniqueness constraints, and an insert operation. The loader receives
/// an implementation explicitly; there is no ambient/global handle.
pub trait DocumentStore {
    /// Create the collection if it does not exist yet.
    fn ensure_collection(&self, name: &str) -> Result<()>;

    /// Declare a unique constraint on a (possibly dotted) field path.
    /// Fails if existing documents already violate it.
    fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<()>;

    /// Insert one document (a JSON object) and return its assigned id.
    fn insert_one(&self, collection: &str, document: Value) -> Result<DocumentId>;
}

#[derive(Default)]
struct CollectionData {
    documents: Vec<Document>,
    last_id: u64,
    unique_fields: Vec<String>,
}

impl CollectionData {
    fn check_unique(&self, collection: &str, doc: &Document) -> Result<()> {
        for field in &self.unique_fields {
            let Some(candidate) = doc.get(field) else {
                continue;
            };
            if self
                .documents
                .iter()
                .any(|existing| existing.get(field) == Some(candidate))
            {
                return Err(SeedBaseError::DuplicateKey {
                    collection: collection.to_string(),
                    field: field.clone(),
                    value: candidate.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Embedded in-memory document store.
///
/// Ephemeral: holds fixture data for tests and local tooling, nothing
/// survives the process. Uniqueness checks are linear scans; collections
/// here hold fixture-scale document counts.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, CollectionData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Names of all collections, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        let collections = self.collections.read();
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> Result<u64> {
        let collections = self.collections.read();
        let data = collections
            .get(collection)
            .ok_or_else(|| SeedBaseError::CollectionNotFound(collection.to_string()))?;
        Ok(data.documents.len() as u64)
    }

    /// Documents matching an equality filter, in insertion order.
    pub fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Value>> {
        let collections = self.collections.read();
        let data = collections
            .get(collection)
            .ok_or_else(|| SeedBaseError::CollectionNotFound(collection.to_string()))?;
        Ok(data
            .documents
            .iter()
            .filter(|doc| matches_filter(doc, filter))
            .map(|doc| Value::from(doc.clone()))
            .collect())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn ensure_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write();
        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<()> {
        let mut collections = self.collections.write();
        let data = collections
            .get_mut(collection)
            .ok_or_else(|| SeedBaseError::CollectionNotFound(collection.to_string()))?;

        if data.unique_fields.iter().any(|f| f == field) {
            return Ok(());
        }

        // Existing documents must already satisfy the constraint.
        let mut seen: Vec<&Value> = Vec::new();
        for doc in &data.documents {
            let Some(value) = doc.get(field) else {
                continue;
            };
            if seen.contains(&value) {
                return Err(SeedBaseError::DuplicateKey {
                    collection: collection.to_string(),
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
            seen.push(value);
        }

        data.unique_fields.push(field.to_string());
        Ok(())
    }

    fn insert_one(&self, collection: &str, document: Value) -> Result<DocumentId> {
        let fields: HashMap<String, Value> = match document {
            Value::Object(map) => map.into_iter().collect(),
            other => {
                return Err(SeedBaseError::Serialization(format!(
                    "document must be a JSON object, got: {other}"
                )))
            }
        };

        let mut collections = self.collections.write();
        let data = collections
            .get_mut(collection)
            .ok_or_else(|| SeedBaseError::CollectionNotFound(collection.to_string()))?;

        let doc_id = DocumentId::new_auto(data.last_id);
        data.last_id += 1;

        let doc = Document::new(doc_id.clone(), fields);
        data.check_unique(collection, &doc)?;

        log_debug!("insert into '{}' -> {:?}", collection, doc_id);
        data.documents.push(doc);
        Ok(doc_id)
    }
}
