// seedbase-core/src/loader.rs
//! Fixture loader: pushes the embedded dataset into a store.

use serde::Serialize;

use crate::error::Result;
use crate::fixtures::{self, CONFIG_COLLECTION, NESTED_COLLECTION, SIMPLE_COLLECTION};
use crate::log_info;
use crate::store::DocumentStore;

/// Field carrying the per-record unique identifier in the
/// hierarchical collection.
pub const CONFIG_GUID_FIELD: &str = "resource.guid";

/// Insert every fixture document into the given store, collection by
/// collection, in dataset order.
///
/// The store handle is passed in explicitly; the loader holds no state
/// of its own. Loading is not idempotent: a second run against the
/// same store appends duplicates to the unconstrained collections and
/// fails on the first hierarchical document once the unique GUID
/// constraint rejects it.
pub fn load_fixtures<S: DocumentStore>(store: &S) -> Result<()> {
    store.ensure_collection(SIMPLE_COLLECTION)?;
    store.ensure_collection(NESTED_COLLECTION)?;
    store.ensure_collection(CONFIG_COLLECTION)?;
    store.ensure_unique_index(CONFIG_COLLECTION, CONFIG_GUID_FIELD)?;

    insert_all(store, SIMPLE_COLLECTION, &fixtures::simple_records())?;
    insert_all(store, NESTED_COLLECTION, &fixtures::nested_records())?;
    insert_all(store, CONFIG_COLLECTION, &fixtures::config_records())?;

    Ok(())
}

fn insert_all<S: DocumentStore, T: Serialize>(
    store: &S,
    collection: &str,
    records: &[T],
) -> Result<()> {
    for record in records {
        store.insert_one(collection, serde_json::to_value(record)?)?;
    }
    log_info!("inserted {} documents into '{}'", records.len(), collection);
    Ok(())
}
