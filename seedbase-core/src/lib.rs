// seedbase-core/src/lib.rs
// Fixture dataset + loader for bootstrapping a document store with sample data

pub mod document;
pub mod error;
pub mod fixtures;
pub mod loader;
pub mod logging;
pub mod model;
pub mod query;
pub mod store;

// Public exports
pub use document::{Document, DocumentId};
pub use error::{Result, SeedBaseError};
pub use loader::load_fixtures;
pub use logging::{get_log_level, set_log_level, LogLevel};
pub use model::{
    validate_dataset, Complex, ConfigRecord, Group, Item, Metadata, NestedRecord, Resource,
    SimpleRecord, ValidationError,
};
pub use query::matches_filter;
pub use store::{DocumentStore, MemoryStore};
