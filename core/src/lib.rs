pub mod context;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod score;
pub mod stem;
pub mod store;
pub mod tokenizer;

pub use context::{gather_context, ContextWindow};
pub use error::{Error, Result};
pub use index::index_document;
pub use persist::SledIndexStore;
pub use query::{search_terms, QueryResult, TermMatch};
pub use score::{rank, score_counts, Score};
pub use store::{DocumentStore, IndexEntry, IndexStore, MemoryIndexStore};

/// Documents are keyed by UUID throughout the store and the index.
pub type DocId = uuid::Uuid;
