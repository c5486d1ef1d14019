//! Full-text note indexing and ranking: an incrementally maintained
//! inverted term index with TF-IDF scoring, line-level match highlighting,
//! and pagination.

pub mod engine;
pub mod highlight;
pub mod model;
pub mod paginate;
pub mod queue;
pub mod scorer;
pub mod store;
pub mod tokenizer;
pub mod vault;

pub use engine::{EngineConfig, SearchEngine};
pub use model::{Document, MatchLine, SearchResult, TermPosting};
pub use paginate::{paginate, Page};
pub use queue::IndexQueue;
pub use store::DocumentStore;
pub use vault::{FsVault, Note, Vault};
