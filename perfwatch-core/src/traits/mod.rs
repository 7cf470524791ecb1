mod document_store;
mod memory_probe;

pub use document_store::{FindQuery, FindResult, IDocumentStore, SortOrder};
pub use memory_probe::IMemoryProbe;
