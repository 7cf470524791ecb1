use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Sort direction for [`FindQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// A paged, sorted read over one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindQuery {
    pub collection: String,
    pub page_size: usize,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
}

impl FindQuery {
    pub fn new(collection: impl Into<String>, page_size: usize) -> Self {
        Self {
            collection: collection.into(),
            page_size,
            sort_field: None,
            sort_order: SortOrder::default(),
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }
}

/// One page of documents plus the collection's total size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindResult {
    pub items: Vec<serde_json::Value>,
    pub total: usize,
}

/// Narrow key/value document store used for alert persistence.
///
/// Documents are JSON objects. The monitor treats write failures as
/// non-fatal and read failures as an empty result.
#[async_trait]
pub trait IDocumentStore: Send + Sync {
    /// Insert a document. Fails with `Conflict` when `id` exists and
    /// `overwrite` is false.
    async fn create(
        &self,
        collection: &str,
        id: &str,
        document: serde_json::Value,
        overwrite: bool,
    ) -> Result<(), StoreError>;

    /// Shallow-merge `patch` into an existing document.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<(), StoreError>;

    async fn find(&self, query: FindQuery) -> Result<FindResult, StoreError>;

    /// Fails with `NotFound` when absent.
    async fn get(&self, collection: &str, id: &str) -> Result<serde_json::Value, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
