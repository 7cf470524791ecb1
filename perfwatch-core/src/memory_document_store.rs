//! In-process [`IDocumentStore`] backed by `DashMap`.
//!
//! Suitable for hosts without a persistence layer and for tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::errors::StoreError;
use crate::traits::{FindQuery, FindResult, IDocumentStore, SortOrder};

/// Thread-safe in-memory document store. Collections are created lazily.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection (0 when it does not exist).
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn ensure_object(document: &Value) -> Result<(), StoreError> {
    if document.is_object() {
        Ok(())
    } else {
        Err(StoreError::InvalidDocument {
            details: format!("expected object, got {document}"),
        })
    }
}

/// Missing or mismatched fields sort after present ones.
fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl IDocumentStore for MemoryDocumentStore {
    async fn create(
        &self,
        collection: &str,
        id: &str,
        document: Value,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        ensure_object(&document)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if !overwrite && docs.contains_key(id) {
            return Err(StoreError::Conflict {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        ensure_object(&patch)?;
        let not_found = || StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        };
        let mut docs = self.collections.get_mut(collection).ok_or_else(not_found)?;
        let existing = docs.get_mut(id).ok_or_else(not_found)?;
        if let (Some(target), Value::Object(fields)) = (existing.as_object_mut(), patch) {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        Ok(())
    }

    async fn find(&self, query: FindQuery) -> Result<FindResult, StoreError> {
        let Some(docs) = self.collections.get(&query.collection) else {
            return Ok(FindResult::default());
        };
        let total = docs.len();
        let mut items: Vec<Value> = docs.values().cloned().collect();
        drop(docs);

        if let Some(field) = query.sort_field.as_deref() {
            items.sort_by(|a, b| {
                let ord = compare_field(a, b, field);
                match query.sort_order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }
        items.truncate(query.page_size);
        Ok(FindResult { items, total })
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let removed = self
            .collections
            .get_mut(collection)
            .and_then(|mut docs| docs.remove(id));
        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        }
    }
}
