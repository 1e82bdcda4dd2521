//! In-memory document store using DashMap

use super::{DocumentStore, Filter};
use anyhow::Result;
use async_trait::async_trait;
use catalog_types::{Document, INTERNAL_ID};
use dashmap::DashMap;
use serde_json::Value;

/// Process-local document store.
///
/// Each collection is a vector, so reads come back in insertion order.
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
        }
    }

    fn stamp(mut doc: Document) -> (String, Document) {
        let id = uuid::Uuid::new_v4().to_string();
        doc.insert(INTERNAL_ID.to_string(), Value::String(id.clone()));
        (id, doc)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> String {
        "memory".to_string()
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<String> {
        let (id, doc) = Self::stamp(doc);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn insert_if_absent(&self, collection: &str, key: &str, doc: Document) -> Result<bool> {
        let probe = Filter::eq(key, doc.get(key).cloned().unwrap_or(Value::Null));

        // The entry guard holds the shard lock across the check and the push
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|existing| probe.matches(existing)) {
            return Ok(false);
        }
        let (_, doc) = Self::stamp(doc);
        docs.push(doc);
        Ok(true)
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
