//! Storage layer
//!
//! Schema-less document collections behind the [`DocumentStore`] trait.
//! SQLite (embedded) for persistent deployments, DashMap for in-process use.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use anyhow::{bail, Result};
use async_trait::async_trait;
use catalog_types::Document;
use serde_json::Value;
use std::sync::Arc;

/// Exact-match conjunction over top-level document keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching documents whose `key` equals `value`
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().and(key, value)
    }

    pub fn and(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.terms
            .iter()
            .all(|(key, value)| doc.get(key) == Some(value))
    }
}

/// A generic document store.
///
/// Documents come back with their identifier under `_id`. Reads return
/// documents in insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name reported by diagnostics
    fn name(&self) -> String;

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    /// Insert a document and return its new identifier
    async fn insert(&self, collection: &str, doc: Document) -> Result<String>;

    /// Insert `doc` unless a document with the same `key` value exists.
    ///
    /// Returns whether the document was inserted. The check and the insert
    /// happen atomically, so concurrent callers never produce duplicates.
    async fn insert_if_absent(&self, collection: &str, key: &str, doc: Document) -> Result<bool>;

    /// Names of the collections holding at least one document
    async fn list_collections(&self) -> Result<Vec<String>>;
}

/// Open the store a connection string points at.
///
/// `memory://` gives a process-local store; `sqlite://<path>` (or
/// `sqlite:<path>`) opens or creates a database file.
pub async fn connect(url: &str) -> Result<Arc<dyn DocumentStore>> {
    if url.starts_with("memory:") {
        return Ok(Arc::new(MemoryStore::new()));
    }

    if let Some(path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    {
        return Ok(Arc::new(Database::new(path).await?));
    }

    bail!("Unsupported database URL scheme: {}", url)
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use anyhow::anyhow;

    /// A store whose every call fails, as an unreachable server would
    pub struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        fn name(&self) -> String {
            "unreachable".to_string()
        }

        async fn find(&self, _collection: &str, _filter: &Filter) -> Result<Vec<Document>> {
            Err(anyhow!("connection refused"))
        }

        async fn insert(&self, _collection: &str, _doc: Document) -> Result<String> {
            Err(anyhow!("connection refused"))
        }

        async fn insert_if_absent(
            &self,
            _collection: &str,
            _key: &str,
            _doc: Document,
        ) -> Result<bool> {
            Err(anyhow!("connection refused"))
        }

        async fn list_collections(&self) -> Result<Vec<String>> {
            Err(anyhow!(
                "server selection timeout after 30000ms: no reachable servers in the replica set topology"
            ))
        }
    }
}
