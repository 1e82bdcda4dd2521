//! SQLite document store (embedded, no external dependencies)
//!
//! Every collection lives in one `documents` table. Bodies are JSON text and
//! `seq` keeps insertion order.

use super::{DocumentStore, Filter};
use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog_types::{Document, INTERNAL_ID};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
    name: String,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        let path = Path::new(database_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| database_path.to_string());

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
            name,
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT UNIQUE NOT NULL,
                collection TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_collection
            ON documents (collection, seq)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// JSON text stored for a document; the identifier lives in its own column
    fn encode(mut doc: Document) -> Result<String> {
        doc.remove(INTERNAL_ID);
        Ok(serde_json::to_string(&doc)?)
    }

    fn decode(id: String, body: &str) -> Result<Document> {
        let mut doc: Document = serde_json::from_str(body)
            .with_context(|| format!("Corrupt document body for id {}", id))?;
        doc.insert(INTERNAL_ID.to_string(), Value::String(id));
        Ok(doc)
    }
}

#[async_trait]
impl DocumentStore for Database {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT id, body FROM documents
            WHERE collection = ?1
            ORDER BY seq ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&*self.pool)
        .await?;

        let mut docs = Vec::new();
        for (id, body) in rows {
            let doc = Self::decode(id, &body)?;
            if filter.matches(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&id)
        .bind(collection)
        .bind(Self::encode(doc)?)
        .execute(&*self.pool)
        .await?;

        Ok(id)
    }

    async fn insert_if_absent(&self, collection: &str, key: &str, doc: Document) -> Result<bool> {
        let id = uuid::Uuid::new_v4().to_string();
        let path = format!("$.\"{}\"", key.replace('"', ""));

        // Single statement, so the existence check and the insert are atomic
        let result = sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            SELECT ?1, ?2, ?3
            WHERE NOT EXISTS (
                SELECT 1 FROM documents
                WHERE collection = ?2
                  AND json_extract(body, ?4) IS json_extract(?3, ?4)
            )
            "#,
        )
        .bind(&id)
        .bind(collection)
        .bind(Self::encode(doc)?)
        .bind(path)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT collection FROM documents ORDER BY collection
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
