//! Storage diagnostics

use crate::storage::DocumentStore;
use serde::Serialize;
use std::sync::Arc;

/// Longest probe error message included in a report
const PROBE_ERROR_LIMIT: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

pub struct Diagnostics {
    store: Option<Arc<dyn DocumentStore>>,
    url_configured: bool,
}

impl Diagnostics {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, url_configured: bool) -> Self {
        Self {
            store,
            url_configured,
        }
    }

    /// Probe the store. Probe failures are reported inline, never returned.
    pub async fn report(&self) -> DiagnosticsReport {
        let url_flag = if self.url_configured {
            "✅ Set"
        } else {
            "❌ Not Set"
        };

        let mut report = DiagnosticsReport {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: url_flag.to_string(),
            database_name: "❌ Not Set".to_string(),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        };

        let Some(store) = &self.store else {
            return report;
        };

        report.database = "✅ Available".to_string();
        report.database_name = store.name();
        report.connection_status = "Connected".to_string();

        match store.list_collections().await {
            Ok(collections) => {
                report.collections = collections;
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!("Storage probe failed: {:#}", e);
                report.database = format!("⚠️ Connected but Error: {}", truncate(&e.to_string()));
            }
        }

        report
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(PROBE_ERROR_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FailingStore;
    use crate::storage::MemoryStore;
    use catalog_types::Document;

    #[tokio::test]
    async fn test_report_without_store() {
        let report = Diagnostics::new(None, false).report().await;
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "❌ Not Available");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn test_report_when_store_failed_to_open() {
        let report = Diagnostics::new(None, true).report().await;
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.database, "❌ Not Available");
    }

    #[tokio::test]
    async fn test_report_lists_collections() {
        let store = Arc::new(MemoryStore::new());
        store.insert("product", Document::new()).await.unwrap();

        let report = Diagnostics::new(Some(store), true).report().await;
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.database_name, "memory");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections, vec!["product".to_string()]);
    }

    #[tokio::test]
    async fn test_probe_error_is_truncated() {
        let report = Diagnostics::new(Some(Arc::new(FailingStore)), true)
            .report()
            .await;

        let detail = report
            .database
            .strip_prefix("⚠️ Connected but Error: ")
            .unwrap();
        assert_eq!(detail.chars().count(), PROBE_ERROR_LIMIT);
        assert!(detail.starts_with("server selection timeout"));
        assert_eq!(report.connection_status, "Connected");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short"), "short");
        assert_eq!(truncate(&"é".repeat(100)).chars().count(), 80);
    }
}
