//! Product catalog service

use crate::error::{ApiError, Result};
use crate::storage::{DocumentStore, Filter};
use catalog_types::{expose_id, sample_products, Document, Product, PRODUCT_COLLECTION};
use serde::{de, Deserialize, Deserializer};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Query parameters accepted by the product listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: Option<bool>,
}

/// Parse the boolean spellings HTML forms and query strings commonly use
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "t" | "true" | "y" | "yes" => Some(true),
        "0" | "off" | "f" | "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_bool(&raw).ok_or_else(|| {
                de::Error::custom(format!("featured: expected a boolean, got {:?}", raw))
            })
        })
        .transpose()
}

impl ProductQuery {
    /// Exact-match filter for the supplied parameters; an empty category is ignored
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            filter = filter.and("category", category);
        }
        if let Some(featured) = self.featured {
            filter = filter.and("featured", featured);
        }
        filter
    }
}

enum CatalogSource {
    Store(Arc<dyn DocumentStore>),
    /// No store configured: serve the built-in sample catalog
    Fallback,
}

pub struct CatalogService {
    source: CatalogSource,
}

impl CatalogService {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        let source = match store {
            Some(store) => CatalogSource::Store(store),
            None => CatalogSource::Fallback,
        };
        Self { source }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, CatalogSource::Fallback)
    }

    /// List products matching `query`.
    ///
    /// An empty result from the store is taken to mean the store has never
    /// been seeded: the sample catalog is inserted (keyed by slug) and the
    /// query runs once more.
    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let filter = query.filter();

        let store = match &self.source {
            CatalogSource::Store(store) => store,
            CatalogSource::Fallback => {
                debug!("Listing products from the sample catalog");
                return Ok(sample_products()
                    .into_iter()
                    .filter(|product| filter.matches(&product.to_document()))
                    .collect());
            }
        };

        let mut docs = store.find(PRODUCT_COLLECTION, &filter).await?;
        if docs.is_empty() {
            Self::seed(store.as_ref()).await;
            docs = store.find(PRODUCT_COLLECTION, &filter).await?;
            if docs.is_empty() && !filter.is_empty() {
                debug!("No products match {:?}", filter);
            }
        }

        project_all(docs)
    }

    /// Look up one product by its exact slug
    pub async fn get(&self, slug: &str) -> Result<Product> {
        match &self.source {
            CatalogSource::Store(store) => {
                let doc = store
                    .find_one(PRODUCT_COLLECTION, &Filter::eq("slug", slug))
                    .await?
                    .ok_or(ApiError::NotFound)?;
                Ok(Product::project(&expose_id(doc))?)
            }
            CatalogSource::Fallback => sample_products()
                .into_iter()
                .find(|product| product.slug == slug)
                .ok_or(ApiError::NotFound),
        }
    }

    /// Insert every sample product whose slug is not stored yet.
    ///
    /// Individual failures are logged and skipped. Returns how many products
    /// were inserted.
    pub async fn seed(store: &dyn DocumentStore) -> usize {
        let mut inserted = 0;
        for product in sample_products() {
            match store
                .insert_if_absent(PRODUCT_COLLECTION, "slug", product.to_document())
                .await
            {
                Ok(true) => inserted += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to seed product {}: {:#}", product.slug, e),
            }
        }
        if inserted > 0 {
            info!("Seeded {} sample products", inserted);
        }
        inserted
    }
}

fn project_all(docs: Vec<Document>) -> Result<Vec<Product>> {
    docs.into_iter()
        .map(expose_id)
        .map(|doc| Product::project(&doc).map_err(ApiError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FailingStore;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn query(category: Option<&str>, featured: Option<bool>) -> ProductQuery {
        ProductQuery {
            category: category.map(str::to_string),
            featured,
        }
    }

    fn slugs(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_parse_bool_spellings() {
        for raw in ["1", "true", "True", "TRUE", "yes", "Y", "on", "t"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "false", "False", "no", "N", "off", "OFF", "f"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        for raw in ["", "maybe", "2", "yess"] {
            assert_eq!(parse_bool(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_query_filter() {
        assert!(query(None, None).filter().is_empty());
        assert!(query(Some(""), None).filter().is_empty());
        assert_eq!(
            query(Some("Automation"), Some(false)).filter(),
            Filter::eq("category", "Automation").and("featured", false)
        );
    }

    #[tokio::test]
    async fn test_fallback_lists_samples() {
        let catalog = CatalogService::new(None);
        assert!(catalog.is_fallback());

        let all = catalog.list(&ProductQuery::default()).await.unwrap();
        assert_eq!(all, sample_products());

        let featured = catalog.list(&query(None, Some(true))).await.unwrap();
        assert_eq!(
            slugs(&featured),
            vec!["industrial-circuit-breaker-3p-100a", "metallic-cable-tray-ladder"]
        );

        let automation = catalog.list(&query(Some("Automation"), None)).await.unwrap();
        assert_eq!(slugs(&automation), vec!["programmable-logic-controller-plc"]);
    }

    #[tokio::test]
    async fn test_fallback_get() {
        let catalog = CatalogService::new(None);

        let breaker = catalog.get("industrial-circuit-breaker-3p-100a").await.unwrap();
        assert!(breaker.featured);
        assert_eq!(breaker.brand.as_deref(), Some("ProGuard"));

        assert!(matches!(
            catalog.get("does-not-exist").await,
            Err(ApiError::NotFound)
        ));
        // Lookup is exact, not normalized
        assert!(matches!(
            catalog.get("Industrial-Circuit-Breaker-3P-100A").await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_seeds_empty_store_once() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(Some(store.clone()));

        let first = catalog.list(&ProductQuery::default()).await.unwrap();
        let second = catalog.list(&ProductQuery::default()).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);

        let stored = store.find(PRODUCT_COLLECTION, &Filter::new()).await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[tokio::test]
    async fn test_unmatched_filter_reseeds_without_duplicates() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(Some(store.clone()));

        for _ in 0..2 {
            let none = catalog.list(&query(Some("Pumps"), None)).await.unwrap();
            assert!(none.is_empty());
        }

        let stored = store.find(PRODUCT_COLLECTION, &Filter::new()).await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[tokio::test]
    async fn test_featured_filter_on_seeded_store() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                PRODUCT_COLLECTION,
                json!({"title": "Relay", "slug": "relay", "category": "Controls", "featured": true})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();
        store
            .insert(
                PRODUCT_COLLECTION,
                json!({"title": "Fuse", "slug": "fuse", "category": "Controls"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();
        store
            .insert(
                PRODUCT_COLLECTION,
                json!({"title": "Timer", "slug": "timer", "category": "Controls", "featured": true, "sku": "T-1"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();
        let catalog = CatalogService::new(Some(store.clone()));

        let featured = catalog.list(&query(None, Some(true))).await.unwrap();
        assert_eq!(slugs(&featured), vec!["relay", "timer"]);

        // Store was not empty, so nothing was seeded
        let stored = store.find(PRODUCT_COLLECTION, &Filter::new()).await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[tokio::test]
    async fn test_get_from_store() {
        let store = Arc::new(MemoryStore::new());
        CatalogService::seed(store.as_ref()).await;
        let catalog = CatalogService::new(Some(store));

        let plc = catalog.get("programmable-logic-controller-plc").await.unwrap();
        assert_eq!(plc.category, "Automation");
        assert!(!plc.featured);

        assert!(matches!(
            catalog.get("does-not-exist").await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_does_not_seed() {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::new(Some(store.clone()));

        assert!(matches!(
            catalog.get("metallic-cable-tray-ladder").await,
            Err(ApiError::NotFound)
        ));
        assert!(store.list_collections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                PRODUCT_COLLECTION,
                json!({"slug": "untitled"}).as_object().cloned().unwrap(),
            )
            .await
            .unwrap();
        let catalog = CatalogService::new(Some(store));

        assert!(matches!(
            catalog.list(&ProductQuery::default()).await,
            Err(ApiError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_read_failures_propagate() {
        let catalog = CatalogService::new(Some(Arc::new(FailingStore)));

        assert!(matches!(
            catalog.list(&ProductQuery::default()).await,
            Err(ApiError::Storage(_))
        ));
        assert!(matches!(
            catalog.get("anything").await,
            Err(ApiError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_seed_skips_failures() {
        assert_eq!(CatalogService::seed(&FailingStore).await, 0);
    }
}
