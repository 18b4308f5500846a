//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use atelier_core::Product;
use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::{CatalogFilter, ProductRepository, RepositoryError};
use crate::gemini::GeminiClient;

/// How long catalog listings may be served from cache. Admin writes become
/// visible on the storefront within this window.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(30);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog: ProductRepository,
    concierge: Option<GeminiClient>,
    listing_cache: Cache<String, Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The concierge client is only constructed when a Gemini API key is
    /// configured; routes degrade gracefully otherwise.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let catalog = ProductRepository::new(pool.clone());
        let concierge = config.gemini.as_ref().map(GeminiClient::new);
        let listing_cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                concierge,
                listing_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the catalog repository.
    #[must_use]
    pub fn catalog(&self) -> &ProductRepository {
        &self.inner.catalog
    }

    /// Get the concierge client, if configured.
    #[must_use]
    pub fn concierge(&self) -> Option<&GeminiClient> {
        self.inner.concierge.as_ref()
    }

    /// List catalog pieces through the short-lived listing cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying database query fails on a cache
    /// miss.
    pub async fn list_products_cached(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Arc<Vec<Product>>, RepositoryError> {
        let key = filter.cache_key();
        if let Some(products) = self.inner.listing_cache.get(&key).await {
            return Ok(products);
        }

        let products = Arc::new(self.inner.catalog.list(filter).await?);
        self.inner
            .listing_cache
            .insert(key, Arc::clone(&products))
            .await;
        Ok(products)
    }
}
