//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::db::{ProductRepository, SaleRepository};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    catalog: ProductRepository,
    sales: SaleRepository,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let catalog = ProductRepository::new(pool.clone());
        let sales = SaleRepository::new(pool.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                sales,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
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

    /// Get a reference to the sales ledger repository.
    #[must_use]
    pub fn sales(&self) -> &SaleRepository {
        &self.inner.sales
    }
}
