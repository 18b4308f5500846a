//! Read-side catalog queries.

use atelier_core::{Category, Product, ProductId};
use sqlx::{PgPool, QueryBuilder};

use super::RepositoryError;

/// Columns selected for a full [`Product`] row.
const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, rating, stock, image, images, created_at";

/// Listing filter for the public catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Restrict to a single category.
    pub category: Option<Category>,
    /// Case-insensitive substring match on the piece name.
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Stable cache key for this filter.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}",
            self.category.map_or("all", |c| c.as_str()),
            self.search.as_deref().unwrap_or("")
        )
    }
}

/// Read-only access to the shared product catalog.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List catalog pieces, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &CatalogFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        let mut has_where = false;

        if let Some(category) = filter.category {
            query.push(" WHERE category = ");
            query.push_bind(category);
            has_where = true;
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(if has_where { " AND " } else { " WHERE " });
            query.push("name ILIKE ");
            query.push_bind(format!("%{}%", search.trim()));
        }
        query.push(" ORDER BY created_at DESC");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    /// Fetch a single piece by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    /// Highest-rated pieces for the landing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn featured(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rating DESC, created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Other pieces in the same category, for the detail page.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn related(
        &self,
        category: Category,
        exclude: ProductId,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE category = $1 AND id <> $2 \
             ORDER BY rating DESC LIMIT $3"
        ))
        .bind(category)
        .bind(exclude)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_distinguishes_filters() {
        let all = CatalogFilter::default();
        let office = CatalogFilter {
            category: Some(Category::Office),
            search: None,
        };
        let office_desk = CatalogFilter {
            category: Some(Category::Office),
            search: Some("desk".to_string()),
        };

        assert_ne!(all.cache_key(), office.cache_key());
        assert_ne!(office.cache_key(), office_desk.cache_key());
        assert_eq!(all.cache_key(), CatalogFilter::default().cache_key());
    }
}
