//! Catalog CRUD and dashboard statistics.

use atelier_core::{Category, Product, ProductId};
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder, Row};

use super::RepositoryError;

/// Columns selected for a full [`Product`] row.
const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, rating, stock, image, images, created_at";

/// Fields for creating or replacing a catalog piece.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub rating: f32,
    pub stock: i32,
    pub image: String,
    pub images: Vec<String>,
}

/// Inventory listing query.
#[derive(Debug, Clone, Default)]
pub struct InventoryQuery {
    /// Case-insensitive substring match on the piece name.
    pub search: Option<String>,
    /// Restrict to a single category.
    pub category: Option<Category>,
    /// 1-based page number.
    pub page: i64,
    /// Rows per page.
    pub per_page: i64,
}

/// A page of inventory rows plus the filtered total.
#[derive(Debug)]
pub struct InventoryPage {
    pub products: Vec<Product>,
    pub total: i64,
}

/// Dashboard statistics over the catalog.
#[derive(Debug, Clone)]
pub struct CatalogStats {
    pub piece_count: i64,
    /// Sum of `price * stock` across the catalog.
    pub inventory_value: Decimal,
    pub low_stock_count: i64,
    pub average_rating: f32,
}

/// Full read/write access to the product catalog.
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

    /// List a page of inventory, newest first, with the filtered total.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list(&self, query: &InventoryQuery) -> Result<InventoryPage, RepositoryError> {
        let per_page = query.per_page.max(1);
        let offset = (query.page.max(1) - 1) * per_page;

        let mut rows = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filters(&mut rows, query);
        push_filters(&mut count, query);

        rows.push(" ORDER BY created_at DESC LIMIT ");
        rows.push_bind(per_page);
        rows.push(" OFFSET ");
        rows.push_bind(offset);

        let products = rows.build_query_as::<Product>().fetch_all(&self.pool).await?;
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(InventoryPage { products, total })
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

    /// Add a new piece to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (id, name, description, price, category, rating, stock, image, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(ProductId::new())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category)
        .bind(input.rating)
        .bind(input.stock)
        .bind(&input.image)
        .bind(&input.images)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    /// Replace a piece's descriptive fields.
    ///
    /// A failed update leaves prior state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for an unknown id, or a
    /// database error if the query fails.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products \
             SET name = $2, description = $3, price = $4, category = $5, \
                 rating = $6, stock = $7, image = $8, images = $9 \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category)
        .bind(input.rating)
        .bind(input.stock)
        .bind(&input.image)
        .bind(&input.images)
        .fetch_optional(&self.pool)
        .await?;
        product.ok_or(RepositoryError::NotFound)
    }

    /// Remove a piece from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for an unknown id, or a
    /// database error if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Aggregate statistics for the dashboard tiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn stats(&self) -> Result<CatalogStats, RepositoryError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS piece_count, \
                    COALESCE(SUM(price * stock), 0) AS inventory_value, \
                    COUNT(*) FILTER (WHERE stock < 5) AS low_stock_count, \
                    COALESCE(AVG(rating), 0) AS average_rating \
             FROM products",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CatalogStats {
            piece_count: row.try_get("piece_count")?,
            inventory_value: row.try_get("inventory_value")?,
            low_stock_count: row.try_get("low_stock_count")?,
            average_rating: row.try_get::<f64, _>("average_rating")? as f32,
        })
    }

    /// Piece counts per category, for the collection-mix chart.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn category_mix(&self) -> Result<Vec<(Category, i64)>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT category, COUNT(*) AS pieces FROM products \
             GROUP BY category ORDER BY pieces DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok((
                    row.try_get::<Category, _>("category")?,
                    row.try_get::<i64, _>("pieces")?,
                ))
            })
            .collect()
    }
}

/// Append WHERE clauses shared by the listing and count queries.
fn push_filters(builder: &mut QueryBuilder<'_, sqlx::Postgres>, query: &InventoryQuery) {
    let mut has_where = false;

    if let Some(category) = query.category {
        builder.push(" WHERE category = ");
        builder.push_bind(category);
        has_where = true;
    }
    if let Some(search) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        builder.push(if has_where { " AND " } else { " WHERE " });
        builder.push("name ILIKE ");
        builder.push_bind(format!("%{search}%"));
    }
}
