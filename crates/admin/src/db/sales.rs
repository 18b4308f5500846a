//! Sales ledger queries.
//!
//! The ledger is historical data: rows are seeded by the CLI and never
//! written by checkout (checkout is simulated and creates no orders).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use atelier_core::{SaleId, SaleStatus};

use super::RepositoryError;

/// One ledger row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Sale {
    pub id: SaleId,
    pub customer_name: String,
    pub product_name: String,
    pub amount: Decimal,
    pub status: SaleStatus,
    pub placed_on: NaiveDate,
}

/// Fields for inserting a ledger row (seeding).
#[derive(Debug, Clone)]
pub struct SaleInput {
    pub customer_name: String,
    pub product_name: String,
    pub amount: Decimal,
    pub status: SaleStatus,
    pub placed_on: NaiveDate,
}

/// Ledger listing query.
#[derive(Debug, Clone, Default)]
pub struct LedgerQuery {
    /// Case-insensitive substring match on the customer name.
    pub search: Option<String>,
    /// Restrict to a single status.
    pub status: Option<SaleStatus>,
}

/// Read access to the sales ledger, plus seeding support.
#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    /// Create a repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List ledger rows, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, query: &LedgerQuery) -> Result<Vec<Sale>, RepositoryError> {
        let mut builder = sqlx::QueryBuilder::new(
            "SELECT id, customer_name, product_name, amount, status, placed_on FROM sales",
        );
        let mut has_where = false;

        if let Some(status) = query.status {
            builder.push(" WHERE status = ");
            builder.push_bind(status);
            has_where = true;
        }
        if let Some(search) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("customer_name ILIKE ");
            builder.push_bind(format!("%{search}%"));
        }
        builder.push(" ORDER BY placed_on DESC");

        let sales = builder.build_query_as::<Sale>().fetch_all(&self.pool).await?;
        Ok(sales)
    }

    /// Insert a ledger row. Used by the CLI seeder only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn insert(&self, input: &SaleInput) -> Result<Sale, RepositoryError> {
        let sale = sqlx::query_as::<_, Sale>(
            "INSERT INTO sales (id, customer_name, product_name, amount, status, placed_on) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, customer_name, product_name, amount, status, placed_on",
        )
        .bind(SaleId::new())
        .bind(&input.customer_name)
        .bind(&input.product_name)
        .bind(input.amount)
        .bind(input.status)
        .bind(input.placed_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(sale)
    }
}
