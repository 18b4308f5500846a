//! Sales ledger route handler.

use askama::Template;
use atelier_core::{SaleStatus, format_usd};
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::sales::{LedgerQuery, Sale};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Ledger listing query parameters.
#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// Ledger row view for templates.
pub struct SaleRowView {
    pub id: String,
    pub customer: String,
    pub product: String,
    pub amount: String,
    pub status: String,
    pub placed_on: String,
}

impl From<&Sale> for SaleRowView {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.to_string(),
            customer: sale.customer_name.clone(),
            product: sale.product_name.clone(),
            amount: format_usd(sale.amount),
            status: sale.status.label().to_string(),
            placed_on: sale.placed_on.format("%b %d, %Y").to_string(),
        }
    }
}

/// Status filter option for templates.
pub struct StatusOption {
    pub slug: String,
    pub label: &'static str,
    pub selected: bool,
}

/// Sales ledger page template.
#[derive(Template)]
#[template(path = "sales/index.html")]
pub struct SalesIndexTemplate {
    pub admin_name: String,
    pub current_path: &'static str,
    pub sales: Vec<SaleRowView>,
    pub statuses: Vec<StatusOption>,
    pub search: String,
}

/// Sales ledger page handler.
///
/// GET /sales
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<Html<String>> {
    let status = query.status.as_deref().and_then(|s| s.parse().ok());

    let sales = state
        .sales()
        .list(&LedgerQuery {
            search: query.q.clone(),
            status,
        })
        .await?;

    let statuses = SaleStatus::ALL
        .iter()
        .map(|s| StatusOption {
            slug: s.label().to_lowercase(),
            label: s.label(),
            selected: status == Some(*s),
        })
        .collect();

    let template = SalesIndexTemplate {
        admin_name: admin.name,
        current_path: "/sales",
        sales: sales.iter().map(SaleRowView::from).collect(),
        statuses,
        search: query.q.unwrap_or_default(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}
