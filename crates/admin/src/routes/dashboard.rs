//! Dashboard route handler.

use askama::Template;
use atelier_core::format_usd;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// One stat tile.
pub struct StatView {
    pub label: &'static str,
    pub value: String,
}

/// One slice of the collection-mix breakdown.
pub struct MixView {
    pub label: String,
    pub pieces: i64,
    /// Share of the catalog, 0-100.
    pub percent: i64,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub current_path: &'static str,
    pub stats: Vec<StatView>,
    pub mix: Vec<MixView>,
    pub total_pieces: i64,
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let stats = state.catalog().stats().await?;
    let mix = state.catalog().category_mix().await?;

    let total_pieces = stats.piece_count;
    let mix = mix
        .into_iter()
        .map(|(category, pieces)| MixView {
            label: category.label().to_string(),
            pieces,
            percent: if total_pieces > 0 {
                pieces * 100 / total_pieces
            } else {
                0
            },
        })
        .collect();

    let template = DashboardTemplate {
        admin_name: admin.name,
        current_path: "/dashboard",
        stats: vec![
            StatView {
                label: "Pieces in Catalog",
                value: stats.piece_count.to_string(),
            },
            StatView {
                label: "Inventory Value",
                value: format_usd(stats.inventory_value),
            },
            StatView {
                label: "Low Stock Pieces",
                value: stats.low_stock_count.to_string(),
            },
            StatView {
                label: "Average Rating",
                value: format!("{:.1}", stats.average_rating),
            },
        ],
        mix,
        total_pieces,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}
