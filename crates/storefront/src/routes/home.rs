//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::products::{CategoryOption, ProductView, category_options};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductView>,
    pub categories: Vec<CategoryOption>,
}

/// Display the landing page with the studio's featured pieces.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let featured = state.catalog().featured(3).await?;

    Ok(HomeTemplate {
        featured: featured.iter().map(ProductView::from).collect(),
        categories: category_options(None),
    })
}
