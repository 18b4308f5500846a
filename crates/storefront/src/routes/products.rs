//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use atelier_core::{Category, Product, ProductId, format_usd};
use axum::{
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
};
use base64::Engine;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub rating: String,
    pub stock: i32,
    pub low_stock: bool,
    pub image: String,
    pub images: Vec<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_usd(product.price),
            category: product.category.label().to_string(),
            rating: format!("{:.1}", product.rating),
            stock: product.stock,
            low_stock: product.is_low_stock(),
            image: product.image.clone(),
            images: product.images.clone(),
        }
    }
}

/// Category filter option for templates.
#[derive(Clone)]
pub struct CategoryOption {
    pub slug: String,
    pub label: String,
    pub selected: bool,
}

/// Build the category filter bar, marking the active selection.
pub fn category_options(selected: Option<Category>) -> Vec<CategoryOption> {
    Category::ALL
        .iter()
        .map(|category| CategoryOption {
            slug: category.as_str().to_string(),
            label: category.label().to_string(),
            selected: selected == Some(*category),
        })
        .collect()
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
}

/// Visualizer result fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/visualizer_result.html")]
pub struct VisualizerResultTemplate {
    pub image: Option<String>,
    pub error: Option<String>,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<ProductsIndexTemplate> {
    // Unknown category slugs fall back to the unfiltered listing.
    let category = query.category.as_deref().and_then(|s| s.parse().ok());
    let filter = crate::db::CatalogFilter {
        category,
        search: query.q.clone(),
    };

    let products = state.list_products_cached(&filter).await?;

    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductView::from).collect(),
        categories: category_options(category),
        search: query.q.unwrap_or_default(),
    })
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let product = state
        .catalog()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let related = state.catalog().related(product.category, product.id, 4).await?;

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
        related_products: related.iter().map(ProductView::from).collect(),
    })
}

/// Room visualization (HTMX).
///
/// Accepts a multipart form with the visitor's room photo, optional
/// instructions, and an output size, then asks the concierge's image
/// model to composite this piece into the room. Failures render an
/// error bubble rather than propagating.
#[instrument(skip(state, multipart))]
pub async fn visualize(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let Some(client) = state.concierge() else {
        return Ok(VisualizerResultTemplate {
            image: None,
            error: Some(
                "The visualization studio is not available right now. \
                 Contact us for a personal consultation."
                    .to_string(),
            ),
        });
    };

    let product = state
        .catalog()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut room_photo: Option<Vec<u8>> = None;
    let mut instructions = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("room_photo") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
                room_photo = Some(bytes.to_vec());
            }
            Some("instructions") => {
                instructions = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
            }
            _ => {}
        }
    }

    let Some(room_photo) = room_photo.filter(|bytes| !bytes.is_empty()) else {
        return Err(AppError::BadRequest("a room photo is required".to_string()));
    };

    // The furniture reference image travels inline, like the room photo.
    let furniture_bytes = match fetch_image(&product.image).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to fetch product image for visualization: {e}");
            return Ok(VisualizerResultTemplate {
                image: None,
                error: Some("Something went wrong preparing the visualization.".to_string()),
            });
        }
    };

    let engine = base64::engine::general_purpose::STANDARD;
    let room_b64 = engine.encode(&room_photo);
    let furniture_b64 = engine.encode(&furniture_bytes);

    match client
        .visualize_in_space(&room_b64, &product.name, &instructions, &furniture_b64)
        .await
    {
        Ok(Some(image)) => Ok(VisualizerResultTemplate {
            image: Some(image.data_url()),
            error: None,
        }),
        Ok(None) => Ok(VisualizerResultTemplate {
            image: None,
            error: Some("The studio could not produce a visual for this room.".to_string()),
        }),
        Err(e) => {
            tracing::error!("Visualization failed: {e}");
            Ok(VisualizerResultTemplate {
                image: None,
                error: Some("An error occurred. Please try again.".to_string()),
            })
        }
    }
}

/// Download an image so it can be sent inline to the image model.
async fn fetch_image(url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
