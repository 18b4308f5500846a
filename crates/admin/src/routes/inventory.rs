//! Inventory route handlers: catalog CRUD plus image upload.

use askama::Template;
use atelier_core::{Category, Product, ProductId, format_usd};
use axum::{
    Form, Json,
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::products::{InventoryQuery, ProductInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Rows per inventory page.
const PER_PAGE: i64 = 10;

/// Inventory listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
}

/// Product row view for the inventory table.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: i32,
    pub low_stock: bool,
    pub rating: String,
    pub image: String,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.label().to_string(),
            price: format_usd(product.price),
            stock: product.stock,
            low_stock: product.is_low_stock(),
            rating: format!("{:.1}", product.rating),
            image: product.image.clone(),
        }
    }
}

/// Category option for filter bars and the piece form.
#[derive(Clone)]
pub struct CategoryOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn category_options(selected: Option<Category>) -> Vec<CategoryOption> {
    Category::ALL
        .iter()
        .map(|category| CategoryOption {
            slug: category.as_str(),
            label: category.label(),
            selected: selected == Some(*category),
        })
        .collect()
}

/// Inventory list page template.
#[derive(Template)]
#[template(path = "inventory/index.html")]
pub struct InventoryIndexTemplate {
    pub admin_name: String,
    pub current_path: &'static str,
    pub products: Vec<ProductRowView>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub page: i64,
    pub total_pages: i64,
}

/// Piece form page template (new and edit share it).
#[derive(Template)]
#[template(path = "inventory/form.html")]
pub struct PieceFormTemplate {
    pub admin_name: String,
    pub current_path: &'static str,
    /// `None` for the new-piece form.
    pub piece_id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub categories: Vec<CategoryOption>,
    pub rating: String,
    pub stock: i32,
    pub image: String,
    /// Gallery URLs, one per line in the textarea.
    pub images: String,
    pub error: Option<String>,
}

impl PieceFormTemplate {
    fn empty(admin_name: String) -> Self {
        Self {
            admin_name,
            current_path: "/inventory",
            piece_id: None,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            categories: category_options(None),
            rating: "4.5".to_string(),
            stock: 0,
            image: String::new(),
            images: String::new(),
            error: None,
        }
    }

    fn for_product(admin_name: String, product: &Product) -> Self {
        Self {
            admin_name,
            current_path: "/inventory",
            piece_id: Some(product.id.to_string()),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            categories: category_options(Some(product.category)),
            rating: format!("{:.1}", product.rating),
            stock: product.stock,
            image: product.image.clone(),
            images: product.images.join("\n"),
            error: None,
        }
    }
}

/// Piece form data.
#[derive(Debug, Deserialize)]
pub struct PieceForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub rating: f32,
    pub stock: i32,
    pub image: String,
    /// Newline-separated gallery URLs.
    #[serde(default)]
    pub images: String,
}

impl PieceForm {
    fn validate(&self) -> std::result::Result<ProductInput, String> {
        if self.name.trim().is_empty() {
            return Err("A piece name is required.".to_string());
        }
        if self.price < Decimal::ZERO {
            return Err("Price cannot be negative.".to_string());
        }
        if self.stock < 0 {
            return Err("Stock cannot be negative.".to_string());
        }

        let images: Vec<String> = self
            .images
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        // The primary image leads the gallery by convention.
        let image = if self.image.trim().is_empty() {
            images.first().cloned().unwrap_or_default()
        } else {
            self.image.trim().to_string()
        };

        Ok(ProductInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            category: self.category,
            rating: self.rating.clamp(0.0, 5.0),
            stock: self.stock,
            image,
            images,
        })
    }
}

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Render a template, logging failures.
fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Inventory list page handler.
///
/// GET /inventory
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Html<String>> {
    let category = query.category.as_deref().and_then(|s| s.parse().ok());
    let page = query.page.unwrap_or(1).max(1);

    let inventory = state
        .catalog()
        .list(&InventoryQuery {
            search: query.q.clone(),
            category,
            page,
            per_page: PER_PAGE,
        })
        .await?;

    let total_pages = (inventory.total + PER_PAGE - 1) / PER_PAGE;

    let template = InventoryIndexTemplate {
        admin_name: admin.name,
        current_path: "/inventory",
        products: inventory.products.iter().map(ProductRowView::from).collect(),
        categories: category_options(category),
        search: query.q.unwrap_or_default(),
        page,
        total_pages: total_pages.max(1),
    };

    Ok(render(&template))
}

/// New piece form handler.
///
/// GET /inventory/new
#[instrument(skip(admin))]
pub async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> Html<String> {
    render(&PieceFormTemplate::empty(admin.name))
}

/// Create a piece.
///
/// POST /inventory
#[instrument(skip(admin, state, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<PieceForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => {
            let mut template = PieceFormTemplate::empty(admin.name);
            template.error = Some(message);
            return Ok(render(&template).into_response());
        }
    };

    match state.catalog().create(&input).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "piece created");
            Ok(Redirect::to("/inventory").into_response())
        }
        Err(e) => {
            tracing::error!("Failed to create piece: {e}");
            let mut template = PieceFormTemplate::empty(admin.name);
            template.error = Some("Saving failed. The catalog was not changed.".to_string());
            Ok(render(&template).into_response())
        }
    }
}

/// Edit piece form handler.
///
/// GET /inventory/{id}/edit
#[instrument(skip(admin, state))]
pub async fn edit_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>> {
    let product = state
        .catalog()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("piece {id}")))?;

    Ok(render(&PieceFormTemplate::for_product(admin.name, &product)))
}

/// Update a piece.
///
/// POST /inventory/{id}
#[instrument(skip(admin, state, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<PieceForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => {
            let mut template = PieceFormTemplate::empty(admin.name);
            template.piece_id = Some(id.to_string());
            template.error = Some(message);
            return Ok(render(&template).into_response());
        }
    };

    match state.catalog().update(id, &input).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "piece updated");
            Ok(Redirect::to("/inventory").into_response())
        }
        Err(crate::db::RepositoryError::NotFound) => {
            Err(AppError::NotFound(format!("piece {id}")))
        }
        Err(e) => {
            tracing::error!("Failed to update piece: {e}");
            let mut template = PieceFormTemplate::empty(admin.name);
            template.piece_id = Some(id.to_string());
            template.error = Some("Saving failed. The catalog was not changed.".to_string());
            Ok(render(&template).into_response())
        }
    }
}

/// Delete a piece.
///
/// POST /inventory/{id}/delete
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    match state.catalog().delete(id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, "piece deleted");
            Ok(Redirect::to("/inventory"))
        }
        Err(crate::db::RepositoryError::NotFound) => {
            Err(AppError::NotFound(format!("piece {id}")))
        }
        Err(e) => Err(e.into()),
    }
}

/// Upload a catalog image and return its stable URL.
///
/// POST /inventory/upload (multipart)
#[instrument(skip(_admin, state, multipart))]
pub async fn upload(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let extension = field
            .file_name()
            .and_then(|name| name.rsplit('.').next().map(str::to_ascii_lowercase))
            .filter(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "webp"))
            .unwrap_or_else(|| "webp".to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("empty upload".to_string()));
        }

        let uploads_dir = &state.config().uploads_dir;
        tokio::fs::create_dir_all(uploads_dir)
            .await
            .map_err(|e| AppError::Internal(format!("uploads dir: {e}")))?;

        let file_name = format!("{}.{extension}", uuid::Uuid::new_v4());
        let path = uploads_dir.join(&file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::Internal(format!("writing upload: {e}")))?;

        tracing::info!(file = %file_name, size = bytes.len(), "image uploaded");
        return Ok(Json(UploadResponse {
            url: format!("/uploads/{file_name}"),
        }));
    }

    Err(AppError::BadRequest("a file field is required".to_string()))
}
