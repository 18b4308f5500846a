//! Checkout route handlers.
//!
//! Checkout is simulated: no order is persisted and no payment is
//! authorized. The flow renders from an immutable snapshot of the cart,
//! and a successful submit clears the cart and shows the confirmation
//! page. With an empty cart the form is unreachable - the empty display
//! renders instead.

use askama::Template;
use askama_web::WebTemplate;
use atelier_core::format_usd;
use axum::{Form, response::Response};
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::routes::cart::{CartView, load_cart, save_cart};

/// Flat shipping rate added to every order (white-glove delivery).
const SHIPPING_FLAT_USD: i64 = 150;

/// Checkout shipping form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl CheckoutForm {
    /// Presence validation only - there is no backend to validate against.
    fn missing_field(&self) -> Option<&'static str> {
        if self.first_name.trim().is_empty() {
            Some("first name")
        } else if self.last_name.trim().is_empty() {
            Some("last name")
        } else if self.address.trim().is_empty() {
            Some("shipping address")
        } else if self.city.trim().is_empty() {
            Some("city")
        } else if self.postal_code.trim().is_empty() {
            Some("postal code")
        } else {
            None
        }
    }
}

/// Checkout form page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub cart: CartView,
    pub shipping: String,
    pub total: String,
    pub error: Option<String>,
}

/// Empty-cart display template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/empty.html")]
pub struct CheckoutEmptyTemplate;

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct CheckoutConfirmationTemplate;

/// Build the form page from a cart snapshot.
fn form_page(cart: &atelier_core::Cart, error: Option<String>) -> CheckoutShowTemplate {
    let shipping = Decimal::from(SHIPPING_FLAT_USD);
    CheckoutShowTemplate {
        cart: CartView::from(cart),
        shipping: format_usd(shipping),
        total: format_usd(cart.subtotal() + shipping),
        error,
    }
}

/// Display checkout page.
///
/// Renders the empty display when the cart has no lines, otherwise the
/// shipping form with an order summary snapshot.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(CheckoutEmptyTemplate.into_response());
    }
    Ok(form_page(&cart, None).into_response())
}

/// Submit checkout.
///
/// With an empty cart this renders the empty display (submit is
/// unreachable except through confirmation already reached). Otherwise
/// the shipping fields are presence-validated, the cart is cleared, and
/// the confirmation page renders.
#[instrument(skip(session, form))]
pub async fn submit(session: Session, Form(form): Form<CheckoutForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(CheckoutEmptyTemplate.into_response());
    }

    if let Some(field) = form.missing_field() {
        return Ok(form_page(&cart, Some(format!("Please provide your {field}."))).into_response());
    }

    cart.clear();
    save_cart(&session, &cart).await?;
    tracing::info!("checkout completed, cart cleared");

    Ok(CheckoutConfirmationTemplate.into_response())
}
