//! Authentication route handlers.
//!
//! Login is permissive by design: any non-empty access key is accepted
//! and stored in the session as the current admin. There are no accounts
//! and no password verification anywhere in the system.

use askama::Template;
use axum::{
    Form,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub access_key: String,
}

/// Render a template, logging failures.
fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Render the login page.
///
/// GET /auth/login
#[instrument]
pub async fn login_page() -> Html<String> {
    render(&LoginPageTemplate { error: None })
}

/// Log in with any non-empty access key.
///
/// POST /auth/login
#[instrument(skip(session, form))]
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Response> {
    if form.access_key.trim().is_empty() {
        return Ok(render(&LoginPageTemplate {
            error: Some("An access key is required.".to_string()),
        })
        .into_response());
    }

    let admin = CurrentAdmin {
        name: "Director".to_string(),
    };
    set_current_admin(&session, &admin).await?;
    tracing::info!("admin logged in");

    Ok(Redirect::to("/dashboard").into_response())
}

/// Logout and clear session.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    Ok(Redirect::to("/auth/login"))
}
