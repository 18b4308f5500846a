//! Studio settings route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::settings::{get_setting, set_setting};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::StudioSettings;
use crate::models::settings::STUDIO_SETTINGS_KEY;
use crate::state::AppState;

/// Settings page template.
#[derive(Template)]
#[template(path = "settings/index.html")]
pub struct SettingsTemplate {
    pub admin_name: String,
    pub current_path: &'static str,
    pub settings: StudioSettings,
    pub saved: bool,
}

/// Settings form data. Checkboxes are absent when unchecked.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub studio_name: String,
    pub legal_hq: String,
    pub tagline: String,
    #[serde(default)]
    pub concierge_enabled: Option<String>,
    #[serde(default)]
    pub maintenance_mode: Option<String>,
}

/// Query flag shown after a successful save.
#[derive(Debug, Deserialize)]
pub struct SavedQuery {
    #[serde(default)]
    pub saved: Option<String>,
}

/// Load studio settings, falling back to defaults.
async fn load_settings(state: &AppState) -> Result<StudioSettings> {
    let value = get_setting(state.pool(), STUDIO_SETTINGS_KEY).await?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Settings page handler.
///
/// GET /settings
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<SavedQuery>,
) -> Result<Html<String>> {
    let settings = load_settings(&state).await?;

    let template = SettingsTemplate {
        admin_name: admin.name,
        current_path: "/settings",
        settings,
        saved: query.saved.is_some(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Save studio settings.
///
/// POST /settings
#[instrument(skip(_admin, state, form))]
pub async fn save(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Response> {
    let settings = StudioSettings {
        studio_name: form.studio_name.trim().to_string(),
        legal_hq: form.legal_hq.trim().to_string(),
        tagline: form.tagline.trim().to_string(),
        concierge_enabled: form.concierge_enabled.is_some(),
        maintenance_mode: form.maintenance_mode.is_some(),
    };

    let value = serde_json::to_value(&settings)
        .map_err(crate::db::settings::SettingsError::Serialization)?;
    set_setting(state.pool(), STUDIO_SETTINGS_KEY, &value).await?;
    tracing::info!("studio settings saved");

    Ok(Redirect::to("/settings?saved=1").into_response())
}
