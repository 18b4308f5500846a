//! Studio settings stored as a single JSONB value.

use serde::{Deserialize, Serialize};

/// Key the studio settings are stored under.
pub const STUDIO_SETTINGS_KEY: &str = "studio";

/// Branding and feature toggles managed from the settings page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioSettings {
    pub studio_name: String,
    pub legal_hq: String,
    pub tagline: String,
    pub concierge_enabled: bool,
    pub maintenance_mode: bool,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            studio_name: "Atelier Lumen".to_string(),
            legal_hq: "Lyon, France".to_string(),
            tagline: "Artisanal furniture crafted with soul. Experience the perfect \
                      harmony of nature and design."
                .to_string(),
            concierge_enabled: true,
            maintenance_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: StudioSettings =
            serde_json::from_str(r#"{ "studio_name": "Test Studio" }"#).expect("deserialize");
        assert_eq!(settings.studio_name, "Test Studio");
        assert!(settings.concierge_enabled);
        assert!(!settings.maintenance_mode);
    }

    #[test]
    fn test_round_trip() {
        let settings = StudioSettings {
            maintenance_mode: true,
            ..StudioSettings::default()
        };
        let json = serde_json::to_value(&settings).expect("serialize");
        let back: StudioSettings = serde_json::from_value(json).expect("deserialize");
        assert!(back.maintenance_mode);
        assert_eq!(back.studio_name, settings.studio_name);
    }
}
