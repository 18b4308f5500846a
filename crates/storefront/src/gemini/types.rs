//! Types for the Gemini `generateContent` API.
//!
//! These match the REST API's JSON shapes (camelCase field names).

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation content; the storefront always sends a single turn.
    pub contents: Vec<Content>,
    /// System prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Generation parameters (image size, aspect ratio).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A content turn: an ordered list of parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-text user turn.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// One part of a content turn: text or inline binary data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline image part from already-encoded base64 data.
    #[must_use]
    pub fn inline_image(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: base64_data.into(),
            }),
        }
    }
}

/// Inline binary payload (base64).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Generation parameters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Image generation parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

/// Output resolution for generated visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl std::str::FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1K" => Ok(Self::OneK),
            "2K" => Ok(Self::TwoK),
            "4K" => Ok(Self::FourK),
            _ => Err(format!("invalid image size: {s}")),
        }
    }
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() { None } else { Some(text) }
    }

    /// First inline image of the first candidate, if any.
    #[must_use]
    pub fn image(&self) -> Option<GeneratedImage> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .map(|data| GeneratedImage {
                mime_type: data.mime_type.clone(),
                data: data.data.clone(),
            })
    }
}

/// An image returned by the API, still base64-encoded.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    /// Render as a `data:` URL suitable for an `<img src>` attribute.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::text("hello")],
            system_instruction: Some(Content::text("be brief")),
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: Some("1:1".to_string()),
                    image_size: Some(ImageSize::TwoK),
                }),
            }),
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(
            json["generationConfig"]["imageConfig"]["imageSize"],
            serde_json::json!("2K")
        );
        assert_eq!(
            json["generationConfig"]["imageConfig"]["aspectRatio"],
            serde_json::json!("1:1")
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [
                { "content": { "role": "model", "parts": [
                    { "text": "Velvet wears " },
                    { "text": "beautifully." }
                ] } }
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.text().as_deref(), Some("Velvet wears beautifully."));
        assert!(response.image().is_none());
    }

    #[test]
    fn test_response_image_extraction() {
        let json = r#"{
            "candidates": [
                { "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                ] } }
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).expect("deserialize");
        let image = response.image().expect("image part");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");
        assert!(response.text().is_none());
    }

    #[test]
    fn test_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{ "candidates": [] }"#).expect("deserialize");
        assert!(response.text().is_none());
        assert!(response.image().is_none());
    }

    #[test]
    fn test_image_size_round_trip() {
        for (size, name) in [
            (ImageSize::OneK, "1K"),
            (ImageSize::TwoK, "2K"),
            (ImageSize::FourK, "4K"),
        ] {
            assert_eq!(name.parse::<ImageSize>().expect("parse"), size);
            assert_eq!(
                serde_json::to_string(&size).expect("serialize"),
                format!("\"{name}\"")
            );
        }
        assert!("8K".parse::<ImageSize>().is_err());
    }
}
