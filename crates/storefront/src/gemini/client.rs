//! Gemini API client for concierge chat and visualization.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GeneratedImage, GenerationConfig,
    ImageConfig, ImageSize, Part,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const CONCIERGE_SYSTEM_PROMPT: &str = "You are a helpful and quick assistant for Atelier Lumen, \
    a luxury furniture studio. Keep answers concise and elegant. Use Markdown for formatting.";

const VISUAL_PROMPT_PREFIX: &str =
    "Create a professional high-end furniture studio photo for Atelier Lumen: ";

/// Gemini API client.
///
/// Provides typed access to the `generateContent` endpoint for concierge
/// text replies and visualization images.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &GeminiConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(GeminiClientInner {
                client,
                text_model: config.text_model.clone(),
                image_model: config.image_model.clone(),
            }),
        }
    }

    /// Fast concierge text reply (markdown).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns an error
    /// response, or the response carries no text.
    #[instrument(skip(self, prompt), fields(model = %self.inner.text_model))]
    pub async fn quick_chat(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: Some(Content::text(CONCIERGE_SYSTEM_PROMPT)),
            generation_config: None,
        };

        let response = self.generate(&self.inner.text_model, &request).await?;
        response
            .text()
            .ok_or_else(|| GeminiError::Parse("response carried no text".to_string()))
    }

    /// Generate a standalone furniture visual.
    ///
    /// Returns `Ok(None)` when the model produced no image part.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self, prompt), fields(model = %self.inner.image_model))]
    pub async fn generate_visual(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> Result<Option<GeneratedImage>, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(format!("{VISUAL_PROMPT_PREFIX}{prompt}"))],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: Some("1:1".to_string()),
                    image_size: Some(size),
                }),
            }),
        };

        let response = self.generate(&self.inner.image_model, &request).await?;
        Ok(response.image())
    }

    /// Composite a piece into a customer's room photo.
    ///
    /// Both images must arrive as base64-encoded JPEG data. Returns
    /// `Ok(None)` when the model produced no image part.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip_all, fields(model = %self.inner.image_model, product = %product_name))]
    pub async fn visualize_in_space(
        &self,
        room_jpeg_b64: &str,
        product_name: &str,
        instructions: &str,
        furniture_jpeg_b64: &str,
    ) -> Result<Option<GeneratedImage>, GeminiError> {
        let directive = format!(
            "Image 1 is a photo of my room. Image 2 is the \"{product_name}\" furniture. \
             Please realistically place the furniture from Image 2 into the room shown in \
             Image 1. Maintain perspective, lighting, and shadow consistency. \
             Additional instructions: {instructions}"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::inline_image("image/jpeg", room_jpeg_b64),
                    Part::inline_image("image/jpeg", furniture_jpeg_b64),
                    Part::text(directive),
                ],
            }],
            system_instruction: None,
            generation_config: None,
        };

        let response = self.generate(&self.inner.image_model, &request).await?;
        Ok(response.image())
    }

    /// Send a `generateContent` request to the given model.
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent");

        let response = self.inner.client.post(url).json(request).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GeminiError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return GeminiError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    GeminiError::Api {
                        status: api_error.error.status,
                        message: api_error.error.message,
                    }
                } else {
                    GeminiError::Api {
                        status: status.to_string(),
                        message: body,
                    }
                }
            }
            Err(e) => GeminiError::Http(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_config() -> GeminiConfig {
        GeminiConfig {
            api_key: SecretString::from("test-key"),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-3-pro-image-preview".to_string(),
        }
    }

    #[test]
    fn test_gemini_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<GeminiClient>();
    }

    #[test]
    fn test_gemini_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeminiClient>();
    }

    #[test]
    fn test_client_construction() {
        let client = GeminiClient::new(&test_config());
        assert_eq!(client.inner.text_model, "gemini-3-flash-preview");
        assert_eq!(client.inner.image_model, "gemini-3-pro-image-preview");
    }
}
