//! Concierge chat route handlers.
//!
//! The chat widget forwards visitor text to the Gemini client and renders
//! markdown (or generated visuals) back as HTMX fragments. The transcript
//! is an append-only sequence held in the session.

use std::sync::LazyLock;

use askama::Template;
use askama_web::WebTemplate;
use atelier_core::ChatRole;
use axum::{Form, extract::State};
use regex::Regex;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::gemini::ImageSize;
use crate::models::{ChatMessage, session_keys};
use crate::state::AppState;

/// Shown when the Gemini API key is not configured - service degradation,
/// not an error.
const CONTACT_FALLBACK: &str = "Please reach us at **+1 (555) 456-7890** \
    for personal assistance from the studio.";

/// Shown when a configured call fails.
const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// Requests that read like "generate/create/draw ... image/photo/visual"
/// are routed to the image model instead of the text model.
static IMAGE_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(generar|crear|hacer|generate|create|draw).*(imagen|image|foto|photo|visual)")
        .expect("image intent pattern is valid")
});

/// Chat message display data for templates.
#[derive(Clone)]
pub struct ChatMessageView {
    pub from_user: bool,
    /// Message rendered from markdown to HTML.
    pub html: String,
    pub image: Option<String>,
}

impl From<&ChatMessage> for ChatMessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            from_user: message.role == ChatRole::User,
            html: render_markdown(&message.content),
            image: message.image.clone(),
        }
    }
}

/// Render concierge markdown to HTML.
fn render_markdown(source: &str) -> String {
    comrak::markdown_to_html(source, &comrak::Options::default())
}

/// Chat widget fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/chat_widget.html")]
pub struct ChatWidgetTemplate {
    pub messages: Vec<ChatMessageView>,
}

/// Transcript fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/chat_messages.html")]
pub struct ChatMessagesTemplate {
    pub messages: Vec<ChatMessageView>,
}

/// Message form data.
#[derive(Debug, Deserialize)]
pub struct MessageForm {
    pub message: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the transcript from the session, defaulting to empty.
async fn load_transcript(session: &Session) -> Result<Vec<ChatMessage>> {
    Ok(session
        .get::<Vec<ChatMessage>>(session_keys::CHAT_TRANSCRIPT)
        .await?
        .unwrap_or_default())
}

/// Save the transcript back to the session.
async fn save_transcript(session: &Session, transcript: &[ChatMessage]) -> Result<()> {
    session
        .insert(session_keys::CHAT_TRANSCRIPT, transcript)
        .await?;
    Ok(())
}

/// Display the chat widget with the current transcript.
#[instrument(skip(session))]
pub async fn widget(session: Session) -> Result<ChatWidgetTemplate> {
    let transcript = load_transcript(&session).await?;
    Ok(ChatWidgetTemplate {
        messages: transcript.iter().map(ChatMessageView::from).collect(),
    })
}

/// Send a message to the concierge (HTMX).
///
/// Appends the visitor message and the concierge reply to the transcript
/// and returns the full transcript fragment. Image-intent messages go to
/// the image model; everything else gets a quick markdown reply.
#[instrument(skip(state, session, form))]
pub async fn message(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MessageForm>,
) -> Result<ChatMessagesTemplate> {
    let text = form.message.trim().to_string();
    if text.is_empty() {
        return Err(AppError::BadRequest("message is required".to_string()));
    }

    let mut transcript = load_transcript(&session).await?;
    transcript.push(ChatMessage::user(text.clone()));

    let reply = match state.concierge() {
        None => ChatMessage::assistant(CONTACT_FALLBACK),
        Some(client) => {
            if IMAGE_INTENT.is_match(&text) {
                match client.generate_visual(&text, ImageSize::OneK).await {
                    Ok(Some(image)) => ChatMessage::assistant_with_image(
                        "Here is a bespoke visualization based on your request.",
                        image.data_url(),
                    ),
                    Ok(None) => match client.quick_chat(&text).await {
                        Ok(answer) => ChatMessage::assistant(answer),
                        Err(e) => {
                            tracing::error!("Concierge chat failed: {e}");
                            ChatMessage::assistant(GENERIC_FAILURE)
                        }
                    },
                    Err(e) => {
                        tracing::error!("Concierge visualization failed: {e}");
                        ChatMessage::assistant(GENERIC_FAILURE)
                    }
                }
            } else {
                match client.quick_chat(&text).await {
                    Ok(answer) => ChatMessage::assistant(answer),
                    Err(e) => {
                        tracing::error!("Concierge chat failed: {e}");
                        ChatMessage::assistant(GENERIC_FAILURE)
                    }
                }
            }
        }
    };

    transcript.push(reply);
    save_transcript(&session, &transcript).await?;

    Ok(ChatMessagesTemplate {
        messages: transcript.iter().map(ChatMessageView::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_intent_matches() {
        assert!(IMAGE_INTENT.is_match("Please generate an image of a walnut desk"));
        assert!(IMAGE_INTENT.is_match("can you CREATE a photo of my sofa"));
        assert!(IMAGE_INTENT.is_match("generar una imagen de un sillon"));
    }

    #[test]
    fn test_plain_questions_do_not_match() {
        assert!(!IMAGE_INTENT.is_match("What fabric is the cloud sofa upholstered in?"));
        assert!(!IMAGE_INTENT.is_match("draw up a delivery estimate"));
    }

    #[test]
    fn test_markdown_renders_emphasis() {
        let html = render_markdown("Welcome to **Atelier Lumen**.");
        assert!(html.contains("<strong>Atelier Lumen</strong>"));
    }
}
