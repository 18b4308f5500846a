//! Session-held models for the storefront.
//!
//! The storefront keeps two pieces of per-visitor state, both serialized
//! into the tower-sessions session: the cart and the concierge transcript.
//! Neither outlives the session.

use atelier_core::ChatRole;
use serde::{Deserialize, Serialize};

/// One message in the concierge transcript.
///
/// Transcripts are append-only; messages are never merged or deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    /// Markdown source of the message.
    pub content: String,
    /// Inline image payload as a `data:` URL, for visualization replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ChatMessage {
    /// A visitor message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            image: None,
        }
    }

    /// A concierge text reply.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            image: None,
        }
    }

    /// A concierge reply carrying a generated visual.
    #[must_use]
    pub fn assistant_with_image(content: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            image: Some(image.into()),
        }
    }
}

/// Session keys for storefront data.
pub mod session_keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the concierge transcript.
    pub const CHAT_TRANSCRIPT: &str = "chat_transcript";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_skipped_when_absent() {
        let message = ChatMessage::assistant("Welcome to **Atelier Lumen**.");
        let json = serde_json::to_string(&message).expect("serialize");
        assert!(!json.contains("image"));
    }

    #[test]
    fn test_round_trip_with_image() {
        let message =
            ChatMessage::assistant_with_image("Here is a visual.", "data:image/png;base64,AA==");
        let json = serde_json::to_string(&message).expect("serialize");
        let back: ChatMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.image.as_deref(), Some("data:image/png;base64,AA=="));
        assert_eq!(back.role, ChatRole::Assistant);
    }
}
