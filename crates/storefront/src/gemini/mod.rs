//! Gemini API integration for the design concierge.
//!
//! The storefront talks to the Gemini `generateContent` endpoint for two
//! things: quick markdown chat replies and furniture visualization images.
//! The client is deliberately narrow - model identity, request shapes, and
//! token budgets stay inside this module; routes only see
//! [`GeminiClient`]'s typed methods and [`GeminiError`].
//!
//! An absent API key is not an error: the application state holds an
//! `Option<GeminiClient>` and routes substitute a canned contact message
//! when it is `None`.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{GeneratedImage, ImageSize};
