//! # Nova Gateway
//!
//! HTTP chat gateway for game NPCs. A game client posts a player's
//! message; the gateway renders a persona prompt with the player's recent
//! history, asks Google Gemini for a reply (or answers from a local
//! fallback table when Gemini is not configured or fails), pulls embedded
//! `[ACTION:WORD]` directives and an emotion label out of the text, and
//! keeps a short in-memory history per player.

pub mod chat;
pub mod config;
pub mod error;
pub mod llms;
pub mod persona;
pub mod server;

// Re-exports
pub use chat::{ChatGateway, ChatRequest, ChatResponse, Emotion};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use llms::{BaseLLM, LLMError};
pub use persona::PersonaConfig;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
