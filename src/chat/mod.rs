//! Chat module — the NPC conversation gateway.
//!
//! ```text
//! Player message
//!   → history lookup (per-player lock)
//!   → prompt = persona + recent turns + message
//!   → Gemini (time-bounded) or fallback table
//!   → action-tag extraction + emotion detection
//!   → history append + truncate
//!   → ChatResponse
//! ```

pub mod commands;
pub mod extract;
pub mod fallback;
pub mod gateway;
pub mod history;
pub mod types;

pub use gateway::ChatGateway;
pub use types::{ChatRequest, ChatResponse, Emotion, Role, Turn};
