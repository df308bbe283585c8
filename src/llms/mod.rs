//! Text-generation backends for the chat gateway.
//!
//! - [`base_llm`] - The narrow trait every backend implements (prompt in, text out)
//! - [`error`] - Backend failure taxonomy
//! - [`providers`] - Concrete provider implementations (Gemini)

pub mod base_llm;
pub mod error;
pub mod providers;

// Re-exports for convenience
pub use base_llm::BaseLLM;
pub use error::LLMError;
pub use providers::gemini::GeminiCompletion;
