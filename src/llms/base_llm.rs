//! Base trait for text-generation backends.
//!
//! The gateway only ever needs a single completion: one fully rendered
//! prompt goes in, generated text (or a failure) comes out. Keeping the
//! interface this narrow lets the Gemini client be swapped for a scripted
//! backend in tests without touching the gateway logic.

use std::fmt;

use async_trait::async_trait;

use super::error::LLMError;

/// Trait for text-generation backends.
///
/// Implementations must be cheap to share behind an `Arc` and should
/// handle their own transport concerns (auth headers, endpoint layout).
/// Callers bound the call with their own timeout, so implementations do
/// not need to retry.
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// Get the model identifier/name, reported by the health endpoint.
    fn model(&self) -> &str;

    /// Get the provider name.
    fn provider(&self) -> &str;

    /// Generate text for a fully rendered prompt.
    ///
    /// Returns the raw generated text, untrimmed.
    async fn call(&self, prompt: &str) -> Result<String, LLMError>;
}
