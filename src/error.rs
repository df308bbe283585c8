//! Gateway startup and configuration errors.
//!
//! Request handling never produces these: chat requests downgrade backend
//! failures to the fallback table, and the other operations report their
//! failures as structured results.

use thiserror::Error;

use crate::llms::error::LLMError;

/// Errors that can occur while loading configuration or starting the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A configuration value could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidSetting { key: &'static str, value: String },

    /// A dotenv file could not be read or parsed.
    #[error("Env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// File or socket I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The generation backend could not be constructed.
    #[error("Backend error: {0}")]
    Llm(#[from] LLMError),
}
