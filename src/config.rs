//! Gateway configuration.
//!
//! Values come from the process environment, optionally layered over a
//! dotenv file. The only value that changes behavior at runtime is the
//! Gemini API key: when it is absent, blank or still the template
//! placeholder, the gateway runs in fallback mode.
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) — backend credential
//! - `GEMINI_MODEL` — model name (default: "gemini-1.5-flash")
//! - `GEMINI_BASE_URL` — API root
//! - `HOST` — bind host (default: "0.0.0.0")
//! - `PORT` — bind port (default: 8000)
//! - `BACKEND_TIMEOUT_SECS` — backend call bound in seconds (default: 8)

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::GatewayError;
use crate::llms::providers::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Placeholder value shipped in the sample `.env`; treated as "no key".
pub const API_KEY_PLACEHOLDER: &str = "your_api_key_here";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default backend call bound.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// ApiKey
// ---------------------------------------------------------------------------

/// A backend credential whose `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Parse a raw configuration value, rejecting blank and placeholder keys.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == API_KEY_PLACEHOLDER {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for building the outbound request only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// ---------------------------------------------------------------------------
// GatewayConfig
// ---------------------------------------------------------------------------

/// Configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gemini credential; `None` means fallback mode.
    pub api_key: Option<ApiKey>,
    /// Gemini model name.
    pub model: String,
    /// Gemini API root.
    pub base_url: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Upper bound on a single backend call.
    pub backend_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from a dotenv file, with process environment values taking
    /// precedence over the file.
    ///
    /// Unlike `dotenvy::from_path`, this does not modify the process
    /// environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let mut file_values = HashMap::new();
        for item in dotenvy::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            file_values.insert(key, value);
        }
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        })
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("GOOGLE_API_KEY"))
            .and_then(|raw| ApiKey::parse(&raw));

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| GatewayError::InvalidSetting { key: "PORT", value: raw })?,
            None => defaults.port,
        };

        let backend_timeout = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(GatewayError::InvalidSetting {
                        key: "BACKEND_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => defaults.backend_timeout,
        };

        Ok(Self {
            api_key,
            model: non_blank(lookup("GEMINI_MODEL")).unwrap_or(defaults.model),
            base_url: non_blank(lookup("GEMINI_BASE_URL")).unwrap_or(defaults.base_url),
            host: non_blank(lookup("HOST")).unwrap_or(defaults.host),
            port,
            backend_timeout,
        })
    }

    /// Whether a backend credential is configured.
    pub fn ai_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// The `host:port` string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
