//! Text-generation provider implementations.
//!
//! Each provider implements the [`BaseLLM`](crate::llms::base_llm::BaseLLM)
//! trait and handles authentication, request formatting and response
//! parsing specific to that provider.
//!
//! | Provider | Module |
//! |----------|--------|
//! | Google Gemini | [`gemini`] |

pub mod gemini;
