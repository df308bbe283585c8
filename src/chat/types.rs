//! Request, response and history types for the chat gateway.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// History
// ============================================================================

/// Who produced a history turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Player,
    Ai,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Ai => "ai",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn player(content: impl Into<String>) -> Self {
        Self {
            role: Role::Player,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
        }
    }
}

// ============================================================================
// Emotion
// ============================================================================

/// Emotion label attached to every reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Excited,
    Thinking,
    Laughing,
    #[default]
    Neutral,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Excited => "excited",
            Self::Thinking => "thinking",
            Self::Laughing => "laughing",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Chat
// ============================================================================

/// Incoming chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Player identifier; history is keyed on it.
    pub player_name: String,
    /// The player's message text.
    pub message: String,
    /// Free-form game context. Accepted and currently unused.
    #[serde(default)]
    pub context: Option<serde_json::Map<String, Value>>,
}

impl ChatRequest {
    pub fn new(player_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            message: message.into(),
            context: None,
        }
    }
}

/// Structured reply returned for every chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text with action tags removed.
    pub response: String,
    /// Lower-cased action word from the first `[ACTION:...]` tag.
    pub action: Option<String>,
    /// Reserved for the game client; never populated.
    pub action_target: Option<String>,
    /// Emotion inferred from the reply text.
    #[serde(default)]
    pub emotion: Emotion,
}

// ============================================================================
// Commands
// ============================================================================

/// Incoming direct command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: String,
}

/// What the game client should do for a known command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<&'static str>,
}

/// Result of a command lookup.
///
/// Serializes flat: `{"success": true, "action": ..., "animation": ...}` or
/// `{"success": false, "error": "Unknown command"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub success: bool,
    #[serde(flatten)]
    pub descriptor: Option<ActionDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Memory / stats / health
// ============================================================================

/// Result of clearing one player's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearOutcome {
    pub success: bool,
    pub message: String,
}

/// Read-only snapshot of the conversation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStats {
    pub active_conversations: usize,
    pub players: Vec<String>,
    pub ai_enabled: bool,
}

/// Liveness/info report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub ai_enabled: bool,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_serializes_nulls() {
        let response = ChatResponse {
            response: "Hi!".into(),
            action: None,
            action_target: None,
            emotion: Emotion::Neutral,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "response": "Hi!",
                "action": null,
                "action_target": null,
                "emotion": "neutral",
            })
        );
    }

    #[test]
    fn test_chat_request_context_is_optional() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"player_name": "Alice", "message": "hi"}"#).unwrap();
        assert!(request.context.is_none());

        let request: ChatRequest = serde_json::from_str(
            r#"{"player_name": "Alice", "message": "hi", "context": {"zone": "spawn"}}"#,
        )
        .unwrap();
        assert_eq!(request.context.unwrap()["zone"], "spawn");
    }

    #[test]
    fn test_command_outcome_flattens_descriptor() {
        let outcome = CommandOutcome {
            success: true,
            descriptor: Some(ActionDescriptor {
                action: "emote",
                description: None,
                animation: Some("Wave"),
            }),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"success": true, "action": "emote", "animation": "Wave"})
        );
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let turn = Turn::ai("hello");
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            serde_json::json!({"role": "ai", "content": "hello"})
        );
    }
}
