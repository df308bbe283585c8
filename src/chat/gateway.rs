//! The chat gateway: every operation the HTTP layer exposes.
//!
//! The pipeline per chat message:
//!
//! ```text
//! ChatRequest
//!   → lock the player's history
//!   → render persona + last 5 turns + message into one prompt
//!   → backend call (time-bounded), or fallback table on absence/failure
//!   → strip action tag, detect emotion
//!   → append exchange, truncate to 20 turns
//!   → ChatResponse
//! ```

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::commands;
use super::extract::{detect_emotion, extract_action};
use super::fallback::FallbackTable;
use super::history::{ConversationStore, History, HISTORY_LIMIT, PROMPT_HISTORY_TURNS};
use super::types::{
    ChatRequest, ChatResponse, ClearOutcome, CommandOutcome, GatewayStats, HealthStatus, Turn,
};
use crate::config::{GatewayConfig, DEFAULT_BACKEND_TIMEOUT};
use crate::error::GatewayError;
use crate::llms::base_llm::BaseLLM;
use crate::llms::error::LLMError;
use crate::llms::providers::gemini::GeminiCompletion;
use crate::persona::{PersonaConfig, NOVA};

/// Model name reported when no backend is configured.
pub const FALLBACK_MODEL: &str = "fallback";

/// Process-wide chat context, shared by all request handlers.
#[derive(Debug)]
pub struct ChatGateway {
    persona: PersonaConfig,
    backend: Option<Arc<dyn BaseLLM>>,
    backend_timeout: Duration,
    store: ConversationStore,
    fallback: FallbackTable,
    rng: Mutex<StdRng>,
}

impl ChatGateway {
    /// Create a gateway around an optional backend.
    pub fn new(backend: Option<Arc<dyn BaseLLM>>) -> Self {
        Self {
            persona: NOVA,
            backend,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            store: ConversationStore::new(HISTORY_LIMIT),
            fallback: FallbackTable,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Build a gateway from configuration, constructing the Gemini backend
    /// when a credential is present.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let backend: Option<Arc<dyn BaseLLM>> = match &config.api_key {
            Some(key) => Some(Arc::new(GeminiCompletion::new(
                config.model.clone(),
                key.clone(),
                config.base_url.clone(),
                config.backend_timeout,
            )?)),
            None => None,
        };
        Ok(Self::new(backend).with_backend_timeout(config.backend_timeout))
    }

    /// Set the upper bound on a single backend call.
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    /// Replace the random source used for fallback selection.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// Replace the persona.
    pub fn with_persona(mut self, persona: PersonaConfig) -> Self {
        self.persona = persona;
        self
    }

    pub fn ai_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn model_name(&self) -> &str {
        self.backend
            .as_deref()
            .map(|b| b.model())
            .unwrap_or(FALLBACK_MODEL)
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Answer a chat message. Never fails: backend problems are answered
    /// from the fallback table.
    pub async fn chat(&self, request: &ChatRequest) -> ChatResponse {
        let slot = self.store.slot(&request.player_name);
        let mut history = slot.lock().await;

        let raw = match self.generate(request, &history).await {
            Some(text) => text,
            None => self.fallback_reply(request),
        };

        let extracted = extract_action(&raw);
        let emotion = detect_emotion(&extracted.text);

        history.push_exchange(
            Turn::player(request.message.clone()),
            Turn::ai(extracted.text.clone()),
        );

        tracing::debug!(
            player = %request.player_name,
            action = ?extracted.action,
            %emotion,
            history_len = history.len(),
            "chat reply ready"
        );

        ChatResponse {
            response: extracted.text,
            action: extracted.action,
            action_target: None,
            emotion,
        }
    }

    /// Look up a direct command.
    pub fn process_command(&self, command: &str) -> CommandOutcome {
        commands::process(command)
    }

    /// Forget one player's history.
    pub fn clear_memory(&self, player_name: &str) -> ClearOutcome {
        if self.store.remove(player_name) {
            tracing::info!(player = %player_name, "cleared conversation memory");
            ClearOutcome {
                success: true,
                message: format!("Cleared memory for {}", player_name),
            }
        } else {
            ClearOutcome {
                success: false,
                message: "Player not found".to_string(),
            }
        }
    }

    pub fn stats(&self) -> GatewayStats {
        GatewayStats {
            active_conversations: self.store.len(),
            players: self.store.players(),
            ai_enabled: self.ai_enabled(),
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "online".to_string(),
            ai_enabled: self.ai_enabled(),
            model: self.model_name().to_string(),
        }
    }

    // ------------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------------

    /// Render the prompt sent to the backend.
    pub fn build_prompt(&self, request: &ChatRequest, history: &History) -> String {
        let mut history_text = String::new();
        for turn in history.recent(PROMPT_HISTORY_TURNS) {
            let _ = writeln!(history_text, "{}: {}", turn.role, turn.content);
        }

        format!(
            concat!(
                "{persona}\n\n",
                "Previous conversation:\n{history}\n\n",
                "Player {player} says: \"{message}\"\n\n",
                "Respond as {name}:",
            ),
            persona = self.persona.personality,
            history = history_text,
            player = request.player_name,
            message = request.message,
            name = self.persona.name,
        )
    }

    /// Call the backend, if any. `None` means "use the fallback table".
    async fn generate(&self, request: &ChatRequest, history: &History) -> Option<String> {
        let backend = self.backend.as_ref()?;
        let prompt = self.build_prompt(request, history);

        let result = match tokio::time::timeout(self.backend_timeout, backend.call(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(LLMError::Timeout(self.backend_timeout)),
        };

        match result {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::warn!(
                        player = %request.player_name,
                        "backend returned blank text, using fallback"
                    );
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Err(e) => {
                tracing::warn!(
                    player = %request.player_name,
                    provider = backend.provider(),
                    error = %e,
                    "backend call failed, using fallback"
                );
                None
            }
        }
    }

    fn fallback_reply(&self, request: &ChatRequest) -> String {
        let mut rng = self.rng.lock();
        self.fallback
            .respond(&request.message, &request.player_name, &mut *rng)
    }
}

impl Default for ChatGateway {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::{Emotion, Role};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that returns a fixed reply and records the prompts it saw.
    #[derive(Debug, Default)]
    struct ScriptedLLM {
        reply: String,
        prompts: parking_lot::Mutex<Vec<String>>,
    }

    impl ScriptedLLM {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Default::default(),
            })
        }
    }

    #[async_trait]
    impl BaseLLM for ScriptedLLM {
        fn model(&self) -> &str {
            "scripted"
        }

        fn provider(&self) -> &str {
            "test"
        }

        async fn call(&self, prompt: &str) -> Result<String, LLMError> {
            self.prompts.lock().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    /// Backend that always fails.
    #[derive(Debug, Default)]
    struct BrokenLLM {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BaseLLM for BrokenLLM {
        fn model(&self) -> &str {
            "broken"
        }

        fn provider(&self) -> &str {
            "test"
        }

        async fn call(&self, _prompt: &str) -> Result<String, LLMError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LLMError::Api("quota exceeded".into()))
        }
    }

    /// Backend that never answers within any reasonable bound.
    #[derive(Debug)]
    struct SlowLLM;

    #[async_trait]
    impl BaseLLM for SlowLLM {
        fn model(&self) -> &str {
            "slow"
        }

        fn provider(&self) -> &str {
            "test"
        }

        async fn call(&self, _prompt: &str) -> Result<String, LLMError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".into())
        }
    }

    fn seeded(backend: Option<Arc<dyn BaseLLM>>) -> ChatGateway {
        ChatGateway::new(backend).with_rng(StdRng::seed_from_u64(11))
    }

    #[tokio::test]
    async fn test_backend_reply_action_and_emotion() {
        let llm = ScriptedLLM::replying("  Sure, I'd love to come! [ACTION:FOLLOW]  ");
        let gateway = seeded(Some(llm.clone()));

        let response = gateway.chat(&ChatRequest::new("Alice", "follow me")).await;
        assert_eq!(response.response, "Sure, I'd love to come!");
        assert_eq!(response.action.as_deref(), Some("follow"));
        assert_eq!(response.action_target, None);
        assert_eq!(response.emotion, Emotion::Happy);
    }

    #[tokio::test]
    async fn test_reply_without_tag_has_no_action() {
        let gateway = seeded(Some(ScriptedLLM::replying("Just looking around.")));
        let response = gateway.chat(&ChatRequest::new("Alice", "what's up")).await;
        assert_eq!(response.action, None);
        assert_eq!(response.emotion, Emotion::Neutral);
    }

    #[tokio::test]
    async fn test_prompt_layout_and_history_window() {
        let llm = ScriptedLLM::replying("ok");
        let gateway = seeded(Some(llm.clone()));

        for i in 0..4 {
            gateway
                .chat(&ChatRequest::new("Alice", format!("message {}", i)))
                .await;
        }

        let prompts = llm.prompts.lock();
        let first = &prompts[0];
        assert!(first.starts_with(NOVA.personality));
        assert!(first.contains("Previous conversation:\n\n"));
        assert!(first.contains("Player Alice says: \"message 0\""));
        assert!(first.ends_with("Respond as Nova:"));

        // Fourth call sees the last 5 of 6 recorded turns.
        let last = &prompts[3];
        assert!(!last.contains("player: message 0\n"));
        assert!(last.contains("ai: ok\nplayer: message 1\nai: ok\nplayer: message 2\nai: ok\n"));
        assert!(last.contains("Player Alice says: \"message 3\""));
    }

    #[tokio::test]
    async fn test_fallback_without_backend() {
        let gateway = seeded(None);
        assert!(!gateway.ai_enabled());
        assert_eq!(gateway.model_name(), FALLBACK_MODEL);

        let response = gateway.chat(&ChatRequest::new("Alice", "please follow me")).await;
        assert!(!response.response.is_empty());
        assert_eq!(response.action.as_deref(), Some("follow"));
        assert!(!response.response.contains("[ACTION"));
    }

    #[tokio::test]
    async fn test_backend_failure_downgrades_to_fallback() {
        let llm = Arc::new(BrokenLLM::default());
        let gateway = seeded(Some(llm.clone()));

        let response = gateway.chat(&ChatRequest::new("Bob", "can you dance?")).await;
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
        assert_eq!(response.action.as_deref(), Some("emote"));
        assert!(!response.response.is_empty());

        // the fallback exchange is still recorded
        let turns = gateway.store().snapshot("Bob").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::Player);
        assert_eq!(turns[1].content, response.response);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_timeout_downgrades_to_fallback() {
        let gateway = seeded(Some(Arc::new(SlowLLM))).with_backend_timeout(Duration::from_secs(2));
        let response = gateway.chat(&ChatRequest::new("Carol", "hello")).await;
        assert!(response.response.contains("Carol"));
        assert_ne!(response.response, "too late");
    }

    #[tokio::test]
    async fn test_history_bounded_after_eleven_chats() {
        let gateway = seeded(Some(ScriptedLLM::replying("ok")));
        for i in 0..11 {
            gateway
                .chat(&ChatRequest::new("Alice", format!("m{}", i)))
                .await;
        }

        let turns = gateway.store().snapshot("Alice").await.unwrap();
        assert_eq!(turns.len(), 20);
        assert_eq!(turns[0], Turn::player("m1"));
        assert_eq!(turns[18], Turn::player("m10"));
        assert_eq!(turns[19], Turn::ai("ok"));
    }

    #[tokio::test]
    async fn test_clear_memory_and_stats() {
        let gateway = seeded(None);
        gateway.chat(&ChatRequest::new("Alice", "hi")).await;
        gateway.chat(&ChatRequest::new("Bob", "hi")).await;

        let stats = gateway.stats();
        assert_eq!(stats.active_conversations, 2);
        assert_eq!(stats.players, vec!["Alice", "Bob"]);
        assert!(!stats.ai_enabled);

        let cleared = gateway.clear_memory("Alice");
        assert!(cleared.success);
        assert_eq!(cleared.message, "Cleared memory for Alice");
        assert_eq!(gateway.stats().players, vec!["Bob"]);

        let again = gateway.clear_memory("Alice");
        assert!(!again.success);
        assert_eq!(again.message, "Player not found");
    }

    #[tokio::test]
    async fn test_concurrent_chats_for_same_player_are_not_lost() {
        let gateway = Arc::new(seeded(Some(ScriptedLLM::replying("ok"))));
        let mut handles = Vec::new();
        for i in 0..8 {
            let gateway = gateway.clone();
            handles.push(tokio::spawn(async move {
                gateway
                    .chat(&ChatRequest::new("Dana", format!("m{}", i)))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let turns = gateway.store().snapshot("Dana").await.unwrap();
        assert_eq!(turns.len(), 16);
    }

    #[test]
    fn test_prompt_uses_configured_persona() {
        const ECHO: PersonaConfig = PersonaConfig {
            name: "Echo",
            personality: "You are Echo.",
        };
        let gateway = ChatGateway::default().with_persona(ECHO);
        let prompt = gateway.build_prompt(&ChatRequest::new("Eve", "yo"), &History::default());
        assert!(prompt.starts_with("You are Echo.\n\n"));
        assert!(prompt.ends_with("Respond as Echo:"));
    }

    #[test]
    fn test_health_reports_backend_model() {
        let gateway = seeded(Some(ScriptedLLM::replying("ok")));
        let health = gateway.health();
        assert_eq!(health.status, "online");
        assert!(health.ai_enabled);
        assert_eq!(health.model, "scripted");
    }

    #[test]
    fn test_from_config_without_key_is_fallback() {
        let gateway = ChatGateway::from_config(&GatewayConfig::default()).unwrap();
        assert!(!gateway.ai_enabled());
        assert_eq!(gateway.health().model, "fallback");
    }

    #[test]
    fn test_from_config_with_key_uses_gemini() {
        let config = GatewayConfig {
            api_key: Some(crate::config::ApiKey::new("k")),
            ..GatewayConfig::default()
        };
        let gateway = ChatGateway::from_config(&config).unwrap();
        assert!(gateway.ai_enabled());
        assert_eq!(gateway.model_name(), "gemini-1.5-flash");
    }

    #[test]
    fn test_process_command_delegates_to_table() {
        let gateway = ChatGateway::default();
        assert!(gateway.process_command("wave").success);
        assert_eq!(
            gateway.process_command("fly").error.as_deref(),
            Some("Unknown command")
        );
    }
}
