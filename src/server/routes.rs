//! Axum route handlers for the gateway HTTP server.
//!
//! # Routes
//!
//! - `GET    /`                     — Returns `{"status": "online", "ai_enabled", "model"}`
//! - `GET    /health`               — Same as `/`
//! - `POST   /chat`                 — Accepts `ChatRequest`, returns `ChatResponse`
//! - `POST   /command`              — Accepts `{"command": ...}`, static lookup
//! - `DELETE /memory/:player_name`  — Clears one player's history
//! - `GET    /stats`                — Conversation store snapshot

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::chat::types::{
    ChatRequest, ChatResponse, ClearOutcome, CommandOutcome, CommandRequest, GatewayStats,
    HealthStatus,
};
use crate::chat::ChatGateway;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The chat gateway, owning the conversation store.
    pub gateway: Arc<ChatGateway>,
}

impl AppState {
    pub fn new(gateway: ChatGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ChatGateway::default())
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/command", post(command_handler))
        .route("/memory/:player_name", delete(clear_memory_handler))
        .route("/stats", get(stats_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / and GET /health — liveness/info.
async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.gateway.health())
}

/// POST /chat — answer a player message.
///
/// Always 200 once the body parses; backend failures are answered from
/// the fallback table.
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    tracing::info!(player = %request.player_name, "chat request");
    Json(state.gateway.chat(&request).await)
}

/// POST /command — static command lookup.
async fn command_handler(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Json<CommandOutcome> {
    Json(state.gateway.process_command(&request.command))
}

/// DELETE /memory/:player_name — forget one player's history.
async fn clear_memory_handler(
    State(state): State<AppState>,
    Path(player_name): Path<String>,
) -> Json<ClearOutcome> {
    Json(state.gateway.clear_memory(&player_name))
}

/// GET /stats — diagnostic snapshot.
async fn stats_handler(State(state): State<AppState>) -> Json<GatewayStats> {
    Json(state.gateway.stats())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
