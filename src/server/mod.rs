//! HTTP server for the chat gateway.
//!
//! Exposes [`ChatGateway`](crate::chat::ChatGateway) to the game client as
//! a small JSON API with permissive CORS.
//!
//! # Endpoints
//!
//! - `GET    /` and `/health`       — Liveness probe + AI status
//! - `POST   /chat`                 — Chat with the NPC
//! - `POST   /command`              — Direct command lookup
//! - `DELETE /memory/:player_name`  — Clear one player's history
//! - `GET    /stats`                — Active conversations

pub mod routes;

pub use routes::{app_router, AppState};
