//! Nova gateway HTTP server binary.
//!
//! Starts an axum HTTP server that the game client talks to.
//!
//! # Environment Variables
//!
//! A `.env` file in the working directory is loaded first if present.
//!
//! - `GEMINI_API_KEY` — Gemini credential; without it the server runs in fallback mode
//! - `GEMINI_MODEL` — Gemini model (default: "gemini-1.5-flash")
//! - `HOST` / `PORT` — bind address (default: 0.0.0.0:8000)
//! - `BACKEND_TIMEOUT_SECS` — Gemini call bound (default: 8)
//! - `RUST_LOG` — Tracing filter (default: "info,nova_gateway=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use nova_gateway::chat::ChatGateway;
use nova_gateway::server::{app_router, AppState};
use nova_gateway::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,nova_gateway=debug".into()),
        )
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded settings from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let config = GatewayConfig::from_env().context("invalid configuration")?;

    if !config.ai_enabled() {
        tracing::warn!("No Gemini API key found; running in fallback mode");
        tracing::warn!("Get a key at https://aistudio.google.com/app/apikey and set GEMINI_API_KEY");
    }

    let gateway = ChatGateway::from_config(&config).context("failed to build gateway")?;
    let ai_status = if gateway.ai_enabled() {
        format!("Gemini enabled ({})", gateway.model_name())
    } else {
        "Fallback mode".to_string()
    };

    let app = app_router(AppState::new(gateway));
    let bind_addr = config.bind_addr();

    tracing::info!("Nova gateway v{} starting on {}", nova_gateway::VERSION, bind_addr);
    tracing::info!("AI status: {}", ai_status);
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /, /health          — liveness + AI status");
    tracing::info!("  POST   /chat               — chat with Nova");
    tracing::info!("  POST   /command            — direct command");
    tracing::info!("  DELETE /memory/:player     — clear player history");
    tracing::info!("  GET    /stats              — active conversations");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("Nova gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
