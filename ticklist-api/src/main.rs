//! # Ticklist API Server
//!
//! HTTP entry point for the ticklist task-tracking service.
//!
//! All state (users, sessions, tasks) is held in process memory. Nothing is
//! persisted: restarting the server discards every account, session, and
//! task. Operators fronting this service with anything durable need to know
//! that up front.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p ticklist-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticklist_api::{
    app::{build_router, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticklist_api=info,ticklist_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Ticklist API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );
    tracing::warn!("Storage is in-memory only; all accounts, sessions, and tasks are lost on restart");

    let state = AppState::new(config.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
