//! HTTP server startup.
//!
//! Wires the database, completion provider, and router into a running server.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::{self, AppState};
use crate::config::NotemindConfig;
use crate::db;
use crate::llm;
use crate::notes::NoteStore;

/// Shared setup: open DB, create completion provider.
pub fn setup_state(config: NotemindConfig) -> Result<AppState> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let provider = llm::create_provider(&config.llm)?;
    let llm: Arc<dyn llm::CompletionProvider> = Arc::from(provider);
    tracing::info!(model = llm.model_name(), "completion provider ready");

    Ok(AppState::new(NoteStore::new(conn), llm, Arc::new(config)))
}

/// Start the HTTP API and serve until Ctrl-C.
pub async fn serve(config: NotemindConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting notemind API");

    let state = setup_state(config)?;
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "API listening at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down API server");
        })
        .await?;

    Ok(())
}
