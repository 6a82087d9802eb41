//! oapath-server - JSON API for open-access pathway lookups

use std::sync::Arc;

use anyhow::{Context, Result};

mod handlers;
mod router;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    oapath_core::init_logging(false, std::env::var("OAPATH_DEBUG").is_ok(), None);

    let settings = oapath_core::Settings::load()?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = Arc::new(AppState::from_settings(&settings)?);
    let router = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on {addr}");

    axum::serve(listener, router).await.context("server error")
}
