//! HTTP server lifecycle
//!
//! Binds the listener, serves the router until Ctrl-C, and reports the final
//! state of the store on the way out.

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{build_router, AppState};
use crate::config::Settings;
use crate::error::EnvelopeResult;
use crate::storage::Storage;

/// Run the service until Ctrl-C
pub async fn serve(settings: Settings) -> EnvelopeResult<()> {
    settings.validate()?;

    let listener = TcpListener::bind(settings.socket_addr()).await?;
    serve_with_shutdown(listener, settings, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` completes
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    settings: Settings,
    shutdown: F,
) -> EnvelopeResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::new(Storage::new(&settings));
    let app = build_router(state.clone(), &settings);

    info!(
        addr = %listener.local_addr()?,
        id_strategy = %settings.id_strategy,
        cors = settings.cors_enabled,
        "Server is listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    let count = state.storage.envelopes.count()?;
    let total_budget = state.storage.envelopes.total_budget()?;
    info!(
        envelopes = count,
        total_budget = %total_budget,
        "Server stopped, in-memory state discarded"
    );

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
