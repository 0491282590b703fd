//! Serve command - runs the local web front.

use tokio::signal::unix::{SignalKind, signal};

use crate::cli::ServeArgs;
use crate::client::{client_config, open_storage};
use crate::web::{self, AppState};

/// Run the web front until SIGTERM or SIGINT
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = client_config(&args.client)?;
    let storage = open_storage(&config).await?;
    let state = AppState::new(&config, storage)?;

    // Resume a persisted session while the listener comes up.
    state.spawn_bootstrap();

    let app = web::router(state.clone());

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!("Pragyan web front listening on http://{local_addr}");
    println!();
    println!("Services:");
    for (service, url) in config.endpoints.entries() {
        println!("  {service:<14} {url}");
    }
    println!();
    println!("Press Ctrl+C to shutdown");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
                _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            }
        })
        .await?;

    tracing::info!(
        "Shut down with session {:?}",
        state.store.status()
    );
    println!("Web front shut down");
    Ok(())
}
