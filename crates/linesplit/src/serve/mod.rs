mod cli;
mod router;

pub use cli::App;

use crate::prelude::{eprintln, *};

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", app.host, app.port);

    if global.verbose {
        eprintln!("Starting text processing server on {}...", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("listening on http://{addr}");

    if global.verbose {
        eprintln!("Process endpoint: http://{}/api/process-text", addr);
    }

    axum::serve(listener, router::create_router())
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}
