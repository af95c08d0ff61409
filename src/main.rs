//! Panel Kit - helpers for an admin control panel
//!
//! This is the main entry point for the panel-kit server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use panel_kit::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_and_release,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("panel_kit={},tower_http=info", config.log_level()))
        .init();

    let settings = config.settings();
    info!("Starting panel-kit server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, api_url={}, table_length={}",
          config.host, config.port, settings.api_url, settings.table_length);

    // Create application state with injected settings
    let state = Arc::new(AppState::new(settings));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /elements/:id         - Register a button");
    info!("  GET    /elements/:id         - Element state and render history");
    info!("  POST   /countdown/:id        - Start a countdown");
    info!("  DELETE /countdown/:id        - Cancel a countdown");
    info!("  GET    /defaults/pagination  - Default pagination options");
    info!("  GET    /defaults/filters     - Default table filters");
    info!("  GET    /page-number          - Row number for a table row");
    info!("  POST   /messages/server-error - Message for a failed request");
    info!("  POST   /messages/validation  - Message for a validation failure");
    info!("  GET    /status               - Panel status");
    info!("  GET    /health               - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_and_release(state))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
