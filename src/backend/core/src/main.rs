//! Jsonify Server - Main entry point

use jsonify_core::{api, config::Config, telemetry::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {}. Using defaults.", e);
        Config::default()
    });

    init_logging(&config.logging, &config.environment)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        help_messages = config.jsonify.help_messages,
        max_body_bytes = config.jsonify.max_body_bytes,
        "Starting Jsonify Server"
    );

    let app = api::router(config.jsonify.clone());

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
