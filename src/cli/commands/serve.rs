//! HTTP API server.

use crate::analysis::Analyzer;
use crate::api;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use tracing::info;

/// Run the HTTP API server.
///
/// Host and port override the configured values when given.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    preflight::check(Operation::Serve, &settings)?;

    let analyzer = Analyzer::from_settings(&settings)?;
    let model = analyzer.model().to_string();
    let app = api::router(analyzer);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    Output::header("Tubelens API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Model", &model);
    println!();
    println!("Endpoints:");
    Output::kv("Analyze", "POST /analyze");
    Output::kv("Summary", "GET  /analyze/summary?url=");
    Output::kv("Topics", "GET  /analyze/topics?url=");
    Output::kv("Insights", "GET  /analyze/insights?url=");
    Output::kv("Schema", "GET  /schema");
    Output::kv("Health", "GET  /health");
    Output::kv("Versioned", "all of the above under /api/v1");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed.
        std::future::pending::<()>().await;
    }
}
