// This is the entry point of the chord chart service.
//
// **Architecture Overview:**
// - `core/` = Business logic (provider-agnostic)
// - `infra/` = Implementations of core traits (Google APIs)
// - `api/` = HTTP adapters (the web app's wire format)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Start the HTTP server

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a handful of mod.rs files that all look the same.
#[path = "api/api_layer.rs"]
mod api;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::AppState;
use crate::core::charts::ChartService;
use crate::infra::google::{GoogleDriveClient, ServiceAccountResolver};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let resolver = Arc::new(ServiceAccountResolver::from_env());
    if !resolver.is_valid() {
        tracing::warn!(
            "No usable service account key configured; \
             /auth and /validate will report the problem to the web app"
        );
    }

    let drive_client = GoogleDriveClient::new().context("Failed to create Drive client")?;
    let chart_service = Arc::new(ChartService::new(drive_client));

    let state = AppState {
        resolver,
        charts: chart_service,
    };

    // ========================================================================
    // HTTP SERVER
    // ========================================================================

    let app = api::build_router(state);

    let addr = std::env::var("CHARTDRIVE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
