//! HTTP trigger: every request produces one report.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use reqwest::Client;

use crate::config::FunctionConfig;
use crate::core::{etl::EtlEngine, pipeline::ReportPipeline};
use crate::gcp::GcpClients;
use crate::utils::error::Result;

pub struct AppState {
    pub config: FunctionConfig,
    pub client: Client,
}

impl AppState {
    pub fn new(config: FunctionConfig, client: Client) -> Self {
        Self { config, client }
    }
}

/// Lists running instances and uploads the CSV, returning its `gs://` location.
pub async fn run_report(state: &AppState) -> Result<String> {
    let settings = &state.config.settings;
    let clients = GcpClients::from_settings(settings, state.client.clone());
    let pipeline = ReportPipeline::new(clients.storage, clients.compute, settings.clone());

    EtlEngine::new(pipeline).run().await
}

async fn list_instances(State(state): State<Arc<AppState>>) -> Response {
    match run_report(&state).await {
        Ok(location) => {
            tracing::info!(location = %location, "Instance report written");
            (StatusCode::OK, "OK").into_response()
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                category = ?e.category(),
                severity = ?e.severity(),
                "Instance report failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Any method on any path triggers the report.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().fallback(list_instances).with_state(state)
}
