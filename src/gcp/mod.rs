//! Thin REST clients for the two Google Cloud APIs the report touches.

pub mod auth;
pub mod compute;
pub mod models;
pub mod storage;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::settings::ReportSettings;
use crate::utils::error::{ReportError, Result};
use models::GoogleErrorResponse;

pub use auth::{ambient_token_provider, MetadataTokenProvider, StaticTokenProvider, TokenProvider};
pub use compute::ComputeClient;
pub use storage::GcsStorage;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_COMPUTE_ENDPOINT: &str = "https://compute.googleapis.com";
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";
pub const DEFAULT_METADATA_ENDPOINT: &str = "http://metadata.google.internal";

/// Base URLs of the APIs. Overridable so emulators and mock servers can stand in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcpEndpoints {
    pub compute: String,
    pub storage: String,
    pub metadata: String,
}

impl Default for GcpEndpoints {
    fn default() -> Self {
        Self {
            compute: DEFAULT_COMPUTE_ENDPOINT.to_string(),
            storage: DEFAULT_STORAGE_ENDPOINT.to_string(),
            metadata: DEFAULT_METADATA_ENDPOINT.to_string(),
        }
    }
}

/// Builds the HTTP client shared by every API call of a process.
pub fn build_http_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()?)
}

/// The compute and storage clients for one set of settings, sharing a token provider.
#[derive(Clone)]
pub struct GcpClients {
    pub compute: ComputeClient,
    pub storage: GcsStorage,
}

impl GcpClients {
    pub fn from_settings(settings: &ReportSettings, client: Client) -> Self {
        let tokens = ambient_token_provider(
            client.clone(),
            settings.access_token.as_deref(),
            &settings.endpoints.metadata,
        );

        Self {
            compute: ComputeClient::new(client.clone(), &settings.endpoints.compute, tokens.clone()),
            storage: GcsStorage::new(
                client,
                &settings.endpoints.storage,
                &settings.project_id,
                &settings.reports_bucket,
                tokens,
            ),
        }
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Decodes a successful JSON body, or turns the failure into a `ReportError`.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text, "Failed to parse response");
            ReportError::SerializationError(e)
        })
    } else {
        Err(api_error(status, &text))
    }
}

pub(crate) fn api_error(status: StatusCode, body: &str) -> ReportError {
    // Google APIs wrap failures as {"error": {"code": .., "message": ..}}
    let message = serde_json::from_str::<GoogleErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ReportError::AuthError { message }
    } else {
        ReportError::GcpApiError {
            status: status.as_u16(),
            message,
        }
    }
}
