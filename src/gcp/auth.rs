//! Access tokens from the platform's ambient credentials.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::models::AccessTokenResponse;
use super::{handle_response, join_url};
use crate::utils::error::{ReportError, Result};

const TOKEN_PATH: &str = "computeMetadata/v1/instance/service-accounts/default/token";

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Fixed bearer token, for local runs outside Google Cloud.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Asks the metadata server for the runtime service account's token.
#[derive(Clone)]
pub struct MetadataTokenProvider {
    client: Client,
    endpoint: String,
}

impl MetadataTokenProvider {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for MetadataTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let url = join_url(&self.endpoint, TOKEN_PATH);
        debug!(url = %url, "Fetching access token from metadata server");

        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| ReportError::AuthError {
                message: format!("Metadata server unreachable: {}", e),
            })?;

        let token: AccessTokenResponse = handle_response(response).await?;
        debug!(expires_in = token.expires_in, "Obtained access token");
        Ok(token.access_token)
    }
}

/// An explicit token wins; otherwise the metadata server is used.
pub fn ambient_token_provider(
    client: Client,
    access_token: Option<&str>,
    metadata_endpoint: &str,
) -> Arc<dyn TokenProvider> {
    match access_token {
        Some(token) if !token.is_empty() => Arc::new(StaticTokenProvider::new(token)),
        _ => Arc::new(MetadataTokenProvider::new(client, metadata_endpoint)),
    }
}
