//! Cloud Storage backend: create-or-reuse the bucket, then media uploads.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::models::{CreateBucketRequest, GcsObject};
use super::{api_error, handle_response, join_url, TokenProvider};
use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result};

#[derive(Clone)]
pub struct GcsStorage {
    client: Client,
    endpoint: String,
    project_id: String,
    bucket: String,
    tokens: Arc<dyn TokenProvider>,
}

impl GcsStorage {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        bucket: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            bucket: bucket.into(),
            tokens,
        }
    }

    async fn create_bucket(&self) -> Result<()> {
        let access_token = self.tokens.access_token().await?;
        let url = join_url(&self.endpoint, "storage/v1/b");
        debug!(url = %url, bucket = %self.bucket, "POST request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .query(&[("project", self.project_id.as_str())])
            .json(&CreateBucketRequest { name: &self.bucket })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(api_error(status, &text))
        }
    }
}

impl Storage for GcsStorage {
    /// Never fails: whatever stops the create, the existing bucket is used.
    async fn prepare(&self) -> Result<()> {
        match self.create_bucket().await {
            Ok(()) => info!(bucket = %self.bucket, "Created reports bucket"),
            Err(ReportError::GcpApiError { status: 409, .. }) => {
                info!(bucket = %self.bucket, "Reports bucket already exists, reusing it")
            }
            Err(e) => {
                warn!(bucket = %self.bucket, error = %e, "Could not create reports bucket, using existing one")
            }
        }
        Ok(())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let access_token = self.tokens.access_token().await?;
        let url = join_url(
            &self.endpoint,
            &format!("upload/storage/v1/b/{}/o", self.bucket),
        );
        debug!(url = %url, object = %path, bytes = data.len(), "POST request (upload)");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "text/csv")
            .query(&[("uploadType", "media"), ("name", path)])
            .body(data.to_vec())
            .send()
            .await?;

        let object: GcsObject = handle_response(response).await?;
        debug!(bucket = %object.bucket, object = %object.name, size = ?object.size, "Upload complete");
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        format!("gs://{}/{}", self.bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::StaticTokenProvider;
    use httpmock::prelude::*;

    fn storage_for(server: &MockServer) -> GcsStorage {
        GcsStorage::new(
            Client::new(),
            server.base_url(),
            "test-project",
            "test-reports",
            Arc::new(StaticTokenProvider::new("test-token")),
        )
    }

    #[tokio::test]
    async fn test_prepare_creates_bucket_in_project() {
        let server = MockServer::start();
        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/storage/v1/b")
                .query_param("project", "test-project")
                .header("Authorization", "Bearer test-token")
                .json_body(serde_json::json!({"name": "test-reports"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"kind": "storage#bucket", "name": "test-reports"}));
        });

        storage_for(&server).prepare().await.unwrap();

        create_mock.assert();
    }

    #[tokio::test]
    async fn test_prepare_swallows_already_exists() {
        let server = MockServer::start();
        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/storage/v1/b");
            then.status(409)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "error": {"code": 409, "message": "You already own this bucket. Please select another name."}
                }));
        });

        assert!(storage_for(&server).prepare().await.is_ok());
        create_mock.assert();
    }

    #[tokio::test]
    async fn test_prepare_swallows_other_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/storage/v1/b");
            then.status(403).body("storage.buckets.create denied");
        });

        assert!(storage_for(&server).prepare().await.is_ok());
    }

    #[tokio::test]
    async fn test_write_file_uploads_media() {
        let server = MockServer::start();
        let upload_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload/storage/v1/b/test-reports/o")
                .query_param("uploadType", "media")
                .query_param("name", "2024-05-01T13:45:10.csv")
                .header("Content-Type", "text/csv")
                .body("name,status\nvm-1,RUNNING");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "name": "2024-05-01T13:45:10.csv",
                    "bucket": "test-reports",
                    "size": "24"
                }));
        });

        let storage = storage_for(&server);
        storage
            .write_file("2024-05-01T13:45:10.csv", b"name,status\nvm-1,RUNNING")
            .await
            .unwrap();

        upload_mock.assert();
        assert_eq!(
            storage.location("2024-05-01T13:45:10.csv"),
            "gs://test-reports/2024-05-01T13:45:10.csv"
        );
    }

    #[tokio::test]
    async fn test_write_file_failure_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload/storage/v1/b/test-reports/o");
            then.status(500).body("backend error");
        });

        let err = storage_for(&server)
            .write_file("report.csv", b"name,status")
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::GcpApiError { status: 500, .. }));
    }
}
