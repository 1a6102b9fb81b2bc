//! Compute Engine `instances.list` client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::models::InstanceListResponse;
use super::{handle_response, join_url, TokenProvider};
use crate::domain::model::{Instance, ListInstancesRequest};
use crate::domain::ports::InstanceSource;
use crate::utils::error::Result;

#[derive(Clone)]
pub struct ComputeClient {
    client: Client,
    endpoint: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ComputeClient {
    pub fn new(client: Client, endpoint: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            tokens,
        }
    }

    fn instances_url(&self, project: &str, zone: &str) -> String {
        join_url(
            &self.endpoint,
            &format!("compute/v1/projects/{}/zones/{}/instances", project, zone),
        )
    }

    async fn list_page(
        &self,
        request: &ListInstancesRequest,
        page_token: Option<&str>,
        access_token: &str,
    ) -> Result<InstanceListResponse> {
        let url = self.instances_url(&request.project, &request.zone);
        debug!(url = %url, filter = %request.filter, page_token = ?page_token, "GET request");

        let mut query = vec![("filter", request.filter.as_str())];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .query(&query)
            .send()
            .await?;

        handle_response(response).await
    }
}

#[async_trait]
impl InstanceSource for ComputeClient {
    async fn list_instances(&self, request: &ListInstancesRequest) -> Result<Vec<Instance>> {
        let access_token = self.tokens.access_token().await?;
        let mut instances = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .list_page(request, page_token.as_deref(), &access_token)
                .await?;
            debug!(count = page.items.len(), "Received instance page");
            instances.extend(page.items.into_iter().map(Instance::from));

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::StaticTokenProvider;
    use crate::utils::error::ReportError;
    use httpmock::prelude::*;

    const INSTANCES_PATH: &str = "/compute/v1/projects/test-project/zones/us-central1-a/instances";

    fn client_for(server: &MockServer) -> ComputeClient {
        ComputeClient::new(
            Client::new(),
            server.base_url(),
            Arc::new(StaticTokenProvider::new("test-token")),
        )
    }

    #[tokio::test]
    async fn test_list_sends_running_filter_and_token() {
        let server = MockServer::start();
        let list_mock = server.mock(|when, then| {
            when.method(GET)
                .path(INSTANCES_PATH)
                .query_param("filter", "status=RUNNING")
                .header("Authorization", "Bearer test-token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "kind": "compute#instanceList",
                    "items": [
                        {"id": "1", "name": "web-1", "status": "RUNNING"},
                        {"id": "2", "name": "web-2", "status": "RUNNING"}
                    ]
                }));
        });

        let request = ListInstancesRequest::running("test-project", "us-central1-a");
        let instances = client_for(&server).list_instances(&request).await.unwrap();

        list_mock.assert();
        assert_eq!(
            instances,
            vec![
                Instance::new("web-1", "RUNNING"),
                Instance::new("web-2", "RUNNING")
            ]
        );
    }

    #[tokio::test]
    async fn test_list_empty_zone() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(INSTANCES_PATH);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"kind": "compute#instanceList"}));
        });

        let request = ListInstancesRequest::running("test-project", "us-central1-a");
        let instances = client_for(&server).list_instances(&request).await.unwrap();

        assert!(instances.is_empty());
    }

    #[tokio::test]
    async fn test_list_follows_page_tokens_in_order() {
        let server = MockServer::start();
        let first_page = server.mock(|when, then| {
            when.method(GET)
                .path(INSTANCES_PATH)
                .query_param("filter", "status=RUNNING")
                .matches(|req| {
                    !req.query_params
                        .as_ref()
                        .is_some_and(|params| params.iter().any(|(key, _)| key == "pageToken"))
                });
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "items": [{"name": "vm-a", "status": "RUNNING"}],
                    "nextPageToken": "page-2"
                }));
        });
        let second_page = server.mock(|when, then| {
            when.method(GET)
                .path(INSTANCES_PATH)
                .query_param("filter", "status=RUNNING")
                .query_param("pageToken", "page-2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "items": [
                        {"name": "vm-b", "status": "RUNNING"},
                        {"name": "vm-c", "status": "RUNNING"}
                    ]
                }));
        });

        let request = ListInstancesRequest::running("test-project", "us-central1-a");
        let instances = client_for(&server).list_instances(&request).await.unwrap();

        first_page.assert();
        second_page.assert();
        let names: Vec<&str> = instances.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["vm-a", "vm-b", "vm-c"]);
    }

    #[tokio::test]
    async fn test_list_propagates_api_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(INSTANCES_PATH);
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "error": {"code": 404, "message": "The resource 'projects/test-project' was not found"}
                }));
        });

        let request = ListInstancesRequest::running("test-project", "us-central1-a");
        let err = client_for(&server).list_instances(&request).await.unwrap_err();

        match err {
            ReportError::GcpApiError { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("was not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
