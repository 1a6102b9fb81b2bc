//! GCP API request and response models.

use serde::{Deserialize, Serialize};

use crate::domain::model::Instance;

// ============================================================================
// Compute Engine
// ============================================================================

/// One page of `instances.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceListResponse {
    /// Instances on this page. Omitted by the API when the page is empty.
    #[serde(default)]
    pub items: Vec<GceInstance>,
    /// Present while more pages remain.
    pub next_page_token: Option<String>,
}

/// The subset of a Compute Engine instance the report reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GceInstance {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

impl From<GceInstance> for Instance {
    fn from(instance: GceInstance) -> Self {
        Instance::new(instance.name, instance.status)
    }
}

// ============================================================================
// Cloud Storage
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateBucketRequest<'a> {
    pub name: &'a str,
}

/// Object resource returned by a media upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsObject {
    pub name: String,
    pub bucket: String,
    /// The JSON API encodes sizes as strings.
    pub size: Option<String>,
}

// ============================================================================
// Metadata server / errors
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: GoogleError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_list_without_items() {
        let page: InstanceListResponse =
            serde_json::from_str(r#"{"kind": "compute#instanceList", "id": "projects/p/zones/z/instances"}"#)
                .unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_instance_missing_status_becomes_empty() {
        let instance: GceInstance = serde_json::from_str(r#"{"name": "vm-1"}"#).unwrap();
        let instance = Instance::from(instance);
        assert_eq!(instance, Instance::new("vm-1", ""));
    }
}
