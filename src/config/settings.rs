use crate::core::ConfigProvider;
use crate::gcp::GcpEndpoints;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_bucket_name, validate_project_id, validate_url, validate_zone, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
pub const ZONE_VAR: &str = "ZONE";
pub const REPORTS_BUCKET_VAR: &str = "REPORTS_BUCKET";
pub const ACCESS_TOKEN_VAR: &str = "GCP_ACCESS_TOKEN";
pub const COMPUTE_ENDPOINT_VAR: &str = "COMPUTE_ENDPOINT";
pub const STORAGE_ENDPOINT_VAR: &str = "STORAGE_ENDPOINT";
pub const METADATA_ENDPOINT_VAR: &str = "METADATA_ENDPOINT";

/// Everything one report run needs to know.
#[derive(Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    pub project_id: String,
    pub zone: String,
    pub reports_bucket: String,
    #[serde(default)]
    pub endpoints: GcpEndpoints,
    #[serde(skip_serializing, default)]
    pub access_token: Option<String>,
}

impl fmt::Debug for ReportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportSettings")
            .field("project_id", &self.project_id)
            .field("zone", &self.zone)
            .field("reports_bucket", &self.reports_bucket)
            .field("endpoints", &self.endpoints)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ReportSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup` so callers (and tests) decide where values come from.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ReportError::MissingConfigError {
                    field: key.to_string(),
                })
        };

        Ok(Self {
            project_id: require(PROJECT_ID_VAR)?,
            zone: require(ZONE_VAR)?,
            reports_bucket: require(REPORTS_BUCKET_VAR)?,
            endpoints: endpoints_from_lookup(GcpEndpoints::default(), &lookup),
            access_token: lookup(ACCESS_TOKEN_VAR).filter(|token| !token.is_empty()),
        })
    }
}

/// Applies `*_ENDPOINT` overrides on top of `base`.
pub fn endpoints_from_lookup<F>(base: GcpEndpoints, lookup: &F) -> GcpEndpoints
where
    F: Fn(&str) -> Option<String>,
{
    GcpEndpoints {
        compute: lookup(COMPUTE_ENDPOINT_VAR).unwrap_or(base.compute),
        storage: lookup(STORAGE_ENDPOINT_VAR).unwrap_or(base.storage),
        metadata: lookup(METADATA_ENDPOINT_VAR).unwrap_or(base.metadata),
    }
}

impl ConfigProvider for ReportSettings {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn zone(&self) -> &str {
        &self.zone
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        validate_project_id(PROJECT_ID_VAR, &self.project_id)?;
        validate_zone(ZONE_VAR, &self.zone)?;
        validate_bucket_name(REPORTS_BUCKET_VAR, &self.reports_bucket)?;

        validate_url(COMPUTE_ENDPOINT_VAR, &self.endpoints.compute)?;
        validate_url(STORAGE_ENDPOINT_VAR, &self.endpoints.storage)?;
        validate_url(METADATA_ENDPOINT_VAR, &self.endpoints.metadata)?;

        tracing::debug!("✅ Report configuration validation passed");
        Ok(())
    }
}
