use crate::gcp::GcpEndpoints;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file for CLI runs. Command-line flags and environment variables win.
///
/// ```toml
/// project_id = "my-project-123"
/// zone = "us-central1-a"
/// reports_bucket = "instance-reports"
/// output_path = "./reports"
///
/// [endpoints]
/// storage = "http://127.0.0.1:4443"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportFileConfig {
    pub project_id: Option<String>,
    pub zone: Option<String>,
    pub reports_bucket: Option<String>,
    pub output_path: Option<String>,
    pub endpoints: Option<GcpEndpoints>,
}

impl ReportFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
