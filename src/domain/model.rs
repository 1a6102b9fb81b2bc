use serde::{Deserialize, Serialize};

/// Compute Engine filter expression that keeps only running instances.
pub const RUNNING_FILTER: &str = "status=RUNNING";

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub status: String,
}

impl Instance {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInstancesRequest {
    pub project: String,
    pub zone: String,
    pub filter: String,
}

impl ListInstancesRequest {
    pub fn running(project: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            zone: zone.into(),
            filter: RUNNING_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub instances: Vec<Instance>,
    pub csv_output: String,
    pub object_name: String,
}
