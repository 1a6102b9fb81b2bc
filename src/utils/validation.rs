use crate::utils::error::{ReportError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

// `us-central1-a`, and suffixes such as the AI zone `us-south1-ai1b`
static ZONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]+-[a-z]+[0-9]+-[a-z0-9]+$").expect("valid zone regex")
});

// Optional `<domain>:` prefix for domain-scoped projects, e.g. `example.com:my-project`
static PROJECT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9][a-z0-9.-]*[a-z0-9]:)?[a-z][a-z0-9-]{4,28}[a-z0-9]$")
        .expect("valid project id regex")
});

static BUCKET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9._-]{1,61}[a-z0-9]$").expect("valid bucket regex")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ReportError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Zones look like `<region>-<suffix>`, e.g. `us-central1-a`.
pub fn validate_zone(field_name: &str, zone: &str) -> Result<()> {
    validate_non_empty_string(field_name, zone)?;

    if !ZONE_PATTERN.is_match(zone) {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: zone.to_string(),
            reason: "Zone must look like <region>-<suffix>, e.g. us-central1-a".to_string(),
        });
    }
    Ok(())
}

pub fn validate_project_id(field_name: &str, project_id: &str) -> Result<()> {
    validate_non_empty_string(field_name, project_id)?;

    if !PROJECT_ID_PATTERN.is_match(project_id) {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: project_id.to_string(),
            reason: "Project ID must be 6-30 lowercase letters, digits or hyphens, \
                     start with a letter and not end with a hyphen, \
                     optionally prefixed by <domain>:"
                .to_string(),
        });
    }
    Ok(())
}

pub fn validate_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "Bucket name cannot be empty".to_string(),
        });
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "Bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !BUCKET_PATTERN.is_match(bucket_name) {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "Bucket name can only contain lowercase letters, numbers, dots, \
                     hyphens and underscores, and must start and end with a letter or number"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("compute_endpoint", "https://compute.googleapis.com").is_ok());
        assert!(validate_url("compute_endpoint", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("compute_endpoint", "").is_err());
        assert!(validate_url("compute_endpoint", "invalid-url").is_err());
        assert!(validate_url("compute_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_zone() {
        assert!(validate_zone("ZONE", "us-central1-a").is_ok());
        assert!(validate_zone("ZONE", "europe-west4-c").is_ok());
        assert!(validate_zone("ZONE", "us-south1-ai1b").is_ok());
        assert!(validate_zone("ZONE", "us-central1-").is_err());
        assert!(validate_zone("ZONE", "us-central1").is_err());
        assert!(validate_zone("ZONE", "US-CENTRAL1-A").is_err());
        assert!(validate_zone("ZONE", "  ").is_err());
    }

    #[test]
    fn test_validate_project_id() {
        assert!(validate_project_id("PROJECT_ID", "my-project-123").is_ok());
        assert!(validate_project_id("PROJECT_ID", "example.com:my-project").is_ok());
        assert!(validate_project_id("PROJECT_ID", ":my-project").is_err());
        assert!(validate_project_id("PROJECT_ID", "example.com:").is_err());
        assert!(validate_project_id("PROJECT_ID", "short").is_err());
        assert!(validate_project_id("PROJECT_ID", "1starts-with-digit").is_err());
        assert!(validate_project_id("PROJECT_ID", "ends-with-hyphen-").is_err());
    }

    #[test]
    fn test_validate_bucket_name() {
        assert!(validate_bucket_name("REPORTS_BUCKET", "instance-reports").is_ok());
        assert!(validate_bucket_name("REPORTS_BUCKET", "reports_2024.archive").is_ok());
        assert!(validate_bucket_name("REPORTS_BUCKET", "ab").is_err());
        assert!(validate_bucket_name("REPORTS_BUCKET", "Reports").is_err());
        assert!(validate_bucket_name("REPORTS_BUCKET", "-reports").is_err());
        assert!(validate_bucket_name("REPORTS_BUCKET", "").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("value".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("ZONE", &present).unwrap(), "value");
        assert!(matches!(
            validate_required_field("ZONE", &missing),
            Err(ReportError::MissingConfigError { .. })
        ));
    }
}
