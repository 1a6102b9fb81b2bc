use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

#[cfg(feature = "cli")]
pub use self::args::{CliConfig, CliSettings};

/// Writes reports into a local directory instead of a bucket.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}

#[cfg(feature = "cli")]
mod args {
    use crate::config::settings::{
        endpoints_from_lookup, ReportSettings, PROJECT_ID_VAR, REPORTS_BUCKET_VAR, ZONE_VAR,
    };
    use crate::config::toml_config::ReportFileConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, validate_required_field, Validate};
    use clap::Parser;
    use std::fmt;

    #[derive(Clone, Parser)]
    #[command(name = "instance-report")]
    #[command(about = "Write a CSV report of the running Compute Engine instances in a zone")]
    pub struct CliConfig {
        #[arg(long, env = "PROJECT_ID")]
        pub project_id: Option<String>,

        #[arg(long, env = "ZONE")]
        pub zone: Option<String>,

        #[arg(long, env = "REPORTS_BUCKET")]
        pub reports_bucket: Option<String>,

        #[arg(short, long, help = "Path to a TOML settings file")]
        pub config: Option<String>,

        #[arg(long, help = "Write the report into this directory instead of the bucket")]
        pub output_path: Option<String>,

        #[arg(long, env = "GCP_ACCESS_TOKEN", hide_env_values = true)]
        pub access_token: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log process CPU and memory after each phase")]
        pub monitor: bool,
    }

    impl fmt::Debug for CliConfig {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("CliConfig")
                .field("project_id", &self.project_id)
                .field("zone", &self.zone)
                .field("reports_bucket", &self.reports_bucket)
                .field("config", &self.config)
                .field("output_path", &self.output_path)
                .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
                .field("verbose", &self.verbose)
                .field("monitor", &self.monitor)
                .finish()
        }
    }

    /// CLI arguments merged with the optional settings file.
    #[derive(Debug, Clone)]
    pub struct CliSettings {
        pub settings: ReportSettings,
        pub output_path: Option<String>,
    }

    impl CliConfig {
        pub fn resolve(&self) -> Result<CliSettings> {
            let file = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path);
                    ReportFileConfig::from_file(path)?
                }
                None => ReportFileConfig::default(),
            };
            self.merge(file)
        }

        pub fn merge(&self, file: ReportFileConfig) -> Result<CliSettings> {
            let project_id = self.project_id.clone().or(file.project_id);
            let zone = self.zone.clone().or(file.zone);
            let reports_bucket = self.reports_bucket.clone().or(file.reports_bucket);
            let env_lookup = |key: &str| std::env::var(key).ok();

            Ok(CliSettings {
                settings: ReportSettings {
                    project_id: validate_required_field(PROJECT_ID_VAR, &project_id)?.clone(),
                    zone: validate_required_field(ZONE_VAR, &zone)?.clone(),
                    reports_bucket: validate_required_field(REPORTS_BUCKET_VAR, &reports_bucket)?
                        .clone(),
                    endpoints: endpoints_from_lookup(file.endpoints.unwrap_or_default(), &env_lookup),
                    access_token: self.access_token.clone(),
                },
                output_path: self.output_path.clone().or(file.output_path),
            })
        }
    }

    impl Validate for CliSettings {
        fn validate(&self) -> Result<()> {
            self.settings.validate()?;
            if let Some(path) = &self.output_path {
                validate_path("output_path", path)?;
            }
            tracing::info!("✅ CLI configuration validation passed");
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::utils::error::ReportError;

        fn args(extra: &[&str]) -> CliConfig {
            let mut argv = vec!["instance-report"];
            argv.extend_from_slice(extra);
            CliConfig::try_parse_from(argv).unwrap()
        }

        #[test]
        fn test_flags_override_file() {
            let config = args(&[
                "--project-id",
                "flag-project-1",
                "--zone",
                "us-east1-b",
                "--reports-bucket",
                "flag-bucket",
            ]);
            let file = ReportFileConfig {
                project_id: Some("file-project-1".to_string()),
                zone: Some("europe-west4-c".to_string()),
                reports_bucket: None,
                output_path: Some("./reports".to_string()),
                endpoints: None,
            };

            let resolved = config.merge(file).unwrap();

            assert_eq!(resolved.settings.project_id, "flag-project-1");
            assert_eq!(resolved.settings.zone, "us-east1-b");
            assert_eq!(resolved.settings.reports_bucket, "flag-bucket");
            assert_eq!(resolved.output_path.as_deref(), Some("./reports"));
        }

        #[test]
        fn test_file_fills_missing_flags() {
            let config = args(&["--project-id", "flag-project-1", "--zone", "us-east1-b"]);
            let file = ReportFileConfig {
                reports_bucket: Some("file-bucket".to_string()),
                ..Default::default()
            };

            let resolved = config.merge(file).unwrap();

            assert_eq!(resolved.settings.reports_bucket, "file-bucket");
            assert!(resolved.output_path.is_none());
        }

        #[test]
        fn test_missing_required_setting() {
            // built directly so a $ZONE in the environment cannot fill the gap
            let config = CliConfig {
                project_id: Some("flag-project-1".to_string()),
                zone: None,
                reports_bucket: Some("b-1".to_string()),
                config: None,
                output_path: None,
                access_token: None,
                verbose: false,
                monitor: false,
            };

            let err = config.merge(ReportFileConfig::default()).unwrap_err();

            assert!(matches!(err, ReportError::MissingConfigError { ref field } if field == "ZONE"));
        }

        #[test]
        fn test_debug_redacts_access_token() {
            let config = args(&["--access-token", "ya29.SECRET", "--zone", "us-east1-b"]);

            let printed = format!("{:?}", config);

            assert!(!printed.contains("ya29.SECRET"), "{}", printed);
            assert!(printed.contains("<redacted>"));
            assert!(printed.contains("us-east1-b"));
        }
    }
}
