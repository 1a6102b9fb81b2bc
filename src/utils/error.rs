use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("GCP API error: {status} - {message}")]
    GcpApiError { status: u16, message: String },

    #[error("Authentication error: {message}")]
    AuthError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Authentication,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ApiError(_) | ReportError::GcpApiError { .. } => ErrorCategory::Network,
            ReportError::TomlError(_)
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::AuthError { .. } => ErrorCategory::Authentication,
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::ProcessingError { .. } => ErrorCategory::Data,
            ReportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 暫時性網路錯誤，重跑通常可以恢復
            ReportError::ApiError(_) => ErrorSeverity::Medium,
            ReportError::GcpApiError { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            ReportError::GcpApiError { .. } => ErrorSeverity::High,
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::ProcessingError { .. } => ErrorSeverity::High,
            ReportError::TomlError(_)
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::AuthError { .. }
            | ReportError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::ApiError(_) => {
                "Check network connectivity to the Google APIs and try again".to_string()
            }
            ReportError::GcpApiError { status: 404, .. } => {
                "Verify that PROJECT_ID and ZONE name an existing project and zone".to_string()
            }
            ReportError::GcpApiError { status, .. } if *status >= 500 || *status == 429 => {
                "The API is temporarily unavailable, invoke the function again later".to_string()
            }
            ReportError::GcpApiError { .. } => {
                "Inspect the API error message for the rejected request".to_string()
            }
            ReportError::AuthError { .. } => {
                "Make sure the runtime service account can list instances and write to the bucket"
                    .to_string()
            }
            ReportError::MissingConfigError { field } => {
                format!("Set the {} environment variable or pass it on the command line", field)
            }
            ReportError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of {}", field)
            }
            ReportError::TomlError(_) => {
                "Check the configuration file and environment variables".to_string()
            }
            ReportError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::ProcessingError { .. } => {
                "The API returned data that could not be processed, re-run with --verbose"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a Google Cloud API: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Authentication => format!("Not authorized: {}", self),
            ErrorCategory::Data => format!("Failed to build the report: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
