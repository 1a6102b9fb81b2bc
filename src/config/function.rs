use crate::config::settings::ReportSettings;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::Validate;
use std::env;

pub const PORT_VAR: &str = "PORT";
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration of the HTTP function process.
#[derive(Debug, Clone)]
pub struct FunctionConfig {
    pub settings: ReportSettings,
    pub port: u16,
}

impl FunctionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ReportError::InvalidConfigValueError {
                    field: PORT_VAR.to_string(),
                    value: value.clone(),
                    reason: "Port must be a number between 0 and 65535".to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            settings: ReportSettings::from_lookup(lookup)?,
            port,
        })
    }
}

impl Validate for FunctionConfig {
    fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        tracing::info!("✅ Function configuration validation passed");
        Ok(())
    }
}
