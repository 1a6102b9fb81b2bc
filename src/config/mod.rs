pub mod cli;
pub mod function;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, CliSettings};
pub use cli::LocalStorage;
pub use function::FunctionConfig;
pub use settings::ReportSettings;
pub use toml_config::ReportFileConfig;
