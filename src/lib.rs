pub mod config;
pub mod core;
pub mod domain;
pub mod gcp;
#[cfg(feature = "function")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, CliSettings};
pub use config::{FunctionConfig, LocalStorage, ReportSettings};

pub use core::{etl::EtlEngine, pipeline::ReportPipeline};
pub use domain::model::{Instance, Report};
pub use gcp::{GcpClients, GcpEndpoints};
pub use utils::error::{ReportError, Result};
