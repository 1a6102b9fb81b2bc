pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{Instance, ListInstancesRequest, Report};
pub use crate::domain::ports::{ConfigProvider, InstanceSource, Pipeline, Storage};
pub use crate::utils::error::Result;
