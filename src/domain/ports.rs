use crate::domain::model::{Instance, ListInstancesRequest, Report};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Makes the destination usable before the first write.
    fn prepare(&self) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn project_id(&self) -> &str;
    fn zone(&self) -> &str;
}

#[async_trait]
pub trait InstanceSource: Send + Sync {
    async fn list_instances(&self, request: &ListInstancesRequest) -> Result<Vec<Instance>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Instance>>;
    async fn transform(&self, data: Vec<Instance>) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<String>;
}
