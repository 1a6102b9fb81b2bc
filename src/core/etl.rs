use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs list -> format -> upload once and returns where the report landed.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting instance report");
        self.monitor.log_stats("Start");

        // Extract
        let instances = self.pipeline.extract().await?;
        tracing::info!("Listed {} running instances", instances.len());
        self.monitor.log_stats("Extract");

        // Transform
        let report = self.pipeline.transform(instances).await?;
        tracing::info!(
            "Formatted {} rows into {}",
            report.instances.len(),
            report.object_name
        );
        self.monitor.log_stats("Transform");

        // Load
        let location = self.pipeline.load(report).await?;
        tracing::info!("Report saved to: {}", location);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(location)
    }
}
