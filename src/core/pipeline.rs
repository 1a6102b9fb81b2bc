use crate::core::{
    ConfigProvider, Instance, InstanceSource, ListInstancesRequest, Pipeline, Report, Storage,
};
use crate::utils::error::{ReportError, Result};
use chrono::{DateTime, Utc};

pub const CSV_HEADER: [&str; 2] = ["name", "status"];

/// `2024-05-01T13:45:10.csv`
pub fn report_object_name(at: DateTime<Utc>) -> String {
    format!("{}.csv", at.format("%Y-%m-%dT%H:%M:%S"))
}

/// Header line first, then one line per instance, joined by `\n` without a trailing newline.
pub fn render_csv(instances: &[Instance]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for instance in instances {
        writer.serialize(instance)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e),
        })?;
    let mut csv_output = String::from_utf8(bytes).map_err(|e| ReportError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })?;

    if csv_output.ends_with('\n') {
        csv_output.pop();
    }
    Ok(csv_output)
}

pub struct ReportPipeline<S: Storage, I: InstanceSource, C: ConfigProvider> {
    storage: S,
    source: I,
    config: C,
}

impl<S: Storage, I: InstanceSource, C: ConfigProvider> ReportPipeline<S, I, C> {
    pub fn new(storage: S, source: I, config: C) -> Self {
        Self {
            storage,
            source,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, I: InstanceSource, C: ConfigProvider> Pipeline for ReportPipeline<S, I, C> {
    async fn extract(&self) -> Result<Vec<Instance>> {
        let request = ListInstancesRequest::running(self.config.project_id(), self.config.zone());

        tracing::debug!(
            "Listing instances in {}/{} with filter {}",
            request.project,
            request.zone,
            request.filter
        );
        self.source.list_instances(&request).await
    }

    async fn transform(&self, data: Vec<Instance>) -> Result<Report> {
        let csv_output = render_csv(&data)?;
        let object_name = report_object_name(Utc::now());

        Ok(Report {
            instances: data,
            csv_output,
            object_name,
        })
    }

    async fn load(&self, report: Report) -> Result<String> {
        self.storage.prepare().await?;

        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            report.object_name,
            report.csv_output.len()
        );
        self.storage
            .write_file(&report.object_name, report.csv_output.as_bytes())
            .await?;

        Ok(self.storage.location(&report.object_name))
    }
}
