use crate::core::csv_export::to_csv;
use crate::domain::model::{CsvMode, Download, ExportResult, Severity, Table};
use crate::domain::ports::{ClaimsApi, DownloadSink, Notifier, Pipeline};
use crate::utils::error::Result;

pub const EXPORT_FILENAME: &str = "claims_export.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const EXPORT_FAILED_MESSAGE: &str = "Failed to export data. Please try again.";

/// Claims listing → CSV file.
pub struct ExportPipeline<A: ClaimsApi, S: DownloadSink> {
    api: A,
    sink: S,
    filename: String,
    mode: CsvMode,
}

impl<A: ClaimsApi, S: DownloadSink> ExportPipeline<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self {
            api,
            sink,
            filename: EXPORT_FILENAME.to_string(),
            mode: CsvMode::default(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_mode(mut self, mode: CsvMode) -> Self {
        self.mode = mode;
        self
    }
}

#[async_trait::async_trait]
impl<A: ClaimsApi, S: DownloadSink> Pipeline for ExportPipeline<A, S> {
    async fn extract(&self) -> Result<Table> {
        self.api.fetch_claims().await
    }

    async fn transform(&self, data: Table) -> Result<ExportResult> {
        let csv_output = to_csv(&data, self.mode)?;
        Ok(ExportResult {
            rows: data.len(),
            csv_output,
        })
    }

    async fn load(&self, result: ExportResult) -> Result<String> {
        let download = Download {
            filename: self.filename.clone(),
            content_type: CSV_CONTENT_TYPE.to_string(),
            body: result.csv_output.into_bytes(),
        };
        self.sink.deliver(&download).await
    }
}

/// Runs a pipeline to completion and turns any failure into a notification.
pub struct ExportEngine<P: Pipeline, N: Notifier> {
    pipeline: P,
    notifier: N,
}

impl<P: Pipeline, N: Notifier> ExportEngine<P, N> {
    pub fn new(pipeline: P, notifier: N) -> Self {
        Self { pipeline, notifier }
    }

    /// Returns where the file was delivered, or `None` after notifying the failure.
    pub async fn run(&self) -> Option<String> {
        match self.try_run().await {
            Ok(location) => Some(location),
            Err(e) => {
                tracing::error!(
                    category = ?e.category(),
                    "Error exporting data: {}",
                    e
                );
                self.notifier.notify(EXPORT_FAILED_MESSAGE, Severity::Error);
                None
            }
        }
    }

    async fn try_run(&self) -> Result<String> {
        tracing::debug!("Extracting claims...");
        let records = self.pipeline.extract().await?;
        tracing::debug!("Extracted {} records", records.len());

        let result = self.pipeline.transform(records).await?;
        tracing::debug!("Serialized {} rows", result.rows);

        let location = self.pipeline.load(result).await?;
        tracing::info!("Export saved to: {}", location);
        Ok(location)
    }
}
