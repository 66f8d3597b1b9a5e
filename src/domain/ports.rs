use crate::domain::model::{
    CsvMode, Download, ExportResult, MutationRequest, MutationResponse, Severity, Table,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub trait DownloadSink: Send + Sync {
    /// Hands the file to its destination and returns where it ended up.
    fn deliver(
        &self,
        download: &Download,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn user_id(&self) -> &str;
    fn export_filename(&self) -> &str;
    fn csv_mode(&self) -> CsvMode;
    fn toast_duration(&self) -> Duration;
    fn reload_delay(&self) -> Duration;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait ClaimsApi: Send + Sync {
    async fn post_mutation(&self, request: &MutationRequest) -> Result<MutationResponse>;
    async fn fetch_claims(&self) -> Result<Table>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);

    fn info(&self, message: &str) {
        self.notify(message, Severity::Info);
    }
}

pub trait PageController: Send + Sync {
    fn schedule_reload(&self, delay: Duration);
    fn navigate(&self, location: &str);
}

pub trait InputProvider: Send + Sync {
    /// `None` means the user dismissed the prompt.
    fn get_user_input(&self, prompt: &str) -> Option<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Table>;
    async fn transform(&self, data: Table) -> Result<ExportResult>;
    async fn load(&self, result: ExportResult) -> Result<String>;
}

#[async_trait]
impl<T: ClaimsApi + ?Sized> ClaimsApi for Arc<T> {
    async fn post_mutation(&self, request: &MutationRequest) -> Result<MutationResponse> {
        (**self).post_mutation(request).await
    }

    async fn fetch_claims(&self) -> Result<Table> {
        (**self).fetch_claims().await
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity);
    }
}

impl<T: PageController + ?Sized> PageController for Arc<T> {
    fn schedule_reload(&self, delay: Duration) {
        (**self).schedule_reload(delay);
    }

    fn navigate(&self, location: &str) {
        (**self).navigate(location);
    }
}
