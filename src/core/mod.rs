pub mod csv_export;
pub mod export;
pub mod mutation;
pub mod search;
pub mod toast;
pub mod ui;

pub use crate::domain::model::{
    CsvMode, Download, ExportResult, MutationKind, MutationOutcome, MutationRequest,
    MutationResponse, Notification, Record, Severity, Table,
};
pub use crate::domain::ports::{
    ClaimsApi, ConfigProvider, DownloadSink, InputProvider, Notifier, PageController, Pipeline,
};
pub use crate::utils::error::Result;
