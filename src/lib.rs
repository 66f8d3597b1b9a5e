pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ClientConfig;

pub use crate::adapters::{
    http::HttpClaimsApi, input::CannedInput, input::StdinInput, notify::ConsoleNotifier,
    page::ScheduledReload, storage::LocalDownloads,
};
pub use crate::core::{
    export::{ExportEngine, ExportPipeline},
    mutation::ClaimMutations,
    search::SearchFilters,
    toast::ToastChannel,
};
pub use utils::error::{ClaimsError, Result};
