use crate::domain::model::Download;
use crate::domain::ports::DownloadSink;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Saves downloads into a local directory under their own filename.
#[derive(Debug, Clone)]
pub struct LocalDownloads {
    base_path: PathBuf,
}

impl LocalDownloads {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl DownloadSink for LocalDownloads {
    async fn deliver(&self, download: &Download) -> Result<String> {
        let full_path = self.base_path.join(&download.filename);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // The file handle is closed before this returns.
        fs::write(&full_path, &download.body)?;

        tracing::debug!(
            content_type = %download.content_type,
            "wrote {} bytes to {}",
            download.body.len(),
            full_path.display()
        );
        Ok(full_path.display().to_string())
    }
}
