use crate::domain::model::CsvMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ClaimsError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Client settings. Every section and field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub user: UserConfig,
    pub export: ExportConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: String,
    pub version: String,
    /// Logs the startup banner.
    pub robustness: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "burger".to_string(),
            version: "1.0.0".to_string(),
            robustness: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub id: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub filename: String,
    pub csv_mode: CsvMode,
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "claims_export.csv".to_string(),
            csv_mode: CsvMode::default(),
            output_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub toast_duration_ms: u64,
    pub reload_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            reload_delay_ms: 1000,
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClaimsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClaimsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("server.base_url", &self.server.base_url)?;
        if let Some(timeout) = self.server.request_timeout_seconds {
            validate_positive_number("server.request_timeout_seconds", timeout, 1)?;
        }
        validate_non_empty_string("user.id", &self.user.id)?;
        validate_non_empty_string("export.filename", &self.export.filename)?;
        validate_path("export.output_dir", &self.export.output_dir)?;
        validate_positive_number("ui.toast_duration_ms", self.ui.toast_duration_ms, 1)?;
        validate_positive_number("ui.reload_delay_ms", self.ui.reload_delay_ms, 1)?;
        Ok(())
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.server.base_url
    }

    fn user_id(&self) -> &str {
        &self.user.id
    }

    fn export_filename(&self) -> &str {
        &self.export.filename
    }

    fn csv_mode(&self) -> CsvMode {
        self.export.csv_mode
    }

    fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.ui.toast_duration_ms)
    }

    fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.ui.reload_delay_ms)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.server.request_timeout_seconds.map(Duration::from_secs)
    }
}
