use crate::config::toml_config::ClientConfig;
use crate::domain::model::CsvMode;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "claims-client")]
#[command(about = "Flag, annotate and export claims from the claims-management service")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the claims service
    #[arg(long)]
    pub base_url: Option<String>,

    /// User id sent with flags and notes
    #[arg(long)]
    pub user_id: Option<String>,

    /// Directory the export is saved into
    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Download the claims listing as CSV
    Export {
        #[arg(long, value_enum)]
        csv_mode: Option<CsvModeArg>,

        /// Output filename
        #[arg(long)]
        filename: Option<String>,
    },
    /// Flag a claim for review; prompts for the reason when omitted
    Flag {
        claim_id: String,

        #[arg(long)]
        reason: Option<String>,
    },
    /// Add a note to a claim
    Note { claim_id: String, content: String },
    /// Print the listing location for a set of filters
    Search {
        #[arg(long, default_value = "")]
        query: String,

        #[arg(long, default_value = "")]
        status: String,

        #[arg(long, default_value = "")]
        insurer: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CsvModeArg {
    Quoted,
    Legacy,
}

impl From<CsvModeArg> for CsvMode {
    fn from(arg: CsvModeArg) -> Self {
        match arg {
            CsvModeArg::Quoted => CsvMode::Quoted,
            CsvModeArg::Legacy => CsvMode::Legacy,
        }
    }
}

impl CliConfig {
    /// File settings (or defaults) with command-line flags applied on top.
    pub fn resolve(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(user_id) = &self.user_id {
            config.user.id = user_id.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.export.output_dir = output_dir.clone();
        }
        if let Command::Export { csv_mode, filename } = &self.command {
            if let Some(mode) = csv_mode {
                config.export.csv_mode = (*mode).into();
            }
            if let Some(filename) = filename {
                config.export.filename = filename.clone();
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("claims.toml");
        std::fs::write(
            &path,
            r#"
[server]
base_url = "https://claims.example.com"

[user]
id = "auditor"
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "claims-client",
            "--config",
            path.to_str().unwrap(),
            "--user-id",
            "admin",
            "export",
            "--csv-mode",
            "legacy",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.base_url(), "https://claims.example.com");
        assert_eq!(config.user_id(), "admin");
        assert_eq!(config.csv_mode(), CsvMode::Legacy);
    }

    #[test]
    fn test_parse_note_subcommand() {
        let cli = CliConfig::parse_from(["claims-client", "note", "CLM-3", "called insurer"]);
        match &cli.command {
            Command::Note { claim_id, content } => {
                assert_eq!(claim_id, "CLM-3");
                assert_eq!(content, "called insurer");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.resolve().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = CliConfig::parse_from(["claims-client", "--config", "/nonexistent/claims.toml", "export"]);
        assert!(cli.resolve().is_err());
    }
}
