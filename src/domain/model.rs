use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the claims listing. Field order is the order the server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(data: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { data }
    }
}

pub type Table = Vec<Record>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Flag,
    Note,
}

impl MutationKind {
    /// Path segment under `/claim/{id}/`.
    pub fn action(&self) -> &'static str {
        match self {
            MutationKind::Flag => "flag",
            MutationKind::Note => "note",
        }
    }

    /// Body field carrying the user's text.
    pub fn text_field(&self) -> &'static str {
        match self {
            MutationKind::Flag => "reason",
            MutationKind::Note => "content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub target_id: String,
    pub kind: MutationKind,
    pub text: String,
    pub user_id: String,
}

impl MutationRequest {
    /// Display form of the target path. The id is not escaped here, so use
    /// `path_segments` when building a request URL.
    pub fn endpoint(&self) -> String {
        format!("/claim/{}/{}", self.target_id, self.kind.action())
    }

    pub fn path_segments(&self) -> [&str; 3] {
        ["claim", &self.target_id, self.kind.action()]
    }

    pub fn payload(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(
            self.kind.text_field().to_string(),
            serde_json::Value::String(self.text.clone()),
        );
        body.insert(
            "user_id".to_string(),
            serde_json::Value::String(self.user_id.clone()),
        );
        serde_json::Value::Object(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    #[serde(default, deserialize_with = "falsy_when_null")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn falsy_when_null<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Nothing was sent: the input was blank or the prompt was dismissed.
    Skipped,
    Applied,
    Rejected { detail: Option<String> },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// How values are written into the exported CSV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvMode {
    /// Every value wrapped in quotes with embedded quotes doubled.
    #[default]
    Quoted,
    /// Values wrapped in quotes verbatim, nothing escaped.
    Legacy,
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub rows: usize,
    pub csv_output: String,
}
