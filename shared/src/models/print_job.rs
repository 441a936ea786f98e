//! Print Job Model

use serde::{Deserialize, Serialize};

/// Physical label size preset (millimeter width x height)
///
/// The preset set is closed: requests outside it are rejected at the API
/// boundary, and the print worker falls back to [`LabelSize::default`] for an
/// unrecognized stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelSize {
    #[serde(rename = "50x30")]
    Mm50x30,
    #[serde(rename = "40x30")]
    Mm40x30,
    #[serde(rename = "62x30")]
    Mm62x30,
}

impl LabelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSize::Mm50x30 => "50x30",
            LabelSize::Mm40x30 => "40x30",
            LabelSize::Mm62x30 => "62x30",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "50x30" => Some(LabelSize::Mm50x30),
            "40x30" => Some(LabelSize::Mm40x30),
            "62x30" => Some(LabelSize::Mm62x30),
            _ => None,
        }
    }

    /// Millimeter (width, height) of the preset
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            LabelSize::Mm50x30 => (50, 30),
            LabelSize::Mm40x30 => (40, 30),
            LabelSize::Mm62x30 => (62, 30),
        }
    }
}

impl Default for LabelSize {
    fn default() -> Self {
        LabelSize::Mm50x30
    }
}

impl std::fmt::Display for LabelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution status of a print job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintJobStatus {
    Queued,
    Completed,
    Failed,
}

impl PrintJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintJobStatus::Queued => "queued",
            PrintJobStatus::Completed => "completed",
            PrintJobStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(PrintJobStatus::Queued),
            "completed" => Some(PrintJobStatus::Completed),
            "failed" => Some(PrintJobStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrintJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Print job record
///
/// Diagnostics fields (`command`, `exit_code`, `stdout`, `stderr`, `error`)
/// are captured verbatim for operational debugging, not for end-user display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: String,
    pub item_id: String,
    pub size: LabelSize,
    pub copies: u32,
    pub status: PrintJobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Print request payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrintRequest {
    /// One of the preset keys, defaults to `50x30`
    pub size: Option<String>,
    /// 1..=20, defaults to 1
    pub copies: Option<u32>,
}

/// Print submission response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintResponse {
    pub status: String,
    pub job_id: String,
}
