//! JSON output schemas printed by the binary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;
use crate::pipeline::GenerateOutcome;

pub const FIGTOK_OUTPUT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FigtokOutput {
    Generate(GenerateOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub version: String,
    pub file_name: String,
    pub page: String,
    pub stylesheet_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub token_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deprecated: Vec<String>,
}

impl From<GenerateOutcome> for GenerateOutput {
    fn from(outcome: GenerateOutcome) -> Self {
        Self {
            version: FIGTOK_OUTPUT_VERSION.to_string(),
            file_name: outcome.file_name,
            page: outcome.page,
            stylesheet_path: outcome.written.stylesheet,
            snapshot_path: outcome.written.snapshot,
            token_count: outcome.live_count,
            deprecated: outcome.deprecated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
