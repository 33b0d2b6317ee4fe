use std::path::PathBuf;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum FigtokError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Page {page} not found")]
    PageNotFound { page: String },

    #[error("Malformed snapshot {}: {source}", path.display())]
    MalformedSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Prompt cancelled")]
    PromptCancelled,

    #[error("Node '{node}' is missing {attribute}")]
    Shape { node: String, attribute: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FigtokError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        FigtokError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn shape(node: impl Into<String>, attribute: &'static str) -> Self {
        FigtokError::Shape {
            node: node.into(),
            attribute,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            FigtokError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            FigtokError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            FigtokError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify FIGMA_API_BASE (e.g., https://api.figma.com/v1).",
            ),
            FigtokError::FigmaApi { status, message } => ErrorPayload::new(
                ErrorCategory::Figma,
                format!("Figma API error (status {:?}): {}", status, message),
                "Check the token and file id; generate a personal token at https://www.figma.com/developers/api#access-tokens.",
            ),
            FigtokError::PageNotFound { page } => ErrorPayload::new(
                ErrorCategory::Config,
                format!("Page {} not found", page),
                "Check the page name (--page or \"page\" in the config file).",
            ),
            FigtokError::MalformedSnapshot { path, source } => ErrorPayload::new(
                ErrorCategory::Snapshot,
                format!("Malformed snapshot {}: {}", path.display(), source),
                "Fix or delete the snapshot file; it is rewritten on the next successful run.",
            ),
            FigtokError::PromptCancelled => ErrorPayload::new(
                ErrorCategory::Prompt,
                "Prompt cancelled; no files were written".to_string(),
                "Re-run and answer the prompts, or pass --no-input.",
            ),
            FigtokError::Shape { node, attribute } => ErrorPayload::new(
                ErrorCategory::Design,
                format!("Node '{}' is missing {}", node, attribute),
                "Fix the node in Figma or rename it so it no longer matches a token prefix.",
            ),
            FigtokError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check JSON inputs; run with --verbose for details.",
            ),
            FigtokError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check flags, the config file and FIGMA_TOKEN.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, FigtokError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Figma,
    Snapshot,
    Prompt,
    Design,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
