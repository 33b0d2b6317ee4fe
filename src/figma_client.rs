//! Figma REST API client.
//!
//! Only the `GET /files/:key` endpoint is needed. A saved response can stand
//! in for the network through [`TreeSource::Fixture`].

use std::path::PathBuf;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{FigtokError, Result};
use crate::types::DesignNode;

pub const FIGMA_API_BASE: &str = "https://api.figma.com/v1";
pub const API_BASE_ENV: &str = "FIGMA_API_BASE";
pub const MOCK_FILE_ENV: &str = "FIGTOK_MOCK_FILE";

#[derive(Debug, Clone)]
pub struct FigmaAuth {
    token: String,
}

impl FigmaAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Query parameters for `GET /files/:key`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileQuery {
    pub depth: Option<u32>,
    pub ids: Vec<String>,
}

impl FileQuery {
    pub fn pages() -> Self {
        Self {
            depth: Some(1),
            ids: Vec::new(),
        }
    }

    pub fn page_children(page_id: &str) -> Self {
        Self {
            depth: Some(2),
            ids: vec![page_id.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFileResponse {
    #[serde(default)]
    pub name: String,
    pub document: DesignNode,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    err: Option<String>,
    message: Option<String>,
}

pub struct FigmaApiClient {
    http: reqwest::Client,
    base: Url,
    auth: FigmaAuth,
}

impl FigmaApiClient {
    pub fn new(auth: FigmaAuth) -> Result<Self> {
        Self::with_base_url(auth, FIGMA_API_BASE)
    }

    pub fn with_base_url(auth: FigmaAuth, base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(FigtokError::Config(format!(
                "API base URL cannot be a base: {base}"
            )));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("figtok/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base, auth })
    }

    pub fn file_url(&self, file_key: &str, query: &FileQuery) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FigtokError::Config(format!("invalid API base URL: {}", self.base)))?
            .pop_if_empty()
            .push("files")
            .push(file_key);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(depth) = query.depth {
                pairs.append_pair("depth", &depth.to_string());
            }
            if !query.ids.is_empty() {
                pairs.append_pair("ids", &query.ids.join(","));
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    pub async fn get_file(&self, file_key: &str, query: &FileQuery) -> Result<FigmaFileResponse> {
        let url = self.file_url(file_key, query)?;
        debug!(%url, "GET file");
        let response = self
            .http
            .get(url)
            .header("X-Figma-Token", &self.auth.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FigtokError::figma_api(Some(status), error_message(status, &body)));
        }
        Ok(response.json::<FigmaFileResponse>().await?)
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.err.or(b.message))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

/// Where the document tree comes from.
pub enum TreeSource {
    Api(FigmaApiClient),
    /// A saved `GET /files/:key` response on disk.
    Fixture(PathBuf),
}

impl TreeSource {
    /// Fixture when `FIGTOK_MOCK_FILE` is set, otherwise the API (base URL
    /// overridable with `FIGMA_API_BASE`).
    pub fn from_env(auth: FigmaAuth) -> Result<Self> {
        if let Ok(path) = std::env::var(MOCK_FILE_ENV) {
            if !path.trim().is_empty() {
                return Ok(TreeSource::Fixture(PathBuf::from(path)));
            }
        }
        let client = match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.trim().is_empty() => FigmaApiClient::with_base_url(auth, &base)?,
            _ => FigmaApiClient::new(auth)?,
        };
        Ok(TreeSource::Api(client))
    }

    pub async fn get_file(&self, file_key: &str, query: &FileQuery) -> Result<FigmaFileResponse> {
        match self {
            TreeSource::Api(client) => client.get_file(file_key, query).await,
            TreeSource::Fixture(path) => {
                debug!(path = %path.display(), ?query, "reading fixture instead of API");
                let raw = tokio::fs::read_to_string(path).await?;
                Ok(serde_json::from_str(&raw)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn client(base: &str) -> FigmaApiClient {
        FigmaApiClient::with_base_url(FigmaAuth::new("t"), base).unwrap()
    }

    #[test]
    fn file_url_appends_path_and_query() {
        let c = client(FIGMA_API_BASE);
        let url = c.file_url("abc123", &FileQuery::pages()).unwrap();
        assert_eq!(url.as_str(), "https://api.figma.com/v1/files/abc123?depth=1");

        let url = c.file_url("abc123", &FileQuery::page_children("1:2")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.figma.com/v1/files/abc123?depth=2&ids=1%3A2"
        );

        let url = c.file_url("abc123", &FileQuery::default()).unwrap();
        assert_eq!(url.as_str(), "https://api.figma.com/v1/files/abc123");
    }

    #[test]
    fn file_url_tolerates_trailing_slash() {
        let c = client("http://localhost:8080/api/");
        let url = c.file_url("k", &FileQuery::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/files/k");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            FigmaApiClient::with_base_url(FigmaAuth::new("t"), "not a url"),
            Err(FigtokError::InvalidUrl(_))
        ));
        assert!(matches!(
            FigmaApiClient::with_base_url(FigmaAuth::new("t"), "mailto:me@example.com"),
            Err(FigtokError::Config(_))
        ));
    }

    #[test]
    fn error_message_prefers_api_body() {
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, r#"{"status":403,"err":"Invalid token"}"#),
            "Invalid token"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, "<html>"),
            "Not Found"
        );
    }

    #[tokio::test]
    async fn fixture_source_reads_saved_response() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("file.json");
        std::fs::write(
            &path,
            r#"{"name": "Design", "document": {"id": "0:0", "name": "Document", "type": "DOCUMENT",
                "children": [{"id": "0:1", "name": "Page 1", "type": "CANVAS"}]}}"#,
        )
        .unwrap();
        let source = TreeSource::Fixture(path);
        let file = source.get_file("ignored", &FileQuery::pages()).await.unwrap();
        assert_eq!(file.name, "Design");
        assert_eq!(file.document.children[0].name, "Page 1");
    }
}
