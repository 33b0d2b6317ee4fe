//! End-to-end token generation: fetch → classify → build → merge → write.
//!
//! Nothing touches the filesystem until the merged token list is final, so a
//! failed fetch or a cancelled prompt leaves previous outputs untouched.

use std::sync::Arc;

use tracing::info;

use crate::classify::PrefixTable;
use crate::config::Config;
use crate::emit::{write_outputs, RenderOptions, WrittenFiles};
use crate::error::{FigtokError, Result};
use crate::figma_client::{FileQuery, TreeSource};
use crate::prompt::Prompter;
use crate::snapshot::{load_snapshot, merge, snapshot_path, OrphanPolicy};
use crate::tokens::build_tokens;
use crate::types::{DesignNode, Token};

/// Progress sink for operator-facing status lines.
pub type ProgressFn = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub file_name: String,
    pub page: String,
    pub written: WrittenFiles,
    pub live_count: usize,
    /// Names carried over from the snapshot with `deleted: true`.
    pub deprecated: Vec<String>,
}

fn report(progress: &Option<ProgressFn>, message: &str) {
    if let Some(progress) = progress {
        progress(message);
    }
}

/// Fetch the token page's children using the two-step lookup: list pages
/// at depth 1, then fetch only the named page at depth 2.
pub async fn fetch_page_nodes(
    source: &TreeSource,
    config: &Config,
    progress: &Option<ProgressFn>,
) -> Result<(String, Vec<DesignNode>)> {
    report(progress, "Fetching Figma file pages…");
    let pages = source.get_file(&config.file, &FileQuery::pages()).await?;
    let page_id = pages
        .document
        .child_named(&config.page)
        .map(|p| p.id.clone())
        .ok_or_else(|| FigtokError::PageNotFound {
            page: config.page.clone(),
        })?;

    report(progress, "Fetching Figma file tokens…");
    let file = source
        .get_file(&config.file, &FileQuery::page_children(&page_id))
        .await?;
    let page = file
        .document
        .into_child_with_id(&page_id)
        .ok_or_else(|| FigtokError::PageNotFound {
            page: config.page.clone(),
        })?;
    info!(page = %page.name, children = page.children.len(), "fetched token page");
    Ok((file.name, page.children))
}

/// Build the live token set and merge in the previous snapshot.
pub fn plan_tokens(
    nodes: &[DesignNode],
    config: &Config,
    prompter: Option<&mut dyn Prompter>,
) -> Result<Vec<Token>> {
    let table = PrefixTable::new(&config.prefixes, config.name_separator);
    let live = build_tokens(nodes, &table, config.font_mode)?;
    let previous = load_snapshot(&snapshot_path(&config.tokens_file_path))?;
    let policy = match prompter {
        Some(prompter) if config.confirm_deletions => OrphanPolicy::Confirm(prompter),
        _ => OrphanPolicy::KeepAll,
    };
    merge(live, previous, policy)
}

pub async fn generate(
    source: &TreeSource,
    config: &Config,
    progress: Option<ProgressFn>,
    prompter: Option<&mut dyn Prompter>,
) -> Result<GenerateOutcome> {
    let (file_name, nodes) = fetch_page_nodes(source, config, &progress).await?;

    report(&progress, "Building tokens…");
    let tokens = plan_tokens(&nodes, config, prompter)?;
    let deprecated: Vec<String> = tokens
        .iter()
        .filter(|t| t.deleted)
        .map(|t| t.name.clone())
        .collect();
    let live_count = tokens.len() - deprecated.len();

    report(&progress, "Writing tokens…");
    let written = write_outputs(
        &config.tokens_file_path,
        &tokens,
        RenderOptions {
            emit_defaults: config.emit_defaults,
        },
    )?;
    info!(
        live = live_count,
        deprecated = deprecated.len(),
        path = %written.stylesheet.display(),
        "tokens written"
    );

    Ok(GenerateOutcome {
        file_name,
        page: config.page.clone(),
        written,
        live_count,
        deprecated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::TerminalPrompter;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const FIXTURE: &str = r#"{
      "name": "Design System",
      "document": {
        "id": "0:0", "name": "Document", "type": "DOCUMENT",
        "children": [
          {"id": "0:1", "name": "Cover", "type": "CANVAS"},
          {"id": "0:2", "name": "Tokens", "type": "CANVAS", "children": [
            {"id": "1:1", "name": "Color / Primary", "type": "RECTANGLE",
             "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0, "a": 1}}]},
            {"id": "1:2", "name": "Spacing / M", "type": "RECTANGLE",
             "absoluteBoundingBox": {"x": 0, "y": 0, "width": 16, "height": 16}},
            {"id": "1:3", "name": "Notes", "type": "TEXT"}
          ]}
        ]
      }
    }"#;

    fn setup(dir: &Path) -> (TreeSource, Config) {
        let fixture = dir.join("file.json");
        std::fs::write(&fixture, FIXTURE).unwrap();
        let config = Config {
            token: "t".into(),
            file: "key".into(),
            page: "Tokens".into(),
            tokens_file_path: dir.join("styles").join("_tokens.scss"),
            ..Config::default()
        };
        (TreeSource::Fixture(fixture), config)
    }

    #[tokio::test]
    async fn generate_writes_stylesheet_and_snapshot() {
        let dir = TempDir::new().expect("tempdir");
        let (source, config) = setup(dir.path());
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = messages.clone();
        let progress: ProgressFn = Arc::new(move |m: &str| sink.lock().unwrap().push(m.to_string()));

        let outcome = generate(&source, &config, Some(progress), None).await.unwrap();
        assert_eq!(outcome.file_name, "Design System");
        assert_eq!(outcome.live_count, 2);
        assert!(outcome.deprecated.is_empty());

        let scss = std::fs::read_to_string(&config.tokens_file_path).unwrap();
        assert_eq!(scss, "$color-primary: #ff0000;\n\n$spacing-m: 16px;\n");
        assert!(outcome.written.snapshot.exists());
        assert_eq!(messages.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn removed_tokens_are_carried_as_deprecated() {
        let dir = TempDir::new().expect("tempdir");
        let (source, config) = setup(dir.path());
        std::fs::create_dir_all(dir.path().join("styles")).unwrap();
        std::fs::write(
            snapshot_path(&config.tokens_file_path),
            r##"[{"ordering": 1, "type": "variable", "name": "color-legacy", "value": "#000000"}]"##,
        )
        .unwrap();

        let outcome = generate(&source, &config, None, None).await.unwrap();
        assert_eq!(outcome.deprecated, vec!["color-legacy".to_string()]);
        let scss = std::fs::read_to_string(&config.tokens_file_path).unwrap();
        assert!(scss.ends_with("/** @deprecated */\n$color-legacy: #000000;\n"));
    }

    #[tokio::test]
    async fn missing_page_writes_nothing() {
        let dir = TempDir::new().expect("tempdir");
        let (source, mut config) = setup(dir.path());
        config.page = "Nope".into();
        let err = generate(&source, &config, None, None).await.unwrap_err();
        assert!(matches!(err, FigtokError::PageNotFound { ref page } if page == "Nope"));
        assert!(!config.tokens_file_path.exists());
    }

    #[tokio::test]
    async fn malformed_snapshot_aborts_without_overwriting() {
        let dir = TempDir::new().expect("tempdir");
        let (source, config) = setup(dir.path());
        std::fs::create_dir_all(dir.path().join("styles")).unwrap();
        let snapshot = snapshot_path(&config.tokens_file_path);
        std::fs::write(&snapshot, "{oops").unwrap();

        let err = generate(&source, &config, None, None).await.unwrap_err();
        assert!(matches!(err, FigtokError::MalformedSnapshot { .. }));
        assert_eq!(std::fs::read_to_string(&snapshot).unwrap(), "{oops");
        assert!(!config.tokens_file_path.exists());
    }

    #[tokio::test]
    async fn cancelled_confirmation_writes_nothing() {
        let dir = TempDir::new().expect("tempdir");
        let (source, mut config) = setup(dir.path());
        config.confirm_deletions = true;
        std::fs::create_dir_all(dir.path().join("styles")).unwrap();
        std::fs::write(
            snapshot_path(&config.tokens_file_path),
            r##"[{"ordering": 1, "type": "variable", "name": "color-legacy", "value": "#000000"}]"##,
        )
        .unwrap();

        let mut prompter = TerminalPrompter::new(Cursor::new(Vec::new()), Vec::new());
        let err = generate(&source, &config, None, Some(&mut prompter))
            .await
            .unwrap_err();
        assert!(matches!(err, FigtokError::PromptCancelled));
        assert!(!config.tokens_file_path.exists());
    }

    #[tokio::test]
    async fn declined_orphans_are_dropped() {
        let dir = TempDir::new().expect("tempdir");
        let (source, mut config) = setup(dir.path());
        config.confirm_deletions = true;
        std::fs::create_dir_all(dir.path().join("styles")).unwrap();
        std::fs::write(
            snapshot_path(&config.tokens_file_path),
            r##"[{"ordering": 1, "type": "variable", "name": "color-legacy", "value": "#000000"}]"##,
        )
        .unwrap();

        let mut prompter = TerminalPrompter::new(Cursor::new(b"n\n".to_vec()), Vec::new());
        let outcome = generate(&source, &config, None, Some(&mut prompter))
            .await
            .unwrap();
        assert!(outcome.deprecated.is_empty());
        let scss = std::fs::read_to_string(&config.tokens_file_path).unwrap();
        assert!(!scss.contains("color-legacy"));
    }
}
