//! Stylesheet rendering and output files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::snapshot::{render_snapshot, snapshot_path};
use crate::types::{Property, Token, TokenKind, TokenValue};

pub const DEPRECATED_COMMENT: &str = "/** @deprecated */";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Append `!default` to variable declarations.
    pub emit_defaults: bool,
}

/// Render the whole stylesheet: declarations separated by a blank line,
/// exactly one trailing newline.
pub fn render(tokens: &[Token], options: RenderOptions) -> String {
    let blocks: Vec<String> = tokens.iter().map(|t| render_token(t, options)).collect();
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

pub fn render_token(token: &Token, options: RenderOptions) -> String {
    let mut out = String::new();
    if token.deleted {
        out.push_str(DEPRECATED_COMMENT);
        out.push('\n');
    }
    match (&token.kind, &token.value) {
        (TokenKind::Mixin, TokenValue::Properties(props)) => {
            out.push_str(&render_mixin(&token.name, props));
        }
        (TokenKind::Mixin, value) => {
            // hand-edited snapshot
            out.push_str(&format!("@mixin {}() {{\n  {};\n}}", token.name, value));
        }
        (TokenKind::Variable, value) => {
            out.push_str(&render_variable(&token.name, value, options.emit_defaults));
        }
    }
    out
}

fn render_variable(name: &str, value: &TokenValue, emit_default: bool) -> String {
    if emit_default {
        format!("${name}: {value} !default;")
    } else {
        format!("${name}: {value};")
    }
}

fn render_mixin(name: &str, props: &[Property]) -> String {
    let mut out = format!("@mixin {name}() {{\n");
    for prop in props {
        if prop.name.starts_with('@') {
            out.push_str(&format!("  {} {};\n", prop.name, prop.value));
        } else {
            out.push_str(&format!("  {}: {};\n", prop.name, prop.value));
        }
    }
    out.push('}');
    out
}

/// Paths written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFiles {
    pub stylesheet: PathBuf,
    pub snapshot: PathBuf,
}

/// Write the snapshot and the stylesheet.
///
/// Both contents are produced before touching the disk and staged as
/// temporary siblings, so a failure leaves the previous pair in place.
pub fn write_outputs(
    stylesheet: &Path,
    tokens: &[Token],
    options: RenderOptions,
) -> Result<WrittenFiles> {
    let snapshot = snapshot_path(stylesheet);
    let snapshot_json = render_snapshot(tokens)?;
    let scss = render(tokens, options);

    if let Some(dir) = stylesheet.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let staged_snapshot = staging_path(&snapshot);
    let staged_stylesheet = staging_path(stylesheet);
    let staged = fs::write(&staged_snapshot, &snapshot_json)
        .and_then(|_| fs::write(&staged_stylesheet, &scss));
    if let Err(err) = staged {
        let _ = fs::remove_file(&staged_snapshot);
        let _ = fs::remove_file(&staged_stylesheet);
        return Err(err.into());
    }
    // Stylesheet first; the snapshot is never newer than the stylesheet.
    if let Err(err) = fs::rename(&staged_stylesheet, stylesheet) {
        let _ = fs::remove_file(&staged_snapshot);
        let _ = fs::remove_file(&staged_stylesheet);
        return Err(err.into());
    }
    if let Err(err) = fs::rename(&staged_snapshot, &snapshot) {
        let _ = fs::remove_file(&staged_snapshot);
        return Err(err.into());
    }

    debug!(
        stylesheet = %stylesheet.display(),
        snapshot = %snapshot.display(),
        tokens = tokens.len(),
        "wrote outputs"
    );
    Ok(WrittenFiles {
        stylesheet: stylesheet.to_path_buf(),
        snapshot,
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
