//! Snapshot of the previous run and the deprecation merge.
//!
//! The snapshot lives next to the stylesheet (`styles/_tokens.scss` →
//! `styles/._tokens.json`) and holds the full token list of the last run.
//! Tokens that disappeared from the design are carried over with
//! `deleted: true` instead of being dropped silently.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FigtokError, Result};
use crate::prompt::Prompter;
use crate::types::Token;

/// `dir/name.scss` → `dir/.name.json`
pub fn snapshot_path(stylesheet: &Path) -> PathBuf {
    let stem = stylesheet
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!(".{stem}.json");
    match stylesheet.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

pub fn parse_snapshot(raw: impl AsRef<[u8]>) -> serde_json::Result<Vec<Token>> {
    serde_json::from_slice(raw.as_ref())
}

pub fn render_snapshot(tokens: &[Token]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

/// Read the previous snapshot. A missing file is not an error; an
/// unreadable or unparsable one is.
pub fn load_snapshot(path: &Path) -> Result<Option<Vec<Token>>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let tokens = parse_snapshot(&raw).map_err(|source| FigtokError::MalformedSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = tokens.len(), "loaded snapshot");
    Ok(Some(tokens))
}

/// Snapshot tokens whose name is absent from `live`, tagged as deleted, in
/// snapshot order.
pub fn find_orphans(live: &[Token], previous: Vec<Token>) -> Vec<Token> {
    let mut taken: HashSet<String> = live.iter().map(|t| t.name.clone()).collect();
    previous
        .into_iter()
        .filter(|t| taken.insert(t.name.clone()))
        .map(|mut t| {
            t.deleted = true;
            t
        })
        .collect()
}

/// What to do with orphans before they are appended.
pub enum OrphanPolicy<'a> {
    KeepAll,
    Confirm(&'a mut dyn Prompter),
}

/// Live tokens first, in their sorted order, then surviving orphans.
pub fn merge(
    live: Vec<Token>,
    previous: Option<Vec<Token>>,
    policy: OrphanPolicy<'_>,
) -> Result<Vec<Token>> {
    let Some(previous) = previous else {
        return Ok(live);
    };
    let orphans = find_orphans(&live, previous);
    if orphans.is_empty() {
        return Ok(live);
    }

    let survivors = match policy {
        OrphanPolicy::KeepAll => orphans,
        OrphanPolicy::Confirm(prompter) => {
            let questions: Vec<(String, String)> = orphans
                .iter()
                .map(|t| {
                    (
                        t.name.clone(),
                        format!("Token '{}' was removed from the design. Keep it as deprecated?", t.name),
                    )
                })
                .collect();
            let answers = prompter.confirm_many(&questions, true)?;
            orphans
                .into_iter()
                .filter(|t| answers.get(&t.name).copied().unwrap_or(true))
                .collect()
        }
    };

    let mut merged = live;
    merged.extend(survivors);
    Ok(merged)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::types::{Property, TokenKind, TokenValue};
    use proptest::prelude::*;

    fn arb_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,12}"
    }

    fn arb_value() -> impl Strategy<Value = TokenValue> {
        prop_oneof![
            (0u16..2000).prop_map(|n| TokenValue::Number(f64::from(n))),
            "[ -~]{0,16}".prop_map(TokenValue::Text),
            prop::collection::vec((arb_name(), "[ -~]{0,16}"), 0..3).prop_map(|props| {
                TokenValue::Properties(
                    props
                        .into_iter()
                        .map(|(name, value)| Property::new(name, value))
                        .collect(),
                )
            }),
        ]
    }

    fn arb_token() -> impl Strategy<Value = Token> {
        (
            1u8..=7,
            prop_oneof![Just(TokenKind::Variable), Just(TokenKind::Mixin)],
            arb_name(),
            arb_value(),
            any::<bool>(),
        )
            .prop_map(|(ordering, kind, name, value, deleted)| Token {
                ordering,
                kind,
                name,
                value,
                deleted,
            })
    }

    /// Sorted, uniquely named, not deleted: what the builder hands to `merge`.
    fn arb_live() -> impl Strategy<Value = Vec<Token>> {
        prop::collection::vec(arb_token(), 0..8).prop_map(|tokens| {
            let mut seen = HashSet::new();
            let mut live: Vec<Token> = tokens
                .into_iter()
                .filter(|t| seen.insert(t.name.clone()))
                .map(|mut t| {
                    t.deleted = false;
                    t
                })
                .collect();
            live.sort_by(Token::sort_key_cmp);
            live
        })
    }

    proptest! {
        #[test]
        fn snapshot_json_round_trips(tokens in prop::collection::vec(arb_token(), 0..8)) {
            let raw = render_snapshot(&tokens).unwrap();
            prop_assert_eq!(parse_snapshot(&raw).unwrap(), tokens);
        }

        #[test]
        fn merge_keeps_live_prefix_and_unique_names(
            live in arb_live(),
            previous in prop::collection::vec(arb_token(), 0..8),
        ) {
            let merged = merge(live.clone(), Some(previous.clone()), OrphanPolicy::KeepAll).unwrap();

            prop_assert_eq!(&merged[..live.len()], &live[..]);
            prop_assert!(merged[live.len()..].iter().all(|t| t.deleted));

            let mut names = HashSet::new();
            prop_assert!(merged.iter().all(|t| names.insert(t.name.as_str())));

            // Every snapshot name survives, live or deprecated.
            prop_assert!(previous.iter().all(|t| names.contains(t.name.as_str())));
        }
    }
}
