//! Figma Tokens (figtok) Library
//!
//! Reads the token page of a Figma file and turns its nodes into SCSS
//! variables and mixins. Each run is compared with the previous one so that
//! tokens removed from the design are kept as deprecated instead of
//! disappearing.
//!
//! # Module Overview
//!
//! - [`figma_client`] - Figma API access and fixture source
//! - [`classify`] - Prefix-based node classification
//! - [`format`] - Name and value formatters
//! - [`tokens`] - Token set builder
//! - [`snapshot`] - Previous-run snapshot and deprecation merge
//! - [`emit`] - Stylesheet rendering and output files
//! - [`pipeline`] - The whole run, end to end
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas

pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod figma_client;
pub mod format;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod snapshot;
pub mod tokens;
pub mod types;

pub use classify::{classify, Category, Classified, PrefixTable};
pub use config::{Config, FontMode, NameSeparator, Prefixes};
pub use emit::{render, write_outputs, RenderOptions, WrittenFiles};
pub use error::{FigtokError, Result};
pub use figma_client::{FigmaApiClient, FigmaAuth, FigmaFileResponse, FileQuery, TreeSource};
pub use format::{format_color, format_name};
pub use output::{ErrorOutput, FigtokOutput, GenerateOutput, FIGTOK_OUTPUT_VERSION};
pub use pipeline::{generate, GenerateOutcome, ProgressFn};
pub use prompt::{Prompter, TerminalPrompter};
pub use snapshot::{load_snapshot, merge, snapshot_path, OrphanPolicy};
pub use tokens::build_tokens;
pub use types::{DesignNode, Property, Token, TokenKind, TokenValue};
