//! Configuration file support.
//!
//! The config is read from `.figma-config.json` (or any path given with
//! `--config`; `.toml` files are parsed as TOML). Keys are camelCase so that
//! existing config files keep working.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FigtokError, Result};
use crate::prompt::Prompter;

pub const DEFAULT_CONFIG_FILE: &str = ".figma-config.json";
pub const TOKEN_ENV: &str = "FIGMA_TOKEN";

/// How font tokens are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontMode {
    /// Literal values inside the mixin.
    #[default]
    Inline,
    /// One variable per font property plus a shared `font-family-base`.
    Variables,
}

/// Separator between the category prefix and the rest of a node name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameSeparator {
    #[default]
    Slash,
    Dash,
}

impl NameSeparator {
    pub fn as_char(self) -> char {
        match self {
            NameSeparator::Slash => '/',
            NameSeparator::Dash => '-',
        }
    }
}

/// Node-name prefixes that select each token category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefixes {
    #[serde(rename = "colorPrefix")]
    pub color: String,
    #[serde(rename = "sizePrefix")]
    pub size: String,
    #[serde(rename = "spacingPrefix")]
    pub spacing: String,
    #[serde(rename = "borderPrefix")]
    pub border: String,
    #[serde(rename = "borderRadiusPrefix")]
    pub border_radius: String,
    #[serde(rename = "shadowPrefix")]
    pub shadow: String,
    #[serde(rename = "fontPrefix")]
    pub font: String,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            color: "Color".to_string(),
            size: "Size".to_string(),
            spacing: "Spacing".to_string(),
            border: "Stroke".to_string(),
            border_radius: "Border radius".to_string(),
            shadow: "Shadow".to_string(),
            font: "Font".to_string(),
        }
    }
}

impl Prefixes {
    /// `(label, prefix)` pairs in category order, for validation messages.
    pub fn labelled(&self) -> [(&'static str, &str); 7] {
        [
            ("colorPrefix", self.color.as_str()),
            ("sizePrefix", self.size.as_str()),
            ("spacingPrefix", self.spacing.as_str()),
            ("borderPrefix", self.border.as_str()),
            ("borderRadiusPrefix", self.border_radius.as_str()),
            ("shadowPrefix", self.shadow.as_str()),
            ("fontPrefix", self.font.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Figma personal access token
    pub token: String,
    /// Figma file key
    pub file: String,
    /// Name of the page holding the token nodes
    #[serde(alias = "tokensPage")]
    pub page: String,
    #[serde(flatten)]
    pub prefixes: Prefixes,
    pub tokens_file_path: PathBuf,
    /// Append `!default` to every variable declaration
    pub emit_defaults: bool,
    pub font_mode: FontMode,
    pub name_separator: NameSeparator,
    /// Ask before keeping tokens that disappeared from the design
    pub confirm_deletions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            file: String::new(),
            page: "Page 1".to_string(),
            prefixes: Prefixes::default(),
            tokens_file_path: PathBuf::from("styles/_tokens.scss"),
            emit_defaults: false,
            font_mode: FontMode::default(),
            name_separator: NameSeparator::default(),
            confirm_deletions: false,
        }
    }
}

/// Required values that can be asked for interactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Token,
    File,
}

impl RequiredField {
    pub fn question(self) -> &'static str {
        match self {
            RequiredField::Token => "Figma API token:",
            RequiredField::File => "Figma file ID:",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            RequiredField::Token => "Generate a personal token, read here: https://www.figma.com/developers/api#access-tokens",
            RequiredField::File => "Open the file in the browser and copy the id: https://www.figma.com/file/FILE-ID/project-name",
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn from_json_str(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load a config file; `.toml` is parsed as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&raw).map_err(|e| FigtokError::Config(e.to_string()))
        } else {
            Self::from_json_str(&raw).map_err(|e| FigtokError::Config(e.to_string()))
        }
    }

    /// Fill the token from the environment when the file does not carry one.
    pub fn apply_env_token(&mut self, env_token: Option<String>) {
        if self.token.trim().is_empty() {
            if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
                self.token = token;
            }
        }
    }

    pub fn missing_required(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.token.trim().is_empty() {
            missing.push(RequiredField::Token);
        }
        if self.file.trim().is_empty() {
            missing.push(RequiredField::File);
        }
        missing
    }

    /// Ask for every missing required value. Returns true when anything changed.
    pub fn prompt_missing(&mut self, prompter: &mut dyn Prompter) -> Result<bool> {
        let missing = self.missing_required();
        for field in &missing {
            let mut answer = String::new();
            while answer.trim().is_empty() {
                answer = prompter.input(field.question())?;
                if answer.trim().is_empty() {
                    prompter.notice(field.hint());
                }
            }
            match field {
                RequiredField::Token => self.token = answer.trim().to_string(),
                RequiredField::File => self.file = answer.trim().to_string(),
            }
        }
        Ok(!missing.is_empty())
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(field) = self.missing_required().first() {
            return Err(match field {
                RequiredField::Token => format!("token is required (config or {TOKEN_ENV})"),
                RequiredField::File => "file is required".to_string(),
            });
        }
        if self.page.trim().is_empty() {
            return Err("page must not be empty".to_string());
        }
        if self.tokens_file_path.as_os_str().is_empty() {
            return Err("tokensFilePath must not be empty".to_string());
        }
        let mut seen = HashSet::new();
        for (label, prefix) in self.prefixes.labelled() {
            let prefix = prefix.trim();
            if prefix.is_empty() {
                return Err(format!("{label} must not be empty"));
            }
            if !seen.insert(prefix) {
                return Err(format!("{label} '{prefix}' is used by more than one category"));
            }
        }
        Ok(())
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
