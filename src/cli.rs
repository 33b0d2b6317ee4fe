use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "figtok",
    version,
    about = "Generate SCSS variables and mixins from a Figma token page"
)]
pub struct Cli {
    /// Config file (.json or .toml); defaults to .figma-config.json when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print progress and debug logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Figma file key (overrides config)
    #[arg(long)]
    pub file: Option<String>,

    /// Page holding the token nodes (overrides config)
    #[arg(long)]
    pub page: Option<String>,

    /// Stylesheet to write (overrides config)
    #[arg(long)]
    pub tokens_file: Option<PathBuf>,

    /// Append !default to variable declarations
    #[arg(long)]
    pub emit_defaults: bool,

    /// Emit one variable per font property and a shared base family
    #[arg(long)]
    pub font_variables: bool,

    /// Ask before keeping tokens that were removed from the design
    #[arg(long)]
    pub confirm_deletions: bool,

    /// Never prompt; fail instead of asking for missing config values
    #[arg(long)]
    pub no_input: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
