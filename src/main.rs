mod cli;

use std::fmt::Write as FmtWrite;
use std::io;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use cli::{Cli, OutputFormat};
use figtok_lib::config::{DEFAULT_CONFIG_FILE, TOKEN_ENV};
use figtok_lib::{
    generate, Config, ErrorOutput, FigmaAuth, FigtokError, FigtokOutput, FontMode,
    GenerateOutput, Prompter, ProgressFn, TerminalPrompter, TreeSource, FIGTOK_OUTPUT_VERSION,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);
    let format = args.format;
    let interactive = !args.no_input && io::stdin().is_terminal();
    let mut terminal = interactive.then(TerminalPrompter::stdio);

    let config = match resolve_config(
        &args,
        std::env::var(TOKEN_ENV).ok(),
        terminal.as_mut().map(|t| t as &mut dyn Prompter),
    ) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };

    let source = match TreeSource::from_env(FigmaAuth::new(config.token.clone())) {
        Ok(source) => source,
        Err(err) => return render_error(err, format),
    };
    let progress: Option<ProgressFn> = if args.verbose {
        Some(Arc::new(|msg: &str| eprintln!("{msg}")))
    } else {
        None
    };

    if config.confirm_deletions && !interactive {
        warn!("confirmDeletions is set but stdin is not interactive; keeping all removed tokens");
    }
    let prompter = terminal.as_mut().map(|t| t as &mut dyn Prompter);

    match generate(&source, &config, progress, prompter).await {
        Ok(outcome) => {
            let body = FigtokOutput::Generate(GenerateOutput::from(outcome));
            if let Err(err) = write_output(&body, format) {
                return render_error(FigtokError::Config(err.to_string()), format);
            }
            ExitCode::SUCCESS
        }
        Err(err) => render_error(err, format),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "figtok=debug,figtok_lib=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Config file → CLI overrides → `FIGMA_TOKEN` → prompts for what is still
/// missing → validation.
fn resolve_config(
    args: &Cli,
    env_token: Option<String>,
    prompter: Option<&mut dyn Prompter>,
) -> Result<Config, FigtokError> {
    let (mut config, config_path) = load_config(args.config.as_deref())?;
    apply_cli_overrides(&mut config, args);

    let file_token = config.token.clone();
    config.apply_env_token(env_token);

    if let Some(prompter) = prompter {
        if !config.missing_required().is_empty() && config.prompt_missing(prompter)? {
            save_prompted_config(&config, &file_token, &config_path)?;
        }
    }

    config
        .validate()
        .map_err(|e| FigtokError::Config(format!("Invalid config: {}", e)))?;
    Ok(config)
}

fn load_config(path: Option<&Path>) -> Result<(Config, PathBuf), FigtokError> {
    if let Some(p) = path {
        let cfg = Config::from_file(p).map_err(|e| {
            FigtokError::Config(format!("Failed to read config {}: {}", p.display(), e))
        })?;
        return Ok((cfg, p.to_path_buf()));
    }
    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        let cfg = Config::from_file(&default_path).map_err(|e| {
            FigtokError::Config(format!(
                "Failed to read config {}: {}",
                default_path.display(),
                e
            ))
        })?;
        return Ok((cfg, default_path));
    }
    Ok((Config::default(), default_path))
}

fn apply_cli_overrides(config: &mut Config, args: &Cli) {
    if let Some(file) = &args.file {
        config.file = file.clone();
    }
    if let Some(page) = &args.page {
        config.page = page.clone();
    }
    if let Some(path) = &args.tokens_file {
        config.tokens_file_path = path.clone();
    }
    if args.emit_defaults {
        config.emit_defaults = true;
    }
    if args.font_variables {
        config.font_mode = FontMode::Variables;
    }
    if args.confirm_deletions {
        config.confirm_deletions = true;
    }
}

/// Persist prompted answers. A token that came from the environment is not
/// written to disk.
fn save_prompted_config(
    config: &Config,
    file_token: &str,
    path: &Path,
) -> Result<(), FigtokError> {
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    if is_toml {
        warn!(path = %path.display(), "not rewriting TOML config; add the prompted values by hand");
        return Ok(());
    }
    let mut persisted = config.clone();
    if file_token.trim().is_empty() && std::env::var(TOKEN_ENV).is_ok_and(|t| t == config.token) {
        persisted.token = String::new();
    }
    persisted.save_json(path)
}

fn write_output(body: &FigtokOutput, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(body)?),
        OutputFormat::Pretty => write_pretty_output(body)?,
    };
    Ok(())
}

fn render_error(err: FigtokError, format: OutputFormat) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = FigtokOutput::Error(ErrorOutput {
        version: FIGTOK_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

fn write_pretty_output(body: &FigtokOutput) -> io::Result<()> {
    if io::stdout().is_terminal() {
        println!("{}", format_pretty(body, true));
        return Ok(());
    }

    // Non-tty: keep JSON shape for pipelines.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    println!("{content}");
    Ok(())
}

fn format_pretty(body: &FigtokOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        FigtokOutput::Generate(out) => {
            let header = color("✔", "32", colorize);
            writeln!(
                buf,
                "{} {} tokens from \"{}\" / {}",
                header, out.token_count, out.file_name, out.page
            )
            .ok();
            writeln!(buf, "Stylesheet: {}", out.stylesheet_path.display()).ok();
            writeln!(buf, "Snapshot:   {}", out.snapshot_path.display()).ok();
            if !out.deprecated.is_empty() {
                writeln!(
                    buf,
                    "{} {} deprecated:",
                    color("!", "33", colorize),
                    out.deprecated.len()
                )
                .ok();
                for name in &out.deprecated {
                    writeln!(buf, "- {name}").ok();
                }
            }
        }
        FigtokOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
