//! Handler functions for CLI commands.

use std::io::Read;
use std::path::Path;

use fabryk_rules::{CompilerConfig, SearchRequest};

use crate::cli::{Cli, Command, ConfigAction};
use crate::error::{Error, Result};

const STDIO: &str = "-";

// ============================================================================
// Command dispatch
// ============================================================================

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Compile { input, output } => {
            cmd_compile(config_path, input.as_deref(), output.as_deref())
        }
        Command::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(config_path),
            ConfigAction::Init { file, force } => cmd_config_init(&file, force),
        },
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Compile one request document.
pub fn cmd_compile(
    config_path: Option<&Path>,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let request = read_request(input)?;
    let document = compile_request(&request, &config)?;
    write_output(output, &document)
}

/// Print the effective configuration.
pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Write the default configuration to `file`.
pub fn cmd_config_init(file: &Path, force: bool) -> Result<()> {
    if file.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            file.display()
        )));
    }

    let toml_str = CompilerConfig::default().to_toml_string()?;
    std::fs::write(file, toml_str).map_err(|e| Error::io_with_path(e, file))?;

    println!("Wrote default configuration to {}", file.display());
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Load the compiler configuration, the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CompilerConfig> {
    let Some(path) = path else {
        tracing::debug!("No configuration file, using defaults");
        return Ok(CompilerConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let config = CompilerConfig::from_toml_str(&content)?;
    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Read a request document from `input`, or stdin for `None` / `-`.
pub fn read_request(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new(STDIO) => {
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))
        }
        _ => {
            let mut request = String::new();
            std::io::stdin()
                .read_to_string(&mut request)
                .map_err(|e| Error::io_with_path(e, STDIO))?;
            Ok(request)
        }
    }
}

/// Compile a JSON request into a pretty-printed query document.
pub fn compile_request(request: &str, config: &CompilerConfig) -> Result<String> {
    let request = SearchRequest::from_json_str(request)?;
    let query = fabryk_rules::compile(&request, config).inspect_err(|e| {
        if e.is_user_error() {
            tracing::warn!("Request rejected: {e}");
        }
    })?;

    tracing::info!(
        index = %query.index,
        size = query.size,
        from = ?query.from,
        "Compiled request"
    );
    Ok(query.to_json_pretty()?)
}

/// Write `document` to `output`, or stdout for `None` / `-`.
pub fn write_output(output: Option<&Path>, document: &str) -> Result<()> {
    match output {
        Some(path) if path != Path::new(STDIO) => {
            std::fs::write(path, format!("{document}\n"))
                .map_err(|e| Error::io_with_path(e, path))?;
            tracing::info!(path = %path.display(), "Wrote query document");
        }
        _ => println!("{document}"),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
