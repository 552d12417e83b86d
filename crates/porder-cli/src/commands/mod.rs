//! Subcommands.

pub mod batch;
pub mod config;
pub mod convert;

use std::path::{Path, PathBuf};

use porder_core::{convert_to_bytes, OutputFormat, PorderConfig};
use tracing::debug;

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// XML document
    Xml,
    /// HTML page
    Html,
    /// CSV grid
    Csv,
    /// Pipe-separated text grid
    Text,
    /// JSON record
    Json,
    /// Excel workbook
    Xlsx,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Xml => OutputFormat::Xml,
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Xlsx => OutputFormat::Xlsx,
        }
    }
}

/// Render `text` with `config`. Non-empty text output ends with a newline.
pub fn render(text: &str, config: &PorderConfig) -> anyhow::Result<Vec<u8>> {
    let mut output = convert_to_bytes(text, &config.output, &config.labels)?;
    if !config.output.format.is_binary() && !output.is_empty() && !output.ends_with(b"\n") {
        output.push(b'\n');
    }
    Ok(output)
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("porder")
        .join("config.json")
}

/// Resolve the configuration file in use: the explicit path, if any.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
///
/// An explicitly given path must exist.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<PorderConfig> {
    let path = config_path(explicit);

    if explicit.is_none() && !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(PorderConfig::default());
    }

    load_from(&path)
}

fn load_from(path: &Path) -> anyhow::Result<PorderConfig> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    debug!("Loading config from {}", path.display());
    Ok(PorderConfig::from_file(path)?)
}
