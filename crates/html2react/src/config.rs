//! Configuration file loading (html2react.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use html2react_core::ComponentMap;
use serde::Deserialize;

/// Output format for converted fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Serialized element tree
    #[default]
    Json,
    /// JSX source
    Jsx,
}

impl Format {
    /// File extension for converted output.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Jsx => "jsx",
        }
    }
}

/// The `[output]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Format,

    /// Indent JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            pretty: default_pretty(),
        }
    }
}

/// Tables read by the CLI. `[components]` is read by the core crate.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    output: OutputConfig,
}

/// Loaded configuration.
#[derive(Debug, Default)]
pub struct Config {
    pub components: ComponentMap<String>,
    pub output: OutputConfig,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let components = ComponentMap::<String>::from_toml_str(&content)
        .with_context(|| format!("Failed to load components from {}", path.display()))?;

    tracing::debug!(
        "Loaded config from {} with {} components",
        path.display(),
        components.len()
    );

    Ok(Config {
        components,
        output: file.output,
    })
}
