use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};

/// Settings for one invocation: file values first, then flags on top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Repository directory holding objects/, refs/ and HEAD.
    pub git_dir: PathBuf,
    /// Whether diagnostics may use ANSI colors.
    pub color: bool,
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            git_dir: PathBuf::from(".git"),
            color: true,
            format: OutputFormat::Text,
        }
    }
}

impl CliConfig {
    /// Read a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Combine the optional config file with command-line overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(dir) = &cli.git_dir {
            config.git_dir = dir.clone();
        }
        if let Some(format) = cli.format {
            config.format = format;
        }
        if cli.no_color {
            config.color = false;
        }
        Ok(config)
    }
}
