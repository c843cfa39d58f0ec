//! Configuration loading with multi-layer merge

use super::ConfigError;
use crate::cli::OutputMode;
use crate::template::{KeyOrder, PUSH_MARKER, Resolver};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level flowres configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FlowresConfig {
    /// Variable resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// CLI output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Substitution order for overlapping keys
    pub key_order: Option<KeyOrder>,

    /// Marker stripped before substitution
    pub push_marker: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log file path; `~` and environment variables are expanded
    pub file: Option<String>,

    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub mode: Option<OutputMode>,
}

impl FlowresConfig {
    /// Load configuration from the standard hierarchy
    ///
    /// Load order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. ~/.config/flowres/config.toml
    /// 3. .flowres/config.toml (project)
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                config.merge(Self::load_file(&user_config_path)?);
            }
        }

        let project_config_path = Self::project_config_path(project_dir);
        if project_config_path.exists() {
            config.merge(Self::load_file(&project_config_path)?);
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Get the user config path (~/.config/flowres/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flowres/config.toml"))
    }

    /// Get the project config path (.flowres/config.toml)
    pub fn project_config_path(project_dir: Option<&Path>) -> PathBuf {
        project_dir
            .map(|p| p.join(".flowres/config.toml"))
            .unwrap_or_else(|| PathBuf::from(".flowres/config.toml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        if other.resolver.key_order.is_some() {
            self.resolver.key_order = other.resolver.key_order;
        }
        if other.resolver.push_marker.is_some() {
            self.resolver.push_marker = other.resolver.push_marker;
        }

        if other.logging.file.is_some() {
            self.logging.file = other.logging.file;
        }
        if other.logging.debug {
            self.logging.debug = true;
        }

        if other.output.mode.is_some() {
            self.output.mode = other.output.mode;
        }
    }

    /// Resolver configured from the `[resolver]` section
    pub fn resolver(&self) -> Resolver {
        Resolver::new()
            .with_key_order(self.resolver.key_order.unwrap_or_default())
            .with_push_marker(
                self.resolver
                    .push_marker
                    .as_deref()
                    .unwrap_or(PUSH_MARKER),
            )
    }

    /// Configured log file with `~` and `$VARS` expanded
    pub fn log_file(&self) -> Result<Option<PathBuf>, ConfigError> {
        let Some(ref raw) = self.logging.file else {
            return Ok(None);
        };

        let expanded =
            shellexpand::full(raw).map_err(|e| ConfigError::expand(raw.as_str(), e.to_string()))?;
        Ok(Some(PathBuf::from(expanded.as_ref())))
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output.mode.unwrap_or_default()
    }
}
