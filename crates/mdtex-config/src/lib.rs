//! Configuration management for mdtex.
//!
//! Parses `mdtex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `output.path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override hard line wrapping.
    pub hard_wrap: Option<bool>,
    /// Override heading anchors.
    pub heading_anchors: Option<bool>,
    /// Override heading nesting level.
    pub nesting_level: Option<u8>,
    /// Override output file.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdtex.toml";

/// Deepest heading nesting level LaTeX sectioning supports.
const MAX_NESTING_LEVEL: u8 = 6;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering options.
    pub render: RenderConfig,
    /// Markdown parser extensions.
    pub parser: ParserConfig,
    /// Output configuration (path is a relative string from TOML).
    output: OutputConfigRaw,

    /// Resolved output file (set after loading). `None` means stdout.
    #[serde(skip)]
    pub output_path: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Turn newlines inside paragraphs into explicit line breaks.
    pub hard_wrap: bool,
    /// Emit a `\label` after every heading.
    pub heading_anchors: bool,
    /// Heading nesting level (0-6).
    pub nesting_level: u8,
}

/// Markdown parser extensions.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// GitHub Flavored Markdown (tables, strikethrough, task lists).
    pub gfm: bool,
    /// Footnote references and definitions.
    pub footnotes: bool,
    /// `$inline$` and `$$display$$` math.
    pub math: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            footnotes: true,
            math: true,
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.path`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdtex.toml` in current directory and parents.
    /// Without a config file, defaults are used.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(hard_wrap) = settings.hard_wrap {
            self.render.hard_wrap = hard_wrap;
        }
        if let Some(heading_anchors) = settings.heading_anchors {
            self.render.heading_anchors = heading_anchors;
        }
        if let Some(nesting_level) = settings.nesting_level {
            self.render.nesting_level = nesting_level;
        }
        if let Some(output) = &settings.output {
            self.output_path = Some(output.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.nesting_level > MAX_NESTING_LEVEL {
            return Err(ConfigError::Validation(format!(
                "render.nesting_level cannot exceed {MAX_NESTING_LEVEL}"
            )));
        }

        if let Some(ref path) = self.output.path {
            require_non_empty(path, "output.path")?;
        }
        if let Some(ref path) = self.output_path {
            require_non_empty(&path.to_string_lossy(), "output.path")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.output.path {
            self.output.path = Some(expand::expand_env(path, "output.path")?);
        }
        Ok(())
    }

    /// Resolve the output path relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_path = self
            .output
            .path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| config_dir.join(path));
    }
}
