//! Markdown file to LaTeX fragment conversion.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use mdtex_config::{CliSettings, Config};
use mdtex_renderer::MarkdownConverter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the conversion.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (default: read from stdin).
    input: Option<PathBuf>,

    /// Output file (default: `output.path` from config, otherwise stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Turn every newline inside a paragraph into a LaTeX line break
    /// (`--hard-wrap=false` overrides the config file).
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub(crate) hard_wrap: Option<bool>,

    /// Emit a `\label` after every heading (`--heading-anchors=false`
    /// overrides the config file).
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub(crate) heading_anchors: Option<bool>,

    /// Heading nesting level (0-6).
    #[arg(long, value_name = "N")]
    nesting_level: Option<u8>,

    /// Path to configuration file (default: auto-discover mdtex.toml).
    #[arg(short, long, env = "MDTEX_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            hard_wrap: self.hard_wrap,
            heading_anchors: self.heading_anchors,
            nesting_level: self.nesting_level,
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(self.input.as_deref())?;
        let result = converter(&config).render_markdown(&markdown);

        output.dropped(&result.warnings);

        match &config.output_path {
            Some(path) => {
                write_file(path, &result.latex)?;
                output.written(path, result.heading_count);
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.latex.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Build a converter from loaded configuration.
fn converter(config: &Config) -> MarkdownConverter {
    MarkdownConverter::new()
        .with_hard_wrap(config.render.hard_wrap)
        .with_heading_anchors(config.render.heading_anchors)
        .with_nesting_level(config.render.nesting_level)
        .with_gfm(config.parser.gfm)
        .with_footnotes(config.parser.footnotes)
        .with_math(config.parser.math)
}

/// Read markdown from `path`, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut markdown = String::new();
            std::io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

/// Write the fragment to `path`, creating parent directories as needed.
fn write_file(path: &Path, latex: &str) -> Result<(), CliError> {
    let to_error = |source: std::io::Error| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, latex).map_err(to_error)
}
