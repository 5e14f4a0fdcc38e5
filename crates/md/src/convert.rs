//! File conversion command.

use std::path::{Path, PathBuf};

use clap::Args;
use md_config::{CliSettings, Config, ConvertMode, RendererKind};
use md_render::{Converter, output_path};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for converting markdown files.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown files to convert. Files without an `.md` extension are skipped.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover md.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directive handling: `attributes` or `simple` (overrides config).
    #[arg(long, env = "MD_MODE")]
    mode: Option<ConvertMode>,

    /// Markdown renderer: `commonmark` or `passthrough` (overrides config).
    #[arg(long, env = "MD_RENDERER")]
    renderer: Option<RendererKind>,

    /// Directory for generated HTML (default: next to each input).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Maximum line length in bytes (overrides config).
    #[arg(long)]
    max_line_size: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            mode: self.mode,
            renderer: self.renderer,
            output_dir: self.output_dir.clone(),
            max_line_size: self.max_line_size,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        match &config.config_path {
            Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
            None => tracing::info!("No md.toml found, using defaults"),
        }

        if let Some(dir) = &config.output_dir {
            std::fs::create_dir_all(dir)?;
        }

        let converter = Converter::from_boxed(config.resolver_config(), config.renderer());
        convert_all(&converter, &self.files, config.output_dir.as_deref(), &output)?;
        Ok(())
    }
}

/// Convert each markdown file in order, stopping at the first failure.
///
/// Returns the number of files written.
fn convert_all(
    converter: &Converter,
    files: &[PathBuf],
    out_dir: Option<&Path>,
    output: &Output,
) -> Result<usize, CliError> {
    let mut converted = 0;
    for input in files {
        if !is_markdown(input) {
            output.skipped(input);
            continue;
        }

        let target = output_path(input, out_dir);
        converter.convert_file_to(input, &target)?;
        output.converted(input, &target);
        converted += 1;
    }
    Ok(converted)
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
