//! Configuration management for md.
//!
//! Parses `md.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use md_directives::{
    DEFAULT_MAX_INCLUDE_DEPTH, DEFAULT_MAX_LINE_SIZE, MIN_MAX_LINE_SIZE, ResolveMode,
    ResolverConfig,
};
use md_render::{CommonMarkRenderer, MarkdownOptions, MarkdownRenderer, PassthroughRenderer};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "md.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override directive handling mode.
    pub mode: Option<ConvertMode>,
    /// Override markdown renderer.
    pub renderer: Option<RendererKind>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override maximum line length.
    pub max_line_size: Option<usize>,
}

/// How attribute directives are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvertMode {
    /// `:id:`, `:class:` and `:style:` decorate the next heading.
    #[default]
    Attributes,
    /// Attribute directives are plain content.
    Simple,
}

impl From<ConvertMode> for ResolveMode {
    fn from(mode: ConvertMode) -> Self {
        match mode {
            ConvertMode::Attributes => Self::Attributes,
            ConvertMode::Simple => Self::Simple,
        }
    }
}

impl FromStr for ConvertMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attributes" => Ok(Self::Attributes),
            "simple" => Ok(Self::Simple),
            other => Err(format!(
                "unknown mode '{other}', expected 'attributes' or 'simple'"
            )),
        }
    }
}

impl fmt::Display for ConvertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attributes => "attributes",
            Self::Simple => "simple",
        })
    }
}

/// Markdown engine used for the document body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// pulldown-cmark with the `[markdown]` options.
    #[default]
    CommonMark,
    /// Body is inserted without markdown rendering.
    Passthrough,
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commonmark" => Ok(Self::CommonMark),
            "passthrough" => Ok(Self::Passthrough),
            other => Err(format!(
                "unknown renderer '{other}', expected 'commonmark' or 'passthrough'"
            )),
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommonMark => "commonmark",
            Self::Passthrough => "passthrough",
        })
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directive resolution settings.
    pub convert: ConvertConfig,
    /// Markdown renderer features.
    pub markdown: MarkdownConfig,
    /// Output settings (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved output directory (set after loading).
    #[serde(skip)]
    pub output_dir: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[convert]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directive handling mode.
    pub mode: ConvertMode,
    /// Markdown renderer.
    pub renderer: RendererKind,
    /// Maximum accepted line length in bytes.
    pub max_line_size: usize,
    /// Maximum include nesting.
    pub max_include_depth: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            mode: ConvertMode::default(),
            renderer: RendererKind::default(),
            max_line_size: DEFAULT_MAX_LINE_SIZE,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

/// `[markdown]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkdownConfig {
    /// GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Footnotes.
    pub footnotes: bool,
    /// Typographic quotes and dashes.
    pub smart_punctuation: bool,
    /// Generated heading ids.
    pub heading_ids: bool,
    /// Superscript and fraction shorthands.
    pub replacements: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        let options = MarkdownOptions::default();
        Self {
            gfm: options.gfm,
            footnotes: options.footnotes,
            smart_punctuation: options.smart_punctuation,
            heading_ids: options.heading_ids,
            replacements: options.replacements,
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `md.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is out of range.
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
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(mode) = settings.mode {
            self.convert.mode = mode;
        }
        if let Some(renderer) = settings.renderer {
            self.convert.renderer = renderer;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir = Some(output_dir.clone());
        }
        if let Some(max_line_size) = settings.max_line_size {
            self.convert.max_line_size = max_line_size;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_dir = self.output.dir.as_deref().map(|dir| config_dir.join(dir));
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.convert.max_line_size < MIN_MAX_LINE_SIZE {
            return Err(ConfigError::Validation(format!(
                "convert.max_line_size must be at least {MIN_MAX_LINE_SIZE}"
            )));
        }
        if self.convert.max_include_depth == 0 {
            return Err(ConfigError::Validation(
                "convert.max_include_depth must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolver settings for this configuration.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new()
            .with_mode(self.convert.mode.into())
            .with_max_line_size(self.convert.max_line_size)
            .with_max_include_depth(self.convert.max_include_depth)
    }

    /// Markdown renderer options for this configuration.
    #[must_use]
    pub fn markdown_options(&self) -> MarkdownOptions {
        MarkdownOptions {
            gfm: self.markdown.gfm,
            footnotes: self.markdown.footnotes,
            smart_punctuation: self.markdown.smart_punctuation,
            heading_ids: self.markdown.heading_ids,
            replacements: self.markdown.replacements,
        }
    }

    /// Build the configured markdown renderer.
    #[must_use]
    pub fn renderer(&self) -> Box<dyn MarkdownRenderer> {
        match self.convert.renderer {
            RendererKind::CommonMark => Box::new(CommonMarkRenderer::new(self.markdown_options())),
            RendererKind::Passthrough => Box::new(PassthroughRenderer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_validation_error(config: &Config, expected: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let message = err.to_string();
        for part in expected {
            assert!(message.contains(part), "'{message}' does not mention '{part}'");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.convert.mode, ConvertMode::Attributes);
        assert_eq!(config.convert.renderer, RendererKind::CommonMark);
        assert_eq!(config.convert.max_line_size, 64 * 1024);
        assert_eq!(config.convert.max_include_depth, 64);
        assert_eq!(config.markdown_options(), MarkdownOptions::default());
        assert!(config.output_dir.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.convert.mode, ConvertMode::Attributes);
        assert!(config.markdown.gfm);
    }

    #[test]
    fn test_parse_convert_config() {
        let toml = r#"
[convert]
mode = "simple"
renderer = "passthrough"
max_line_size = 128
max_include_depth = 4
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.convert.mode, ConvertMode::Simple);
        assert_eq!(config.convert.renderer, RendererKind::Passthrough);
        assert_eq!(config.convert.max_line_size, 128);
        assert_eq!(config.convert.max_include_depth, 4);
    }

    #[test]
    fn test_parse_markdown_config() {
        let toml = r"
[markdown]
gfm = false
replacements = false
";
        let config: Config = toml::from_str(toml).unwrap();
        let options = config.markdown_options();
        assert!(!options.gfm);
        assert!(!options.replacements);
        assert!(options.footnotes);
        assert!(options.smart_punctuation);
        assert!(options.heading_ids);
    }

    #[test]
    fn test_parse_unknown_mode_fails() {
        let result: Result<Config, _> = toml::from_str("[convert]\nmode = \"fancy\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let mut config: Config = toml::from_str("[output]\ndir = \"site\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.output_dir, Some(PathBuf::from("/project/site")));
    }

    #[test]
    fn test_resolve_paths_without_output_section() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("md.toml");
        std::fs::write(&path, "[convert]\nmode = \"simple\"\n\n[output]\ndir = \"out\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.convert.mode, ConvertMode::Simple);
        assert_eq!(config.output_dir, Some(temp_dir.path().join("out")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/md.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("md.toml");
        std::fs::write(&path, "[convert\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_small_line_size() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("md.toml");
        std::fs::write(&path, "[convert]\nmax_line_size = 1\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("max_line_size"));
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("md.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            max_line_size: Some(0),
            ..CliSettings::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_apply_cli_settings_mode() {
        let mut config = Config::default();
        let overrides = CliSettings {
            mode: Some(ConvertMode::Simple),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.convert.mode, ConvertMode::Simple);
        assert_eq!(config.convert.renderer, RendererKind::CommonMark); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config: Config = toml::from_str("[output]\ndir = \"site\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        let overrides = CliSettings {
            renderer: Some(RendererKind::Passthrough),
            output_dir: Some(PathBuf::from("/elsewhere")),
            max_line_size: Some(256),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.convert.renderer, RendererKind::Passthrough);
        assert_eq!(config.output_dir, Some(PathBuf::from("/elsewhere")));
        assert_eq!(config.convert.max_line_size, 256);
        assert_eq!(config.convert.mode, ConvertMode::Attributes); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.convert.max_line_size, DEFAULT_MAX_LINE_SIZE);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_line_size_minimum() {
        let mut config = Config::default();
        config.convert.max_line_size = 2;
        assert!(config.validate().is_ok());
        config.convert.max_line_size = 1;
        assert_validation_error(&config, &["max_line_size", "at least 2"]);
    }

    #[test]
    fn test_validate_include_depth_zero() {
        let mut config = Config::default();
        config.convert.max_include_depth = 0;
        assert_validation_error(&config, &["max_include_depth", "greater than 0"]);
    }

    #[test]
    fn test_resolver_config() {
        let mut config = Config::default();
        config.convert.mode = ConvertMode::Simple;
        config.convert.max_line_size = 100;
        config.convert.max_include_depth = 3;

        let resolver = config.resolver_config();
        assert_eq!(resolver.mode, ResolveMode::Simple);
        assert_eq!(resolver.max_line_size, 100);
        assert_eq!(resolver.max_include_depth, 3);
    }

    #[test]
    fn test_renderer_selection() {
        let mut config = Config::default();
        config.convert.renderer = RendererKind::Passthrough;
        assert_eq!(config.renderer().render("*x*").unwrap(), "*x*");

        config.convert.renderer = RendererKind::CommonMark;
        assert_eq!(config.renderer().render("*x*").unwrap(), "<p><em>x</em></p>\n");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("simple".parse::<ConvertMode>(), Ok(ConvertMode::Simple));
        assert_eq!("attributes".parse::<ConvertMode>(), Ok(ConvertMode::Attributes));
        assert!("Simple".parse::<ConvertMode>().is_err());
        assert_eq!(ConvertMode::Simple.to_string(), "simple");
    }

    #[test]
    fn test_renderer_from_str() {
        assert_eq!("commonmark".parse::<RendererKind>(), Ok(RendererKind::CommonMark));
        assert_eq!("passthrough".parse::<RendererKind>(), Ok(RendererKind::Passthrough));
        assert!("html".parse::<RendererKind>().is_err());
        assert_eq!(RendererKind::Passthrough.to_string(), "passthrough");
    }
}
