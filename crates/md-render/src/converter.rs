//! End-to-end conversion: resolve directives, render markdown, assemble HTML.

use std::path::{Path, PathBuf};

use md_directives::{ResolveMode, ResolvedDocument, Resolver, ResolverConfig, Source};

use crate::document::assemble;
use crate::error::ConvertError;
use crate::heading::render_headings;
use crate::markdown::MarkdownRenderer;

/// Markdown-to-HTML document converter.
///
/// Holds no per-conversion state, so one converter can be shared across
/// threads and reused for any number of files.
pub struct Converter {
    resolver: Resolver,
    renderer: Box<dyn MarkdownRenderer>,
}

impl Converter {
    /// Create a converter reading from the file system.
    #[must_use]
    pub fn new<R: MarkdownRenderer + 'static>(config: ResolverConfig, renderer: R) -> Self {
        Self::from_boxed(config, Box::new(renderer))
    }

    /// Create a converter with a renderer chosen at runtime.
    #[must_use]
    pub fn from_boxed(config: ResolverConfig, renderer: Box<dyn MarkdownRenderer>) -> Self {
        Self {
            resolver: Resolver::new(config),
            renderer,
        }
    }

    /// Replace the include source.
    #[must_use]
    pub fn with_source<S: Source + 'static>(mut self, source: S) -> Self {
        self.resolver = self.resolver.with_source(source);
        self
    }

    /// Convert the markdown file at `path` into HTML bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Resolve`] or [`ConvertError::Render`].
    pub fn convert_file(&self, path: &Path) -> Result<Vec<u8>, ConvertError> {
        let doc = self.resolver.resolve(path)?;
        let html = self.render_document(&doc)?;
        tracing::info!(
            path = %path.display(),
            lines = doc.lines.len(),
            stylesheets = doc.css.len(),
            "Converted document"
        );
        Ok(html)
    }

    /// Convert in-memory markdown, resolving relative directives against `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Resolve`] or [`ConvertError::Render`].
    pub fn convert_str(&self, dir: &Path, text: &str) -> Result<Vec<u8>, ConvertError> {
        let doc = self.resolver.resolve_str(dir, text)?;
        self.render_document(&doc)
    }

    /// Convert `input` and write the HTML to `output`.
    ///
    /// Nothing is written if conversion fails.
    ///
    /// # Errors
    ///
    /// Returns any conversion error, or [`ConvertError::Io`] if the output
    /// cannot be written.
    pub fn convert_file_to(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        let html = self.convert_file(input)?;
        std::fs::write(output, &html).map_err(|source| ConvertError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        tracing::info!(
            output = %output.display(),
            bytes = html.len(),
            "Wrote document"
        );
        Ok(())
    }

    fn render_document(&self, doc: &ResolvedDocument) -> Result<Vec<u8>, ConvertError> {
        let markdown = match self.resolver.config().mode {
            ResolveMode::Simple => doc.content(),
            ResolveMode::Attributes => render_headings(&doc.lines),
        };
        let body = self.renderer.render(&markdown)?;
        Ok(assemble(&body, doc.title.as_deref(), &doc.css).into_bytes())
    }
}

/// Output location for `input`: same stem with an `.html` extension, in
/// `out_dir` when given, otherwise next to the input.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use md_render::output_path;
///
/// assert_eq!(output_path(Path::new("docs/guide.md"), None), PathBuf::from("docs/guide.html"));
/// assert_eq!(
///     output_path(Path::new("docs/guide.md"), Some(Path::new("site"))),
///     PathBuf::from("site/guide.html")
/// );
/// ```
#[must_use]
pub fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let html = input.with_extension("html");
    match (out_dir, html.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => html,
    }
}
