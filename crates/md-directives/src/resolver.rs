//! Recursive directive resolution.
//!
//! The resolver walks the include graph depth-first and flattens it into a
//! single ordered list of lines, extracting the title and stylesheet list on
//! the way. All mutable state lives in a per-call [`Context`], so a single
//! [`Resolver`] can serve any number of conversions, concurrently if needed.

use std::collections::HashSet;
use std::mem;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::attributes::LineAttributes;
use crate::directive::{Directive, parse_line};
use crate::error::{DirectiveError, ResolveError};
use crate::natural::sort_natural;
use crate::path::{clean, join, parent, to_href};
use crate::source::{FsSource, Source};

/// Default maximum line length in bytes.
pub const DEFAULT_MAX_LINE_SIZE: usize = 64 * 1024;

/// Smallest accepted maximum line length.
pub const MIN_MAX_LINE_SIZE: usize = 2;

/// Default maximum include nesting.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// How attribute directives are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// `:id:`, `:class:` and `:style:` are plain content lines.
    Simple,
    /// `:id:`, `:class:` and `:style:` attach attributes to the next content line.
    #[default]
    Attributes,
}

/// Resolver settings.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Attribute directive handling.
    pub mode: ResolveMode,
    /// Longest accepted line, in bytes, excluding the terminator.
    ///
    /// Default: 65536
    pub max_line_size: usize,
    /// Deepest accepted include nesting.
    ///
    /// Default: 64
    pub max_include_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ResolveMode::default(),
            max_line_size: DEFAULT_MAX_LINE_SIZE,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Set the attribute directive handling.
    #[must_use]
    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the maximum line length.
    ///
    /// Values below [`MIN_MAX_LINE_SIZE`] make every resolution fail with
    /// [`ResolveError::LineSizeTooSmall`].
    #[must_use]
    pub fn with_max_line_size(mut self, size: usize) -> Self {
        self.max_line_size = size;
        self
    }

    /// Set the maximum include depth.
    #[must_use]
    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Check that the settings can be used for resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::LineSizeTooSmall`] if `max_line_size` is below
    /// [`MIN_MAX_LINE_SIZE`].
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.max_line_size < MIN_MAX_LINE_SIZE {
            return Err(ResolveError::LineSizeTooSmall {
                size: self.max_line_size,
                min: MIN_MAX_LINE_SIZE,
            });
        }
        Ok(())
    }
}

/// A content line of the flattened document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedLine {
    /// Line text without terminator. Empty for blank lines.
    pub text: String,
    /// Attributes collected by the directives preceding this line.
    pub attributes: LineAttributes,
}

/// Result of resolving a document tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedDocument {
    /// Content lines in final document order.
    pub lines: Vec<ResolvedLine>,
    /// Document title, if any file set one.
    pub title: Option<String>,
    /// Stylesheet paths in first-seen order, without duplicates.
    pub css: Vec<String>,
}

impl ResolvedDocument {
    /// The flattened markdown text, every line terminated by `\n`.
    #[must_use]
    pub fn content(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.text.len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

/// Directive resolver.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use md_directives::{MemorySource, Resolver, ResolverConfig};
///
/// let source = MemorySource::new()
///     .with_file("index.md", ":id:intro\n:class:big\n# Hello\n");
/// let resolver = Resolver::new(ResolverConfig::default()).with_source(source);
///
/// let doc = resolver.resolve(Path::new("index.md")).unwrap();
/// assert_eq!(doc.lines[0].text, "# Hello");
/// assert_eq!(doc.lines[0].attributes.id.as_deref(), Some("intro"));
/// ```
pub struct Resolver {
    config: ResolverConfig,
    source: Box<dyn Source>,
}

impl Resolver {
    /// Create a resolver reading from the file system.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            source: Box::new(FsSource),
        }
    }

    /// Replace the include source.
    #[must_use]
    pub fn with_source<S: Source + 'static>(mut self, source: S) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Resolver settings.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the document at `root` and everything it includes.
    ///
    /// # Errors
    ///
    /// Fails on an unusable [`ResolverConfig`], then on the first unreadable
    /// file, over-long line, malformed or unsatisfiable directive, include
    /// cycle or depth overflow.
    pub fn resolve(&self, root: &Path) -> Result<ResolvedDocument, ResolveError> {
        self.config.validate()?;
        let mut ctx = Context::default();
        self.include_file(&mut ctx, root)?;
        Ok(ctx.finish())
    }

    /// Resolve in-memory text as the top-level document.
    ///
    /// Relative directive paths are joined against `dir`.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_str(&self, dir: &Path, text: &str) -> Result<ResolvedDocument, ResolveError> {
        self.config.validate()?;
        let mut ctx = Context::default();
        self.process_text(&mut ctx, &clean(dir), Path::new("<input>"), text)?;
        Ok(ctx.finish())
    }

    fn include_file(&self, ctx: &mut Context, path: &Path) -> Result<(), ResolveError> {
        let path = clean(path);
        if ctx.open.contains(&path) {
            return Err(DirectiveError::IncludeCycle { path }.into());
        }
        if ctx.depth > self.config.max_include_depth {
            return Err(DirectiveError::DepthExceeded {
                path,
                limit: self.config.max_include_depth,
            }
            .into());
        }

        let text = self
            .source
            .read(&path)
            .map_err(|e| ResolveError::io(&path, e))?;
        tracing::debug!(path = %path.display(), depth = ctx.depth, "Resolving document");

        ctx.open.push(path.clone());
        self.process_text(ctx, &parent(&path), &path, &text)?;
        ctx.open.pop();
        Ok(())
    }

    fn process_text(
        &self,
        ctx: &mut Context,
        dir: &Path,
        path: &Path,
        text: &str,
    ) -> Result<(), ResolveError> {
        for (idx, line) in text.split_terminator('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.len() > self.config.max_line_size {
                return Err(ResolveError::LineTooLong {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    limit: self.config.max_line_size,
                });
            }

            match parse_line(line)? {
                Directive::Include(target) => {
                    ctx.depth += 1;
                    self.include_file(ctx, &join(dir, target))?;
                    ctx.depth -= 1;
                }
                Directive::IncludeGlob {
                    dir: target,
                    pattern,
                } => {
                    ctx.depth += 1;
                    self.include_glob(ctx, &join(dir, target), pattern)?;
                    ctx.depth -= 1;
                }
                Directive::Css(target) => ctx.add_css(&join(dir, target)),
                Directive::Title(title) => ctx.set_title(title),
                Directive::Id(_) | Directive::Style(_) | Directive::Class(_)
                    if self.config.mode == ResolveMode::Simple =>
                {
                    ctx.push_content(line);
                }
                Directive::Id(id) => ctx.pending.set_id(id),
                Directive::Style(style) => ctx.pending.push_style(style),
                Directive::Class(class) => ctx.pending.push_class(class),
                Directive::Blank => ctx.push_blank(),
                Directive::Content(content) => ctx.push_content(content),
            }
        }
        Ok(())
    }

    fn include_glob(
        &self,
        ctx: &mut Context,
        dir: &Path,
        pattern: &str,
    ) -> Result<(), ResolveError> {
        let regex = Regex::new(pattern).map_err(|source| DirectiveError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;

        let mut names: Vec<String> = self
            .source
            .list_files(dir)
            .map_err(|e| ResolveError::io(dir, e))?
            .into_iter()
            .filter(|name| name.to_ascii_lowercase().ends_with(".md") && regex.is_match(name))
            .collect();
        sort_natural(&mut names);

        tracing::debug!(
            dir = %dir.display(),
            pattern,
            matches = names.len(),
            "Expanding include pattern"
        );

        for name in &names {
            self.include_file(ctx, &dir.join(name))?;
        }
        Ok(())
    }
}

/// Accumulator for a single resolution call.
#[derive(Default)]
struct Context {
    title: Option<String>,
    css: Vec<String>,
    seen_css: HashSet<String>,
    lines: Vec<ResolvedLine>,
    pending: LineAttributes,
    depth: usize,
    /// Files currently being expanded, outermost first.
    open: Vec<PathBuf>,
}

impl Context {
    fn set_title(&mut self, title: &str) {
        // The root document always wins; nested files only fill a gap.
        if self.depth == 0 || self.title.as_deref().is_none_or(str::is_empty) {
            self.title = Some(title.to_owned());
        }
    }

    fn add_css(&mut self, path: &Path) {
        let href = to_href(path);
        if self.seen_css.insert(href.clone()) {
            self.css.push(href);
        }
    }

    fn push_blank(&mut self) {
        self.pending = LineAttributes::default();
        self.lines.push(ResolvedLine::default());
    }

    fn push_content(&mut self, text: &str) {
        self.lines.push(ResolvedLine {
            text: text.to_owned(),
            attributes: mem::take(&mut self.pending),
        });
    }

    fn finish(self) -> ResolvedDocument {
        ResolvedDocument {
            lines: self.lines,
            title: self.title,
            css: self.css,
        }
    }
}
