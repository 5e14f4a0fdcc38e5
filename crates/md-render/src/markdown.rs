//! Markdown-to-HTML rendering capability.
//!
//! The converter never depends on a particular markdown engine: anything
//! implementing [`MarkdownRenderer`] (including a plain closure) can produce
//! the document body.

use std::collections::HashSet;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};

use crate::error::RenderError;
use crate::escape::escape_html;

/// Typographic text replacements applied outside code.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("^1^", "&sup1;"),
    ("^2^", "&sup2;"),
    ("^3^", "&sup3;"),
    ("!1/2!", "&frac12;"),
    ("!1/3!", "&frac13;"),
    ("!1/4!", "&frac14;"),
    ("!1/5!", "&frac15;"),
    ("!1/6!", "&frac16;"),
    ("!1/8!", "&frac18;"),
    ("!2/3!", "&frac23;"),
    ("!2/5!", "&frac25;"),
    ("!3/4!", "&frac34;"),
    ("!3/5!", "&frac35;"),
    ("!3/8!", "&frac38;"),
    ("!4/5!", "&frac45;"),
    ("!5/6!", "&frac56;"),
    ("!5/8!", "&frac58;"),
    ("!7/8!", "&frac78;"),
];

/// Converts markdown text into an HTML body fragment.
pub trait MarkdownRenderer: Send + Sync {
    /// Render `markdown` to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the engine cannot render the input.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        self(markdown)
    }
}

/// Renderer that returns its input unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughRenderer;

impl MarkdownRenderer for PassthroughRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        Ok(markdown.to_owned())
    }
}

/// Feature switches for [`CommonMarkRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkdownOptions {
    /// GitHub Flavored Markdown: tables, strikethrough, task lists, alerts.
    pub gfm: bool,
    /// `[^label]` footnotes.
    pub footnotes: bool,
    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
    /// Generate `id` attributes for headings without an explicit `{#id}`.
    pub heading_ids: bool,
    /// Superscript and fraction shorthands such as `^2^` and `!1/2!`.
    pub replacements: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            footnotes: true,
            smart_punctuation: true,
            heading_ids: true,
            replacements: true,
        }
    }
}

/// pulldown-cmark based renderer.
///
/// Raw HTML in the input is passed through unchanged, and `{#id .class}`
/// heading attributes are always recognized.
///
/// # Example
///
/// ```
/// use md_render::{CommonMarkRenderer, MarkdownRenderer};
///
/// let html = CommonMarkRenderer::default().render("# Hello World\n\nAdd !1/2! cup.\n").unwrap();
/// assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
/// assert!(html.contains("&frac12;"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CommonMarkRenderer {
    options: MarkdownOptions,
}

impl CommonMarkRenderer {
    /// Create a renderer with the given options.
    #[must_use]
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// Parser options for the configured features.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.options.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM;
        }
        if self.options.footnotes {
            options |= Options::ENABLE_FOOTNOTES;
        }
        if self.options.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut events: Vec<Event<'_>> = TextMergeStream::new(parser).collect();

        if self.options.heading_ids {
            assign_heading_ids(&mut events);
        }
        if self.options.replacements {
            apply_replacements(&mut events);
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }
}

/// Give every heading without an explicit id one derived from its text.
///
/// Generated ids are unique within the document; collisions get `-1`, `-2`, ...
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    for idx in 0..events.len() {
        if !matches!(events[idx], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }

        let mut text = String::new();
        for event in &events[idx + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let base = slugify(&text);
        let mut slug = base.clone();
        let mut n = 1;
        while used.contains(&slug) {
            slug = format!("{base}-{n}");
            n += 1;
        }
        used.insert(slug.clone());

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[idx] {
            *id = Some(CowStr::from(slug));
        }
    }
}

/// Lowercase alphanumerics, spaces become `-`, other punctuation is dropped.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c == '_' {
            slug.push(c);
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "heading".to_owned()
    } else {
        slug.to_owned()
    }
}

/// Swap typographic shorthands for HTML entities in prose text.
fn apply_replacements(events: &mut [Event<'_>]) {
    let mut verbatim_depth = 0usize;
    for event in events.iter_mut() {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Image { .. }) => verbatim_depth += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Image) => {
                verbatim_depth = verbatim_depth.saturating_sub(1);
            }
            Event::Text(text) if verbatim_depth == 0 => {
                if REPLACEMENTS.iter().any(|(from, _)| text.contains(from)) {
                    let mut replaced = escape_html(text);
                    for (from, to) in REPLACEMENTS {
                        replaced = replaced.replace(from, to);
                    }
                    *event = Event::InlineHtml(CowStr::from(replaced));
                }
            }
            _ => {}
        }
    }
}
