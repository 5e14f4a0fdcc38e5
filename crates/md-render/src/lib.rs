//! HTML output for directive-annotated markdown.
//!
//! This crate turns a [`ResolvedDocument`](md_directives::ResolvedDocument)
//! into a self-contained HTML5 page:
//!
//! - [`MarkdownRenderer`]: injected markdown-to-HTML capability, with
//!   [`CommonMarkRenderer`] (pulldown-cmark) and [`PassthroughRenderer`]
//! - [`render_headings`]: emits `<hN>` tags carrying `:id:`/`:class:`/`:style:`
//!   attributes for headings that start a block
//! - [`assemble`]: wraps a rendered body in the page skeleton
//! - [`Converter`]: resolve, render and assemble in one call
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use md_directives::{MemorySource, ResolverConfig};
//! use md_render::{CommonMarkRenderer, Converter};
//!
//! let source = MemorySource::new()
//!     .with_file("index.md", ":title:A & B\n:id:top\n# Hello\n\nSome *text*.\n");
//! let converter = Converter::new(ResolverConfig::default(), CommonMarkRenderer::default())
//!     .with_source(source);
//!
//! let html = String::from_utf8(converter.convert_file(Path::new("index.md")).unwrap()).unwrap();
//! assert!(html.contains("<title>A &amp; B</title>"));
//! assert!(html.contains(r#"<h1 id="top">Hello</h1>"#));
//! assert!(html.contains("<em>text</em>"));
//! ```

mod converter;
mod document;
mod error;
mod escape;
mod heading;
mod markdown;

pub use converter::{Converter, output_path};
pub use document::assemble;
pub use error::{ConvertError, RenderError};
pub use escape::escape_html;
pub use heading::render_headings;
pub use markdown::{CommonMarkRenderer, MarkdownOptions, MarkdownRenderer, PassthroughRenderer};
