//! Directive preprocessing for markdown documents.
//!
//! A source tree of markdown files is flattened into a single document by
//! expanding line-oriented directives before any markdown parsing happens:
//!
//! - `:include:<path>` - inline another file
//! - `:include*:<dir>|<regex>` - inline every matching `.md` file in a directory,
//!   in natural sort order
//! - `:css:<path>` - add a stylesheet link (deduplicated)
//! - `:title:<text>` - set the document title (the root document wins)
//! - `:id:`, `:class:`, `:style:` - attributes for the next heading line
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use md_directives::{MemorySource, Resolver, ResolverConfig};
//!
//! let source = MemorySource::new()
//!     .with_file("book/index.md", ":title:Book\n:css:style.css\n:include:intro.md\n")
//!     .with_file("book/intro.md", "# Intro\n");
//!
//! let resolver = Resolver::new(ResolverConfig::default()).with_source(source);
//! let doc = resolver.resolve(Path::new("book/index.md")).unwrap();
//!
//! assert_eq!(doc.title.as_deref(), Some("Book"));
//! assert_eq!(doc.css, vec!["book/style.css".to_owned()]);
//! assert_eq!(doc.content(), "# Intro\n");
//! ```

mod attributes;
mod directive;
mod error;
pub mod natural;
pub mod path;
mod resolver;
mod source;

pub use attributes::LineAttributes;
pub use directive::{Directive, parse_line};
pub use error::{DirectiveError, ResolveError};
pub use resolver::{
    DEFAULT_MAX_INCLUDE_DEPTH, DEFAULT_MAX_LINE_SIZE, MIN_MAX_LINE_SIZE, ResolveMode,
    ResolvedDocument, ResolvedLine, Resolver, ResolverConfig,
};
pub use source::{FsSource, MemorySource, Source};
