//! Rendering and conversion errors.

use std::io;
use std::path::PathBuf;

use md_directives::ResolveError;

/// Failure reported by a [`MarkdownRenderer`](crate::MarkdownRenderer).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The markdown engine rejected its input.
    #[error("markdown rendering failed: {0}")]
    Markdown(String),
}

/// Error returned by [`Converter`](crate::Converter).
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Directive resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The markdown renderer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The output file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
