//! Resolution error types.

use std::io;
use std::path::PathBuf;

/// Error raised by a malformed or unsatisfiable directive.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// `:include*:` argument lacks the `|pattern` half.
    #[error("invalid :include*: directive (expected <dir>|<regex>): {line}")]
    MalformedIncludeGlob {
        /// The offending line.
        line: String,
    },
    /// `:include*:` pattern is not a valid regular expression.
    #[error("invalid :include*: pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// Compilation error.
        source: regex::Error,
    },
    /// A file includes itself, directly or through other files.
    #[error("include cycle detected at {}", .path.display())]
    IncludeCycle {
        /// The file that was already open.
        path: PathBuf,
    },
    /// Includes are nested deeper than the configured limit.
    #[error("maximum include depth ({limit}) exceeded at {}", .path.display())]
    DepthExceeded {
        /// The file that would exceed the limit.
        path: PathBuf,
        /// Configured limit.
        limit: usize,
    },
}

/// Error returned by [`Resolver::resolve`](crate::Resolver::resolve).
///
/// Any error aborts the whole resolution; no partial document is produced.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A line is longer than the configured maximum.
    #[error("{}:{line}: line exceeds maximum length of {limit} bytes", .path.display())]
    LineTooLong {
        /// File containing the line.
        path: PathBuf,
        /// Line number (1-indexed).
        line: usize,
        /// Configured limit.
        limit: usize,
    },
    /// The configured maximum line length is unusably small.
    #[error("maximum line size must be at least {min}, got {size}")]
    LineSizeTooSmall {
        /// Configured value.
        size: usize,
        /// Smallest accepted value.
        min: usize,
    },
    /// A directive could not be honored.
    #[error(transparent)]
    Directive(#[from] DirectiveError),
}

impl ResolveError {
    /// Whether this error belongs to the I/O class (read failures and line limits).
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::LineTooLong { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
