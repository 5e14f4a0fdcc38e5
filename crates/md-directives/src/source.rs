//! Include sources.
//!
//! The resolver reads documents and lists directories through the [`Source`]
//! trait so that include graphs can be served from memory in tests or from
//! an embedding application instead of the local file system.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::path::clean;

/// Provider of document contents for the resolver.
pub trait Source: Send + Sync {
    /// Read a whole document as UTF-8 text.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// List the names of the non-directory entries of `dir`, in any order.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// [`Source`] backed by the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl Source for FsSource {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

/// In-memory [`Source`].
///
/// Paths are cleaned lexically on insertion and lookup, so `docs/./a.md` and
/// `docs/a.md` name the same file.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use md_directives::{MemorySource, Source};
///
/// let source = MemorySource::new().with_file("docs/a.md", "# A");
/// assert_eq!(source.read(Path::new("docs/a.md")).unwrap(), "# A");
/// assert_eq!(source.list_files(Path::new("docs")).unwrap(), vec!["a.md"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files.insert(clean(path.as_ref()), content.into());
    }
}

impl Source for MemorySource {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(&clean(path)).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        let dir = clean(dir);
        let names: Vec<String> = self
            .files
            .keys()
            .filter(|path| crate::path::parent(path) == dir)
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        let is_dir =
            dir == Path::new(".") || self.files.keys().any(|path| path.starts_with(&dir));
        if names.is_empty() && !is_dir {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            ));
        }
        Ok(names)
    }
}
