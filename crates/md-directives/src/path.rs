//! Lexical path helpers for directive arguments.
//!
//! Directive paths are joined against the directory of the file containing
//! them and cleaned without touching the file system, so the same target
//! always yields the same key (for css deduplication and cycle detection).

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Join `relative` onto `dir` and clean the result.
///
/// An absolute `relative` replaces `dir`.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use md_directives::path::join;
///
/// assert_eq!(join(Path::new("docs/guide"), "../style.css"), PathBuf::from("docs/style.css"));
/// assert_eq!(join(Path::new("."), "intro.md"), PathBuf::from("intro.md"));
/// ```
#[must_use]
pub fn join(dir: &Path, relative: &str) -> PathBuf {
    clean(&dir.join(relative))
}

/// Lexically normalize a path.
///
/// Drops `.` components and folds `name/..` pairs. Leading `..` components of a
/// relative path are kept; `..` directly under the root is dropped. An empty
/// result becomes `.`.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Directory containing `path`, or `.` when there is none.
#[must_use]
pub fn parent(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Render a path with `/` separators, suitable for an `href`.
#[must_use]
pub fn to_href(path: &Path) -> String {
    let text = path.to_string_lossy();
    if MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_relative() {
        assert_eq!(
            join(Path::new("docs"), "parts/one.md"),
            PathBuf::from("docs/parts/one.md")
        );
    }

    #[test]
    fn test_join_parent_folds() {
        assert_eq!(
            join(Path::new("docs/parts"), "../style.css"),
            PathBuf::from("docs/style.css")
        );
        assert_eq!(join(Path::new("docs"), "../style.css"), PathBuf::from("style.css"));
    }

    #[test]
    fn test_join_keeps_leading_parent() {
        assert_eq!(join(Path::new("."), "../shared.css"), PathBuf::from("../shared.css"));
        assert_eq!(
            join(Path::new(".."), "../shared.css"),
            PathBuf::from("../../shared.css")
        );
    }

    #[test]
    fn test_join_current_dir() {
        assert_eq!(join(Path::new("."), "./a.md"), PathBuf::from("a.md"));
        assert_eq!(join(Path::new("."), "."), PathBuf::from("."));
    }

    #[test]
    fn test_join_absolute_replaces() {
        assert_eq!(
            join(Path::new("docs"), "/srv/site.css"),
            PathBuf::from("/srv/site.css")
        );
    }

    #[test]
    fn test_clean_parent_above_root() {
        assert_eq!(clean(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent(Path::new("docs/index.md")), PathBuf::from("docs"));
        assert_eq!(parent(Path::new("index.md")), PathBuf::from("."));
    }

    #[test]
    fn test_to_href() {
        assert_eq!(to_href(&join(Path::new("docs"), "css/a.css")), "docs/css/a.css");
    }
}
