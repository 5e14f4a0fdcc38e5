//! Line classification for the directive grammar.
//!
//! Every source line is parsed exactly once into a [`Directive`]. Directives
//! are case-sensitive, must start at column 0 and have no escaping mechanism.

use crate::error::DirectiveError;

const INCLUDE_GLOB: &str = ":include*:";
const INCLUDE: &str = ":include:";
const CSS: &str = ":css:";
const TITLE: &str = ":title:";
const ID: &str = ":id:";
const STYLE: &str = ":style:";
const CLASS: &str = ":class:";

/// A classified source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `:include:<path>`
    Include(&'a str),
    /// `:include*:<dir>|<regex>`
    IncludeGlob {
        /// Directory to scan, relative to the current file.
        dir: &'a str,
        /// Regular expression matched against file names.
        pattern: &'a str,
    },
    /// `:css:<path>`
    Css(&'a str),
    /// `:title:<text>`
    Title(&'a str),
    /// `:id:<value>`
    Id(&'a str),
    /// `:style:<value>`
    Style(&'a str),
    /// `:class:<value>`
    Class(&'a str),
    /// Empty or whitespace-only line.
    Blank,
    /// Anything else.
    Content(&'a str),
}

/// Classify a single line (without its line terminator).
///
/// Prefixes are checked in priority order: `:include*:`, `:include:`, `:css:`,
/// `:title:`, `:id:`, `:style:`, `:class:`, then blank, then content.
///
/// # Errors
///
/// Returns [`DirectiveError::MalformedIncludeGlob`] when an `:include*:` line
/// has no `|` separating the directory from the pattern.
///
/// # Example
///
/// ```
/// use md_directives::{Directive, parse_line};
///
/// assert_eq!(parse_line(":css:site.css").unwrap(), Directive::Css("site.css"));
/// assert_eq!(
///     parse_line(":include*:chapters|^ch\\d+").unwrap(),
///     Directive::IncludeGlob { dir: "chapters", pattern: "^ch\\d+" }
/// );
/// assert_eq!(parse_line("  ").unwrap(), Directive::Blank);
/// ```
pub fn parse_line(line: &str) -> Result<Directive<'_>, DirectiveError> {
    if let Some(rest) = line.strip_prefix(INCLUDE_GLOB) {
        let (dir, pattern) = rest
            .split_once('|')
            .ok_or_else(|| DirectiveError::MalformedIncludeGlob {
                line: line.to_owned(),
            })?;
        return Ok(Directive::IncludeGlob { dir, pattern });
    }

    let directive = if let Some(rest) = line.strip_prefix(INCLUDE) {
        Directive::Include(rest)
    } else if let Some(rest) = line.strip_prefix(CSS) {
        Directive::Css(rest)
    } else if let Some(rest) = line.strip_prefix(TITLE) {
        Directive::Title(rest)
    } else if let Some(rest) = line.strip_prefix(ID) {
        Directive::Id(rest)
    } else if let Some(rest) = line.strip_prefix(STYLE) {
        Directive::Style(rest)
    } else if let Some(rest) = line.strip_prefix(CLASS) {
        Directive::Class(rest)
    } else if line.trim().is_empty() {
        Directive::Blank
    } else {
        Directive::Content(line)
    };

    Ok(directive)
}
