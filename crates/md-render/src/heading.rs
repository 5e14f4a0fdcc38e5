//! Heading attribute rendering.
//!
//! Headings that open a block (first line, or right after a blank line) are
//! replaced with explicit `<hN>` tags so that attributes collected from
//! `:id:`, `:class:` and `:style:` directives land on the element. Every other
//! line is passed through for the markdown renderer.

use std::fmt::Write;
use std::sync::LazyLock;

use md_directives::{LineAttributes, ResolvedLine};
use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+\s").unwrap());

/// Render resolved lines, synthesizing tags for block-leading headings.
///
/// Attribute values and heading text are inserted verbatim. A synthesized
/// heading that is directly followed by content gets a blank separator line,
/// so a markdown renderer ends the raw HTML block at the tag.
///
/// # Example
///
/// ```
/// use md_directives::{LineAttributes, ResolvedLine};
/// use md_render::render_headings;
///
/// let lines = vec![ResolvedLine {
///     text: "# Hello".to_owned(),
///     attributes: LineAttributes {
///         id: Some("intro".to_owned()),
///         class: Some("big".to_owned()),
///         style: None,
///     },
/// }];
/// assert_eq!(render_headings(&lines), "<h1 id=\"intro\" class=\"big\">Hello</h1>\n");
/// ```
#[must_use]
pub fn render_headings(lines: &[ResolvedLine]) -> String {
    let capacity = lines.iter().map(|l| l.text.len() + 1).sum();
    let mut out = String::with_capacity(capacity);

    for (idx, line) in lines.iter().enumerate() {
        let starts_block = idx == 0 || lines[idx - 1].text.is_empty();
        if starts_block && HEADING.is_match(&line.text) {
            push_heading(&mut out, &line.text, &line.attributes);
            if lines.get(idx + 1).is_some_and(|next| !next.text.is_empty()) {
                out.push('\n');
            }
        } else {
            out.push_str(&line.text);
            out.push('\n');
        }
    }

    out
}

fn push_heading(out: &mut String, line: &str, attributes: &LineAttributes) {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    // The pattern guarantees one whitespace character after the hashes.
    let mut rest = line[level..].chars();
    rest.next();
    let text = rest.as_str();

    write!(out, "<h{level}").unwrap();
    push_attribute(out, "id", attributes.id.as_deref());
    push_attribute(out, "class", attributes.class.as_deref());
    push_attribute(out, "style", attributes.style.as_deref());
    writeln!(out, ">{text}</h{level}>").unwrap();
}

fn push_attribute(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        write!(out, r#" {name}="{value}""#).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(text: &str) -> ResolvedLine {
        ResolvedLine {
            text: text.to_owned(),
            attributes: LineAttributes::default(),
        }
    }

    fn with_attrs(
        text: &str,
        id: Option<&str>,
        class: Option<&str>,
        style: Option<&str>,
    ) -> ResolvedLine {
        ResolvedLine {
            text: text.to_owned(),
            attributes: LineAttributes {
                id: id.map(str::to_owned),
                class: class.map(str::to_owned),
                style: style.map(str::to_owned),
            },
        }
    }

    #[test]
    fn test_attribute_order_is_id_class_style() {
        let lines = vec![with_attrs(
            "## Title",
            Some("t"),
            Some("a b"),
            Some("color: red; margin: 0"),
        )];
        assert_eq!(
            render_headings(&lines),
            "<h2 id=\"t\" class=\"a b\" style=\"color: red; margin: 0\">Title</h2>\n"
        );
    }

    #[test]
    fn test_heading_without_attributes() {
        assert_eq!(render_headings(&[line("### Plain")]), "<h3>Plain</h3>\n");
    }

    #[test]
    fn test_empty_attribute_values_are_omitted() {
        let lines = vec![with_attrs("# T", Some(""), Some("c"), Some(""))];
        assert_eq!(render_headings(&lines), "<h1 class=\"c\">T</h1>\n");
    }

    #[test]
    fn test_heading_after_blank_line() {
        let lines = vec![line("para"), line(""), line("# Next")];
        assert_eq!(render_headings(&lines), "para\n\n<h1>Next</h1>\n");
    }

    #[test]
    fn test_heading_inside_block_passes_through() {
        let lines = vec![line("para"), line("# Not a block start")];
        assert_eq!(render_headings(&lines), "para\n# Not a block start\n");
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        assert_eq!(render_headings(&[line("#hashtag")]), "#hashtag\n");
    }

    #[test]
    fn test_text_is_not_escaped() {
        assert_eq!(
            render_headings(&[line("# A & <b>B</b>")]),
            "<h1>A & <b>B</b></h1>\n"
        );
    }

    #[test]
    fn test_only_one_whitespace_character_is_stripped() {
        assert_eq!(render_headings(&[line("#  Spaced")]), "<h1> Spaced</h1>\n");
    }

    #[test]
    fn test_deep_levels_are_not_clamped() {
        assert_eq!(render_headings(&[line("####### Seven")]), "<h7>Seven</h7>\n");
    }

    #[test]
    fn test_separator_after_heading_followed_by_content() {
        let lines = vec![line("# Title"), line("Body")];
        assert_eq!(render_headings(&lines), "<h1>Title</h1>\n\nBody\n");
    }

    #[test]
    fn test_attributes_on_non_heading_lines_are_ignored() {
        let lines = vec![with_attrs("Paragraph", Some("p"), None, None)];
        assert_eq!(render_headings(&lines), "Paragraph\n");
    }
}
