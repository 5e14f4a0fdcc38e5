/// Escape text for use in HTML element content or attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'`.
///
/// ```
/// use md_render::escape_html;
///
/// assert_eq!(escape_html("A & B"), "A &amp; B");
/// assert_eq!(escape_html(r#"<"x">"#), "&lt;&#34;x&#34;&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_html("Hello, world"), "Hello, world");
    }

    #[test]
    fn test_all_special_characters() {
        assert_eq!(
            escape_html(r#"a&b<c>d"e'f"#),
            "a&amp;b&lt;c&gt;d&#34;e&#39;f"
        );
    }

    #[test]
    fn test_already_escaped_is_escaped_again() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}
