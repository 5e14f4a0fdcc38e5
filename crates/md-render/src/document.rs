//! HTML page skeleton.

use std::fmt::Write;

use crate::escape::escape_html;

/// Wrap a rendered body in a complete HTML5 document.
///
/// The title is HTML-escaped; stylesheet hrefs and the body are inserted
/// verbatim, stylesheets in the given order.
///
/// # Example
///
/// ```
/// use md_render::assemble;
///
/// let html = assemble("<p>Hi</p>\n", Some("A & B"), &["site.css".to_owned()]);
/// assert!(html.starts_with("<!doctype html>\n<html lang=\"en\">\n"));
/// assert!(html.contains("<title>A &amp; B</title>"));
/// assert!(html.contains(r#"href="site.css""#));
/// assert!(html.ends_with("<p>Hi</p>\n</body>\n</html>\n"));
/// ```
#[must_use]
pub fn assemble(body: &str, title: Option<&str>, css: &[String]) -> String {
    let mut out = String::with_capacity(body.len() + 512);
    out.push_str(concat!(
        "<!doctype html>\n",
        "<html lang=\"en\">\n",
        "<head>\n",
        "\t<meta charset=\"utf-8\">\n",
        "\t<meta http-equiv=\"x-ua-compatible\" content=\"ie=edge\">\n",
        "\t<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    ));
    writeln!(out, "\t<title>{}</title>", escape_html(title.unwrap_or_default())).unwrap();
    for href in css {
        writeln!(
            out,
            "\t<link rel=\"stylesheet\" type=\"text/css\" href=\"{href}\">"
        )
        .unwrap();
    }
    out.push_str("</head>\n<body>\n");
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}
