use std::sync::LazyLock;

use regex::{Captures, Regex};

static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-zA-Z0-9]+)\]").expect("valid wikilink pattern"));

/// Escape text for embedding in HTML, covering `& < > " '`.
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Render a raw page body as an HTML fragment.
///
/// The body is escaped first, then every `[Title]` token becomes a link to
/// `/view/Title`, then newlines become `<br>`. The result is safe to embed
/// without further escaping. Invalid UTF-8 is replaced with U+FFFD.
pub fn render_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let escaped = escape(&text);
    let linked = link_titles(&escaped);
    linked.replace('\n', "<br>")
}

/// Replace `[Title]` tokens with anchors. Brackets survive escaping untouched,
/// so this runs on already-escaped text.
fn link_titles(escaped: &str) -> String {
    WIKILINK
        .replace_all(escaped, |caps: &Captures| {
            let title = &caps[1];
            format!("<a href=\"/view/{}\">{}</a>", title, title)
        })
        .into_owned()
}
