//! A deliberately tiny markdown dialect for CMS text fields.
//!
//! Supports `**bold**`, `*italic*` / `_italic_`, `[links](url)` and line
//! breaks, applied in exactly that order. Input comes from the CMS editors and
//! is trusted, so no other HTML is escaped or stripped.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_(.*?)_").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());
static NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// Render `text` into inline HTML. Empty input renders as an empty string.
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = BOLD.replace_all(text, "<strong>${1}</strong>");
    let text = ITALIC_STAR.replace_all(&text, "<em>${1}</em>");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "<em>${1}</em>");
    let text = LINK.replace_all(&text, r#"<a href="${2}" target="_blank">${1}</a>"#);
    let text = NEWLINE.replace_all(&text, "<br>");

    text.into_owned()
}

/// Same as [`render`], for optional fields.
pub fn render_opt(text: Option<&str>) -> String {
    text.map(render).unwrap_or_default()
}
