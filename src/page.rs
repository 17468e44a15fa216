//! Static page shell: titles, description, footer and the embedded UI

use serde::Serialize;

// Embed the UI directly in the binary
const UI_HTML: &str = include_str!("ui.html");

pub const PAGE_TITLE: &str = "Spotify Music Analytics Dashboard";
pub const PAGE_ICON: &str = "🎵";
pub const TITLE: &str = "🎵 Spotify Music Data Analysis & Popularity Dashboard";
pub const SIDEBAR_TITLE: &str = "🎧 Spotify Filters";
pub const DESCRIPTION: &str = "Analyze **Spotify tracks**, explore **artist popularity**, \
and gain insights into **music trends** using interactive visuals.";
pub const PREVIEW_HEADING: &str = "Dataset Preview";
pub const FOOTER: &str = "🎶 **Spotify Music Data Analysis Project** | Built with Rust";

/// Text that frames the dashboard; independent of the data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageShell {
    pub page_title: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub sidebar_title: &'static str,
    pub description: &'static str,
    pub preview_heading: &'static str,
    pub footer: &'static str,
}

impl Default for PageShell {
    fn default() -> Self {
        Self {
            page_title: PAGE_TITLE,
            icon: PAGE_ICON,
            title: TITLE,
            sidebar_title: SIDEBAR_TITLE,
            description: DESCRIPTION,
            preview_heading: PREVIEW_HEADING,
            footer: FOOTER,
        }
    }
}

/// Render `**bold**` spans as `<strong>`, escaping everything else
pub fn markdown_inline(text: &str) -> String {
    let escaped = html_escape(text);
    let mut out = String::with_capacity(escaped.len());
    for (i, part) in escaped.split("**").enumerate() {
        if i % 2 == 1 {
            out.push_str("<strong>");
            out.push_str(part);
            out.push_str("</strong>");
        } else {
            out.push_str(part);
        }
    }
    out
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape JSON for inlining inside a `<script>` element
///
/// `<`, `>` and `&` only occur inside JSON strings, where `\uXXXX` escapes
/// are equivalent, so no `</script>` or `<!--` can survive.
pub fn script_safe_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// The live dashboard page. It fetches `/api/view` on each control change.
pub fn live_html() -> String {
    fill_template("null")
}

/// A self-contained page with the view model baked in
pub fn snapshot_html(view_json: &str) -> String {
    fill_template(&script_safe_json(view_json))
}

fn fill_template(initial_view: &str) -> String {
    let shell = PageShell::default();
    UI_HTML
        .replace("{{PAGE_TITLE}}", &html_escape(shell.page_title))
        .replace("{{PAGE_ICON}}", shell.icon)
        .replace("{{TITLE}}", &html_escape(shell.title))
        .replace("{{SIDEBAR_TITLE}}", &html_escape(shell.sidebar_title))
        .replace("{{DESCRIPTION}}", &markdown_inline(shell.description))
        .replace("{{PREVIEW_HEADING}}", &html_escape(shell.preview_heading))
        .replace("{{FOOTER}}", &markdown_inline(shell.footer))
        .replace("{{INITIAL_VIEW}}", initial_view)
}
