//! Escaped HTML fragments
//!
//! [`Html`] can only be built by escaping text or from the fixed templates in
//! this module, so untrusted text never reaches the output unescaped.

use std::fmt;

use serde::Serialize;

/// Replacement for hrefs with a scheme that is not allowed in a link
const UNSAFE_HREF: &str = "#ZgotmplZ";

/// An HTML fragment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Html(String);

impl Html {
    /// An empty fragment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape plain text
    #[must_use]
    pub fn escape(text: &str) -> Self {
        Self(escape_html(text))
    }

    /// A fragment from a fixed markup string
    pub(crate) fn from_static(markup: &'static str) -> Self {
        Self(markup.to_string())
    }

    /// `<a href="HREF">TEXT</a>`
    #[must_use]
    pub fn link(href: &str, text: &str) -> Self {
        Self(format!(
            "<a href=\"{}\">{}</a>",
            escape_html(sanitize_href(href)),
            escape_html(text)
        ))
    }

    /// `<span id="ID" data-kind="KIND">`, left open
    #[must_use]
    pub fn anchor_open(id: &str, kind: &str) -> Self {
        Self(format!(
            "<span id=\"{}\" data-kind=\"{}\">",
            escape_html(id),
            escape_html(kind)
        ))
    }

    /// `<h3 id="ID">`, left open
    #[must_use]
    pub fn heading_open(id: &str) -> Self {
        Self(format!("<h3 id=\"{}\">", escape_html(id)))
    }

    /// The `¶` link to an element on the same page
    #[must_use]
    pub fn permalink(id: &str) -> Self {
        Self(format!(
            "<a class=\"Documentation-idLink\" href=\"#{}\">¶</a>",
            escape_html(id)
        ))
    }

    /// An error message rendered in place of a failed fragment
    #[must_use]
    pub fn error(message: &str) -> Self {
        Self::escape(&format!("[{message}]"))
    }

    /// Append another fragment
    pub fn push(&mut self, other: &Html) {
        self.0.push_str(&other.0);
    }

    /// Append escaped text
    pub fn push_escaped(&mut self, text: &str) {
        self.0.push_str(&escape_html(text));
    }

    pub(crate) fn push_static(&mut self, markup: &'static str) {
        self.0.push_str(markup);
    }

    /// Check if the fragment is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The markup
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fragment, returning the markup
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for HTML content and attribute values
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

/// Replace hrefs whose scheme is not one of `http`, `https`, `mailto`, `ftp`
///
/// Relative references (no scheme) pass through.
#[must_use]
pub fn sanitize_href(href: &str) -> &str {
    let Some(colon) = href.find(':') else {
        return href;
    };
    let scheme = &href[..colon];
    if scheme.contains(['/', '?', '#']) {
        return href;
    }
    if ["http", "https", "mailto", "ftp"]
        .iter()
        .any(|s| s.eq_ignore_ascii_case(scheme))
    {
        href
    } else {
        UNSAFE_HREF
    }
}
