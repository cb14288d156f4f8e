//! Inline linking of prose
//!
//! A line of comment text is scanned left to right for URLs, RFC references
//! and identifiers. RFCs always link, and so do URLs with a scheme that
//! [`sanitize_href`] lets through. Identifiers link through the
//! [`IdentifierResolver`] only when they stand on their own: the byte before
//! and after must be whitespace or light punctuation, and the line must not be
//! inside an open quotation at that point.

use once_cell::sync::Lazy;
use regex::Regex;

use super::html::{sanitize_href, Html};
use super::resolver::IdentifierResolver;

/// URL with a scheme, host and optional path. Punctuation is allowed inside
/// the path but not as its last character, so sentences may end in a URL.
const URL_PATTERN: &str = concat!(
    r"(https?|s?ftps?|file|gopher|mailto|nntp)://",
    r"([a-zA-Z0-9_@\-.\[\]:]+)",
    r"([.,:;?!]*[a-zA-Z0-9$'()*+&#=@~_/\-\[\]%])*",
);

const RFC_PATTERN: &str = r"RFC\s+(\d{3,5})(,?\s+[Ss]ection\s+(\d+(\.\d+)*))?";

const QUAL_IDENT_PATTERN: &str = r"[\pL_][\pL_0-9]*(\.[\pL_][\pL_0-9]*)*";

static MATCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{URL_PATTERN}|{RFC_PATTERN}|{QUAL_IDENT_PATTERN}"))
        .expect("Invalid MATCH_RE regex")
});

/// Bytes that may precede a linked identifier
const VALID_PREFIX: &[u8] = b"\x00 \t()[]*\n";
/// Bytes that may follow a linked identifier
const VALID_SUFFIX: &[u8] = b"\x00 \t()[]:;,.'\n";

/// Brackets are rebalanced at most this many times per URL
const MAX_BRACKET_TRIMS: usize = 10;

/// Turn ``` `` ``` into “ and `''` into ”
#[must_use]
pub fn convert_quotes(text: &str) -> String {
    text.replace("``", "\u{201c}").replace("''", "\u{201d}")
}

fn count_quotes(s: &str) -> usize {
    s.chars()
        .filter(|c| matches!(c, '"' | '\u{201c}' | '\u{201d}'))
        .count()
}

/// Shorten a URL match so that it does not swallow surrounding brackets
///
/// Returns the new end of the match within `line`.
fn trim_url(line: &str, m0: usize, mut m1: usize) -> usize {
    for (close, open) in [(')', '('), (']', '[')] {
        let word = &line[m0..m1];
        if let (Some(i), Some(j)) = (word.find(close), word.find(open)) {
            if i < j {
                m1 = m0 + i;
            }
        }
    }
    for (open, close) in [('(', ')'), ('[', ']')] {
        for _ in 0..MAX_BRACKET_TRIMS {
            let word = &line[m0..m1];
            if word.matches(open).count() == word.matches(close).count() {
                break;
            }
            match line[..m1].rfind([open, close]) {
                Some(k) if k > m0 => m1 = k,
                _ => break,
            }
        }
    }
    m1
}

/// The link target of an RFC reference, if it has enough fields
fn rfc_href(word: &str) -> Option<String> {
    let fields: Vec<&str> = word
        .split(|c: char| !c.is_alphabetic() && !c.is_numeric() && c != '.')
        .filter(|f| !f.is_empty())
        .collect();
    match fields.as_slice() {
        [_, number, _, section, ..] => Some(format!(
            "https://rfc-editor.org/rfc/rfc{number}.html#section-{section}"
        )),
        [_, number, ..] => Some(format!("https://rfc-editor.org/rfc/rfc{number}.html")),
        _ => None,
    }
}

fn is_rfc(word: &str) -> bool {
    word.starts_with("RFC") && word[3..].starts_with(char::is_whitespace)
}

/// Render one line of prose as HTML
///
/// Without a resolver identifiers are never linked; URLs and RFC references
/// still are.
#[must_use]
pub fn format_line_html(line: &str, resolver: Option<&IdentifierResolver<'_>>) -> Html {
    let converted = convert_quotes(line);
    let mut line = converted.as_str();
    let mut out = Html::new();
    let mut last_char = 0u8;
    let mut num_quotes = 0usize;

    while !line.is_empty() {
        let (m0, mut m1) = MATCH_RE
            .find(line)
            .map_or((line.len(), line.len()), |m| (m.start(), m.end()));
        if m0 > 0 {
            let non_word = &line[..m0];
            out.push_escaped(non_word);
            last_char = non_word.as_bytes()[non_word.len() - 1];
            num_quotes += count_quotes(non_word);
        }
        if m1 > m0 {
            let mut word = &line[m0..m1];
            let next_char = line.as_bytes().get(m1).copied().unwrap_or(0);
            let forbid_linking = !VALID_PREFIX.contains(&last_char)
                || !VALID_SUFFIX.contains(&next_char)
                || num_quotes % 2 != 0;

            if word.contains("://") {
                m1 = trim_url(line, m0, m1);
                word = &line[m0..m1];
                if sanitize_href(word) == word {
                    out.push(&Html::link(word, word));
                } else {
                    out.push_escaped(word);
                }
            } else if is_rfc(word) {
                match rfc_href(word) {
                    Some(href) => out.push(&Html::link(&href, word)),
                    None => out.push_escaped(word),
                }
            } else {
                match resolver {
                    Some(r) if !forbid_linking => out.push(&r.to_html(word)),
                    _ => out.push_escaped(word),
                }
            }
            num_quotes += count_quotes(word);
        }
        line = &line[m1..];
    }
    out
}
