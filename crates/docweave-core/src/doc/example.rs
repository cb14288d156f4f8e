//! Example code and example identifiers
//!
//! Example bodies arrive as printed block statements. They are unwrapped,
//! unindented and split into comment and code segments; everything from the
//! expected-output comment onward is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::RenderError;
use crate::lexer::{Lexer, TokenKind};

use super::anchors::validate_dotted_ident;
use super::html::Html;

static OUTPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)//[[:space:]]*(unordered )?output:").expect("Invalid OUTPUT_RE regex")
});

/// A run of example code, either a comment or everything else
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSegment {
    pub text: String,
    pub is_comment: bool,
}

impl CodeSegment {
    fn code(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_comment: false,
        }
    }

    fn comment(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_comment: true,
        }
    }
}

/// Example code split into segments, ready for a template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSegments {
    pub segments: Vec<CodeSegment>,
}

impl CodeSegments {
    /// Render as `<pre class="Documentation-exampleCode">` with comments
    /// wrapped in `<span class="comment">`
    #[must_use]
    pub fn to_html(&self) -> Html {
        let mut out = Html::from_static("<pre class=\"Documentation-exampleCode\">");
        for seg in &self.segments {
            if seg.is_comment {
                out.push_static("<span class=\"comment\">");
                out.push_escaped(&seg.text);
                out.push_static("</span>");
            } else {
                out.push_escaped(&seg.text);
            }
        }
        out.push_static("</pre>");
        out
    }

    /// The segments as JSON template data
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RenderError> {
        serde_json::to_string(self).map_err(|e| RenderError::Template(e.to_string()))
    }

    /// The source text with segment boundaries removed
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Split example code into segments
///
/// `code` is the printed body of the example function, usually wrapped in
/// `{` and `}` on their own lines.
///
/// # Errors
///
/// Returns [`RenderError::MissingExampleCode`] if there is no code.
pub fn format_example_code(code: Option<&str>) -> Result<CodeSegments, RenderError> {
    let mut src = code.ok_or(RenderError::MissingExampleCode)?;

    let mut indent = "";
    if src.len() >= 4 && src.starts_with("{\n") && src.ends_with("\n}") {
        src = src[2..src.len() - 2].trim_matches('\n');
        let width = src.len() - src.trim_start_matches([' ', '\t']).len();
        indent = &src[..width];
        src = &src[width..];
    }
    let nl_indent = format!("\n{indent}");
    let unindent = |s: &str| {
        if indent.is_empty() {
            s.to_string()
        } else {
            s.replace(&nl_indent, "\n")
        }
    };

    let (tokens, errors) = Lexer::tokenize(src);
    for err in &errors {
        tracing::warn!(target: "docweave::example", "tokenizing example code: {err}");
    }

    let mut segments = Vec::new();
    let mut output_offset = None;
    let mut last_offset = 0;
    for tok in &tokens {
        let is_comment = match tok.kind {
            TokenKind::Eof => break,
            kind if kind.is_comment() => true,
            kind if kind.is_string() => false,
            _ => continue,
        };
        let offset = tok.offset();
        let prev = &src[last_offset..offset];
        if !prev.is_empty() {
            segments.push(CodeSegment::code(unindent(prev)));
        }
        if is_comment {
            if output_offset.is_none() && OUTPUT_RE.is_match(&tok.lexeme) {
                output_offset = Some(segments.len());
            }
            segments.push(CodeSegment::comment(unindent(&tok.lexeme)));
        } else {
            segments.push(CodeSegment::code(tok.lexeme.as_str()));
        }
        last_offset = offset + tok.lexeme.len();
    }
    let rest = &src[last_offset..];
    if !rest.is_empty() {
        segments.push(CodeSegment::code(unindent(rest)));
    }

    if let Some(n) = output_offset {
        segments.truncate(n);
    }
    if let Some(last) = segments.last_mut() {
        let trimmed = last.text.trim_end_matches('\n').len();
        last.text.truncate(trimmed);
    }
    Ok(CodeSegments { segments })
}

/// A runnable example attached to the package or to one of its declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Name of the example function, without the `Example` prefix
    pub name: String,
    /// Distinguishes several examples of the same parent
    pub suffix: String,
    pub doc: String,
    /// Printed body of the example function
    pub code: Option<String>,
    /// Expected output
    pub output: String,
}

impl Example {
    /// Create an example with code and no documentation
    #[must_use]
    pub fn new(name: impl Into<String>, suffix: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suffix: suffix.into(),
            code: Some(code.into()),
            ..Self::default()
        }
    }
}

/// Element ID of an example of `parent` (empty for the package)
///
/// # Panics
///
/// Panics if `parent` or `suffix` is not a dotted identifier.
#[must_use]
pub fn example_id(parent: &str, suffix: &str) -> String {
    validate_dotted_ident(parent);
    validate_dotted_ident(suffix);
    let parent = if parent.is_empty() { "package" } else { parent };
    if suffix.is_empty() {
        format!("example-{parent}")
    } else {
        format!("example-{parent}-{suffix}")
    }
}

/// Upper-case the first letter of every word
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

/// An example together with the declaration it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleEntry {
    /// Parent declaration (`T`, `F`, `T.M`), empty for the package
    pub parent: String,
    pub id: String,
    pub example: Example,
}

/// The examples of a package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExampleSet {
    /// Every example, sorted by parent
    pub list: Vec<ExampleEntry>,
    /// Examples by parent
    pub map: BTreeMap<String, Vec<ExampleEntry>>,
}

impl ExampleSet {
    /// Collect `(parent, example)` pairs given in package order
    ///
    /// The list is sorted by parent, package examples first; examples of one
    /// parent keep the order they were given in.
    ///
    /// # Panics
    ///
    /// Panics if a parent or suffix is not a dotted identifier.
    #[must_use]
    pub fn collect<I, S>(examples: I) -> Self
    where
        I: IntoIterator<Item = (S, Example)>,
        S: Into<String>,
    {
        let mut list: Vec<ExampleEntry> = examples
            .into_iter()
            .map(|(parent, mut example)| {
                let parent = parent.into();
                example.suffix = title_case(&example.suffix);
                ExampleEntry {
                    id: example_id(&parent, &example.suffix),
                    parent,
                    example,
                }
            })
            .collect();
        list.sort_by(|a, b| a.parent.cmp(&b.parent));

        let mut map: BTreeMap<String, Vec<ExampleEntry>> = BTreeMap::new();
        for entry in &list {
            map.entry(entry.parent.clone()).or_default().push(entry.clone());
        }
        Self { list, map }
    }

    /// Examples of `parent` (empty for the package)
    #[must_use]
    pub fn for_parent(&self, parent: &str) -> &[ExampleEntry] {
        self.map.get(parent).map_or(&[], Vec::as_slice)
    }

    /// Check if there are no examples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(code: &str) -> Vec<(String, bool)> {
        format_example_code(Some(code))
            .unwrap()
            .segments
            .into_iter()
            .map(|s| (s.text, s.is_comment))
            .collect()
    }

    #[test]
    fn test_output_comment_is_dropped() {
        let code = "{\n\tfmt.Println(\"hi\")\n\t// Output:\n\t// hi\n}";
        assert_eq!(
            segments(code),
            vec![
                ("fmt.Println(".to_string(), false),
                ("\"hi\"".to_string(), false),
                (")".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_unordered_output_is_dropped() {
        let code = "{\n\tx := 1\n\t// unordered OUTPUT: 1\n}";
        assert_eq!(segments(code), vec![("x := 1".to_string(), false)]);
    }

    #[test]
    fn test_comments_are_unindented() {
        let code = "{\n\t/* a\n\t   b */\n\tf()\n}";
        let segs = segments(code);
        assert_eq!(segs[0], ("/* a\n   b */".to_string(), true));
        assert_eq!(segs[1], ("\nf()".to_string(), false));
    }

    #[test]
    fn test_strings_are_untouched() {
        let code = "{\n\ts := `a\n\tb`\n}";
        let segs = segments(code);
        assert_eq!(segs[1], ("`a\n\tb`".to_string(), false));
    }

    #[test]
    fn test_unwrapped_code_passes_through() {
        let out = format_example_code(Some("f()\n\n")).unwrap();
        assert_eq!(out.text(), "f()");
    }

    #[test]
    fn test_missing_code() {
        assert_eq!(
            format_example_code(None),
            Err(RenderError::MissingExampleCode)
        );
    }

    #[test]
    fn test_to_html_and_json() {
        let out = format_example_code(Some("{\n\t// a < b\n\tf()\n}")).unwrap();
        assert_eq!(
            out.to_html().as_str(),
            "<pre class=\"Documentation-exampleCode\"><span class=\"comment\">// a &lt; b</span>\nf()</pre>"
        );
        assert!(out.to_json().unwrap().contains("\"isComment\":true"));
    }

    #[test]
    fn test_example_id() {
        assert_eq!(example_id("", ""), "example-package");
        assert_eq!(example_id("", "Basic"), "example-package-Basic");
        assert_eq!(example_id("Reader", ""), "example-Reader");
        assert_eq!(example_id("Reader.Read", "Big"), "example-Reader.Read-Big");
    }

    #[test]
    #[should_panic(expected = "invalid identifier characters")]
    fn test_example_id_rejects_bad_suffix() {
        let _ = example_id("Reader", "a b");
    }

    #[test]
    fn test_collect_orders_by_parent() {
        let set = ExampleSet::collect([
            ("Reader", Example::new("Reader", "basic", "{}")),
            ("", Example::new("", "", "{}")),
            ("Reader", Example::new("Reader", "", "{}")),
            ("Writer", Example::new("Writer", "", "{}")),
        ]);
        let ids: Vec<&str> = set.list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "example-package",
                "example-Reader-Basic",
                "example-Reader",
                "example-Writer"
            ]
        );
        assert_eq!(set.for_parent("Reader").len(), 2);
        assert!(set.for_parent("Closer").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("basic"), "Basic");
        assert_eq!(title_case("two_words"), "Two_words");
        assert_eq!(title_case("x2y"), "X2y");
    }
}
