//! Comment handling for declaration trees
//!
//! Comments are attached to specs and fields so the printer can emit them
//! in their canonical positions.

use crate::lexer::Span;

/// A comment in the source code
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// The comment text (including // or /* */)
    pub text: String,
    /// Source location
    pub span: Span,
    /// The kind of comment
    pub kind: CommentKind,
}

impl Comment {
    /// Create a new line comment
    #[must_use]
    pub fn line(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
            kind: CommentKind::Line,
        }
    }

    /// Create a new block comment
    #[must_use]
    pub fn block(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
            kind: CommentKind::Block,
        }
    }

    /// Create a comment from raw text, inferring its kind from the delimiter
    #[must_use]
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with("/*") {
            Self::block(text, Span::dummy())
        } else {
            Self::line(text, Span::dummy())
        }
    }

    /// Get the comment content without the delimiters
    #[must_use]
    pub fn content(&self) -> &str {
        match self.kind {
            CommentKind::Line => self
                .text
                .strip_prefix("//")
                .unwrap_or(&self.text)
                .trim_start(),
            CommentKind::Block => {
                let s = self.text.strip_prefix("/*").unwrap_or(&self.text);
                s.strip_suffix("*/").unwrap_or(s).trim()
            }
        }
    }
}

/// The kind of comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// Line comment: // ...
    Line,
    /// Block comment: /* ... */
    Block,
}

/// A run of comments with no code between them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Create a group from comments
    #[must_use]
    pub fn new(list: Vec<Comment>) -> Self {
        Self { list }
    }

    /// Create a group from raw comment lines such as `"// text"`
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            list: lines.into_iter().map(Comment::parse).collect(),
        }
    }

    /// Check if there are no comments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Ends with a line comment, so nothing may follow on the same line
    #[must_use]
    pub fn ends_with_line_comment(&self) -> bool {
        self.list
            .last()
            .is_some_and(|c| c.kind == CommentKind::Line)
    }

    /// Comment content joined by newlines
    #[must_use]
    pub fn text(&self) -> String {
        self.list
            .iter()
            .map(Comment::content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
