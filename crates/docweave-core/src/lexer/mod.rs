//! Lexer for printed declarations and example code
//!
//! The lexer re-tokenizes canonical source text so that the annotator can
//! find identifiers, comments and string literals by byte offset. It never
//! fails: invalid input produces [`TokenKind::Error`] tokens and a list of
//! [`SpannedError`]s, and lexing resumes after the bad bytes.

mod span;
mod token;

pub use span::{LineIndex, Span};
pub use token::TokenKind;

use logos::Logos;
use thiserror::Error;

/// A token with its kind, span, and source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
    /// The source text of the token
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }

    /// Byte offset of the first byte of the token
    #[must_use]
    pub fn offset(&self) -> usize {
        self.span.start as usize
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("unterminated literal")]
    UnterminatedLiteral,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
}

/// A lexer error with location information
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// The declaration lexer
pub struct Lexer<'source> {
    source: &'source str,
    inner: logos::Lexer<'source, TokenKind>,
    /// Set once the Eof token has been produced
    finished: bool,
    /// Collected errors during lexing
    errors: Vec<SpannedError>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            finished: false,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, returning all tokens and any errors
    ///
    /// The last token is always [`TokenKind::Eof`], positioned at the end of
    /// the input.
    #[must_use]
    pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SpannedError>) {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.by_ref().collect();
        (tokens, lexer.errors)
    }

    /// Errors collected so far
    #[must_use]
    pub fn errors(&self) -> &[SpannedError] {
        &self.errors
    }

    fn classify_error(slice: &str) -> LexError {
        if slice.starts_with("/*") {
            LexError::UnterminatedBlockComment
        } else if slice.starts_with(['"', '`', '\'']) {
            LexError::UnterminatedLiteral
        } else {
            LexError::UnexpectedChar
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        match self.inner.next() {
            Some(Ok(kind)) => Some(Token::new(
                kind,
                Span::from_range(self.inner.span()),
                self.inner.slice(),
            )),
            Some(Err(())) => {
                // Error recovery: report the bad bytes and continue after them
                let span = Span::from_range(self.inner.span());
                let slice = self.inner.slice();
                self.errors
                    .push(SpannedError::new(Self::classify_error(slice), span));
                Some(Token::new(TokenKind::Error, span, slice))
            }
            None => {
                self.finished = true;
                let end = self.source.len();
                Some(Token::new(TokenKind::Eof, Span::from_range(end..end), ""))
            }
        }
    }
}
