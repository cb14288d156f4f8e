//! Token types for the declaration lexer

use logos::Logos;

/// The kind of token produced by the lexer
///
/// Punctuation is deliberately coarse: the annotator only cares about
/// identifiers, comments and literals, everything else is copied through.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // ========== Keywords ==========
    #[token("break")]
    #[token("case")]
    #[token("chan")]
    #[token("const")]
    #[token("continue")]
    #[token("default")]
    #[token("defer")]
    #[token("else")]
    #[token("fallthrough")]
    #[token("for")]
    #[token("func")]
    #[token("go")]
    #[token("goto")]
    #[token("if")]
    #[token("import")]
    #[token("interface")]
    #[token("map")]
    #[token("package")]
    #[token("range")]
    #[token("return")]
    #[token("select")]
    #[token("struct")]
    #[token("switch")]
    #[token("type")]
    #[token("var")]
    Keyword,

    // ========== Identifiers ==========
    /// Identifier (Unicode letters, digits and underscore)
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    // ========== Literals ==========
    /// Integer, float or imaginary literal
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eEpP][+-]?[0-9_]+)?i?")]
    #[regex(r"0[xXoObB][0-9a-fA-F_]+i?")]
    Number,

    /// Interpreted string literal: "..."
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    /// Raw string literal: `...` (may span lines)
    #[regex(r"`[^`]*`")]
    RawString,

    /// Character literal: 'x'
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    // ========== Comments ==========
    /// Line comment: // ...
    #[regex(r"//[^\n]*")]
    LineComment,

    /// Block comment: /* ... */
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // ========== Punctuation ==========
    /// Any operator or delimiter character
    #[regex(r"[-+*/%&|^<>=!:.,;~()\[\]{}]")]
    Punct,

    // ========== Special ==========
    /// End of file (added by lexer, not matched by logos)
    Eof,

    /// Lexer error - invalid character or unterminated literal
    Error,
}

impl TokenKind {
    /// Returns true for line and block comments
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Returns true for string literals of either delimiter style
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String | Self::RawString)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword => write!(f, "keyword"),
            Self::Ident => write!(f, "identifier"),
            Self::Number => write!(f, "number"),
            Self::String | Self::RawString => write!(f, "string"),
            Self::Char => write!(f, "character"),
            Self::LineComment => write!(f, "// comment"),
            Self::BlockComment => write!(f, "/* comment */"),
            Self::Punct => write!(f, "punctuation"),
            Self::Eof => write!(f, "end of file"),
            Self::Error => write!(f, "error"),
        }
    }
}
