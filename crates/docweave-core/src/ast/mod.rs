//! Declaration trees consumed by the renderer
//!
//! The external parser produces these nodes. Every [`Ident`] carries the
//! [`Span`] it occupied in the original file, which is how anchors and links
//! computed on the tree are matched back to identifiers in printed output,
//! and an optional [`Binding`] describing what the name refers to.

mod build;
mod comment;
mod decl;
mod expr;
pub mod visit;

pub use build::TreeBuilder;
pub use comment::{Comment, CommentGroup, CommentKind};
pub use decl::{Decl, FuncDecl, GenDecl, GenKind, ImportSpec, Spec, TypeSpec, ValueSpec};
pub use expr::{BasicLit, Block, ChanDir, Expr, Field, FieldList, FuncType, LitKind, Stmt};

// Re-export Span from lexer for convenience
pub use crate::lexer::Span;

/// Identity of a declared object, assigned by the parser's resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// What an identifier refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// An imported namespace, with its import path (e.g. `"encoding/json"`)
    Import { path: String },
    /// A declared object (top-level or local)
    Object(ObjectId),
}

/// An identifier with its source location and binding
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    /// The identifier name
    pub name: String,
    /// Source location in the original file
    pub span: Span,
    /// Resolved binding, `None` if unresolved (e.g. predeclared names)
    pub binding: Option<Binding>,
}

impl Ident {
    /// Create a new unresolved identifier
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            binding: None,
        }
    }

    /// Attach a binding
    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    /// The object this identifier is bound to, if any
    #[must_use]
    pub fn object(&self) -> Option<ObjectId> {
        match self.binding {
            Some(Binding::Object(id)) => Some(id),
            _ => None,
        }
    }

    /// The import path, if this identifier names an imported namespace
    #[must_use]
    pub fn import_path(&self) -> Option<&str> {
        match &self.binding {
            Some(Binding::Import { path }) => Some(path),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
