//! Programmatic tree construction
//!
//! Trees normally come from a parser, which assigns every identifier the
//! span it occupied in the file. When a tree is synthesized instead, the
//! builder hands out fresh, non-overlapping spans so that identifiers stay
//! distinguishable.

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for spans; files > 4GB are unsupported

use super::{BasicLit, Binding, Expr, Ident, LitKind, ObjectId, Span};

/// Allocates spans for synthesized nodes
#[derive(Debug, Default)]
pub struct TreeBuilder {
    next: u32,
}

impl TreeBuilder {
    /// Create a builder starting at offset 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn span(&mut self, len: usize) -> Span {
        let start = self.next;
        // One byte of separation keeps adjacent nodes from sharing an offset
        self.next += len.max(1) as u32 + 1;
        Span::new(start, start + len as u32)
    }

    /// An unresolved identifier
    pub fn ident(&mut self, name: &str) -> Ident {
        Ident::new(name, self.span(name.len()))
    }

    /// An identifier bound to a declared object
    pub fn object(&mut self, name: &str, id: u32) -> Ident {
        self.ident(name).with_binding(Binding::Object(ObjectId(id)))
    }

    /// An identifier naming an imported namespace
    pub fn import(&mut self, name: &str, path: &str) -> Ident {
        self.ident(name).with_binding(Binding::Import {
            path: path.to_string(),
        })
    }

    /// An unresolved identifier expression
    pub fn ident_expr(&mut self, name: &str) -> Expr {
        Expr::Ident(self.ident(name))
    }

    /// `ns.sym` where `ns` is bound to an import
    pub fn qualified(&mut self, ns: &str, path: &str, sym: &str) -> Expr {
        let x = Expr::Ident(self.import(ns, path));
        Expr::selector(x, self.ident(sym))
    }

    /// A literal written exactly as `value`
    pub fn lit(&mut self, kind: LitKind, value: &str) -> BasicLit {
        BasicLit::new(kind, value, self.span(value.len()))
    }

    /// An interpreted string literal with the given contents
    pub fn string(&mut self, contents: &str) -> BasicLit {
        self.lit(LitKind::String, &format!("\"{contents}\""))
    }

    /// An integer literal expression
    pub fn int(&mut self, value: i64) -> Expr {
        Expr::BasicLit(self.lit(LitKind::Int, &value.to_string()))
    }
}
