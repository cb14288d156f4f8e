//! Bounding the size of printed declarations
//!
//! Long string literals and large composite literals in `const`/`var` values
//! and struct tags are emptied before printing, leaving a comment that says
//! how much was dropped.

use serde::{Deserialize, Serialize};

use crate::ast::visit::{walk_decl_mut, VisitMut};
use crate::ast::{BasicLit, Comment, CommentGroup, Decl, Expr, Field, LitKind, ValueSpec};

/// Largest string literal shown, in bytes between the delimiters
pub const DEFAULT_MAX_STRING_SIZE: usize = 125;
/// Largest composite literal shown, in elements
pub const DEFAULT_MAX_ELEMENTS: usize = 100;

/// Literal size thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimLimits {
    pub max_string_size: usize,
    pub max_elements: usize,
}

impl Default for TrimLimits {
    fn default() -> Self {
        Self {
            max_string_size: DEFAULT_MAX_STRING_SIZE,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl TrimLimits {
    /// Trim every oversized literal in `decl`
    ///
    /// Trimmed literals are below every threshold, so a second pass is a
    /// no-op.
    pub fn apply(&self, decl: &mut Decl) {
        walk_decl_mut(&mut Trimmer { limits: *self }, decl);
    }
}

struct Trimmer {
    limits: TrimLimits,
}

impl Trimmer {
    /// Put `notes` ahead of any existing comments, in source order
    fn note(comment: &mut Option<CommentGroup>, notes: Vec<String>) {
        if notes.is_empty() {
            return;
        }
        let group = comment.get_or_insert_with(CommentGroup::default);
        group.list.splice(0..0, notes.into_iter().map(Comment::parse));
    }

    fn trim_lit(&self, lit: &mut BasicLit) -> Option<String> {
        if lit.kind != LitKind::String {
            return None;
        }
        let size = lit.value.len().saturating_sub(2);
        if size <= self.limits.max_string_size {
            return None;
        }
        lit.value = if lit.is_raw_string() { "``" } else { "\"\"" }.to_string();
        Some(format!("/* {size}-byte string literal not displayed */"))
    }

    fn trim_value(&self, value: &mut Expr) -> Option<String> {
        match value {
            Expr::BasicLit(lit) => self.trim_lit(lit),
            Expr::CompositeLit { elts, .. } if elts.len() > self.limits.max_elements => {
                let note = format!("/* {} elements not displayed */", elts.len());
                elts.clear();
                Some(note)
            }
            _ => None,
        }
    }
}

impl VisitMut for Trimmer {
    fn visit_value_spec(&mut self, spec: &mut ValueSpec) {
        let notes = spec
            .values
            .iter_mut()
            .filter_map(|value| self.trim_value(value))
            .collect();
        Self::note(&mut spec.comment, notes);
    }

    fn visit_field(&mut self, field: &mut Field) {
        if let Some(note) = field.tag.as_mut().and_then(|tag| self.trim_lit(tag)) {
            Self::note(&mut field.comment, vec![note]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FieldList, GenDecl, GenKind, Spec, TreeBuilder, TypeSpec};
    use crate::printer::Printer;

    fn var(b: &mut TreeBuilder, value: Expr) -> Decl {
        Decl::Gen(GenDecl::new(
            GenKind::Var,
            vec![Spec::Value(ValueSpec::new(
                vec![b.object("X", 1)],
                None,
                vec![value],
            ))],
        ))
    }

    #[test]
    fn test_long_string_is_emptied() {
        let mut b = TreeBuilder::new();
        let long = Expr::BasicLit(b.string(&"a".repeat(200)));
        let mut decl = var(&mut b, long);
        TrimLimits::default().apply(&mut decl);
        assert_eq!(
            Printer::print_decl(&decl).text,
            "var X = \"\" /* 200-byte string literal not displayed */"
        );
    }

    #[test]
    fn test_raw_string_keeps_delimiter() {
        let mut b = TreeBuilder::new();
        let raw = b.lit(LitKind::String, &format!("`{}`", "x".repeat(10)));
        let mut decl = var(&mut b, Expr::BasicLit(raw));
        TrimLimits {
            max_string_size: 4,
            ..TrimLimits::default()
        }
        .apply(&mut decl);
        assert_eq!(
            Printer::print_decl(&decl).text,
            "var X = `` /* 10-byte string literal not displayed */"
        );
    }

    #[test]
    fn test_large_composite_is_cleared() {
        let mut b = TreeBuilder::new();
        let elts: Vec<Expr> = (0..101).map(|i| b.int(i)).collect();
        let lit = Expr::composite(Some(Expr::slice(b.ident_expr("int"))), elts);
        let mut decl = var(&mut b, lit);
        TrimLimits::default().apply(&mut decl);
        assert_eq!(
            Printer::print_decl(&decl).text,
            "var X = []int{} /* 101 elements not displayed */"
        );
    }

    #[test]
    fn test_note_goes_before_existing_comment() {
        let mut b = TreeBuilder::new();
        let spec = ValueSpec::new(
            vec![b.object("X", 1)],
            None,
            vec![Expr::BasicLit(b.string(&"a".repeat(130)))],
        )
        .with_comment(CommentGroup::from_lines(["// the payload"]));
        let mut decl = Decl::Gen(GenDecl::new(GenKind::Const, vec![Spec::Value(spec)]));
        TrimLimits::default().apply(&mut decl);
        assert_eq!(
            Printer::print_decl(&decl).text,
            "const X = \"\" /* 130-byte string literal not displayed */ // the payload"
        );
    }

    #[test]
    fn test_notes_keep_value_order() {
        let mut b = TreeBuilder::new();
        let spec = ValueSpec::new(
            vec![b.object("X", 1), b.object("Y", 2)],
            None,
            vec![
                Expr::BasicLit(b.string(&"a".repeat(200))),
                Expr::BasicLit(b.string(&"b".repeat(300))),
            ],
        )
        .with_comment(CommentGroup::from_lines(["// sizes"]));
        let mut decl = Decl::Gen(GenDecl::new(GenKind::Var, vec![Spec::Value(spec)]));
        TrimLimits::default().apply(&mut decl);
        assert_eq!(
            Printer::print_decl(&decl).text,
            concat!(
                "var X, Y = \"\", \"\" ",
                "/* 200-byte string literal not displayed */ ",
                "/* 300-byte string literal not displayed */ // sizes",
            )
        );
    }

    #[test]
    fn test_struct_tags_are_trimmed() {
        let mut b = TreeBuilder::new();
        let tag = b.lit(LitKind::String, &format!("`{}`", "t".repeat(300)));
        let field = Field::new(vec![b.ident("F")], b.ident_expr("int")).with_tag(tag);
        let mut decl = Decl::Gen(GenDecl::new(
            GenKind::Type,
            vec![Spec::Type(TypeSpec::new(
                b.object("T", 1),
                Expr::StructType(FieldList::new(vec![field])),
            ))],
        ));
        TrimLimits::default().apply(&mut decl);
        assert_eq!(
            Printer::print_decl(&decl).text,
            "type T struct {\n\tF int `` /* 300-byte string literal not displayed */\n}"
        );
    }

    #[test]
    fn test_trimming_is_idempotent() {
        let mut b = TreeBuilder::new();
        let elts: Vec<Expr> = (0..150).map(|i| b.int(i)).collect();
        let mut decl = var(&mut b, Expr::composite(None, elts));
        let limits = TrimLimits::default();
        limits.apply(&mut decl);
        let once = decl.clone();
        limits.apply(&mut decl);
        assert_eq!(decl, once);
    }
}
