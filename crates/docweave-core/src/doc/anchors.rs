//! Definition anchors and reference links for declarations
//!
//! Both maps are keyed by the [`Span`] of the identifier they belong to, so
//! they can be matched against printed output without relying on the order in
//! which identifiers are visited.

use std::collections::{HashMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ast::visit::{self, Node};
use crate::ast::{Decl, Expr, GenKind, Ident, Span, Spec, Stmt};

use super::resolver::{is_predeclared, IdentifierResolver, BUILTIN_PACKAGE};

static BAD_ID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^_\pL\pN.]").expect("Invalid BAD_ID_CHARS regex"));

/// Kind of an anchored identifier, emitted as the `data-kind` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    Constant,
    Variable,
    Type,
    Function,
    Method,
    Field,
}

impl AnchorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::Type => "type",
            Self::Function => "function",
            Self::Method => "method",
            Self::Field => "field",
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A definition site: `Name` or `Type.Member`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPoint {
    pub id: String,
    pub kind: AnchorKind,
}

impl AnchorPoint {
    /// Create an anchor point
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a dotted identifier.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: AnchorKind) -> Self {
        let id = id.into();
        validate_dotted_ident(&id);
        Self { id, kind }
    }
}

/// Which anchor points get an inline `<span id>` wrapper in declaration HTML
///
/// Anchors left out here are expected to be emitted by the surrounding page
/// template, next to the declaration heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorPolicy {
    /// Kinds never wrapped inline
    pub suppress_kinds: Vec<AnchorKind>,
    /// Skip every inline anchor of a method declaration
    pub suppress_for_receivers: bool,
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        Self {
            suppress_kinds: vec![AnchorKind::Function, AnchorKind::Type],
            suppress_for_receivers: true,
        }
    }
}

impl AnchorPolicy {
    /// Every anchor point is wrapped inline
    #[must_use]
    pub fn all() -> Self {
        Self {
            suppress_kinds: Vec::new(),
            suppress_for_receivers: false,
        }
    }

    /// Should an anchor of `kind` be wrapped inline
    #[must_use]
    pub fn emits(&self, kind: AnchorKind, has_receiver: bool) -> bool {
        !(self.suppress_kinds.contains(&kind) || (has_receiver && self.suppress_for_receivers))
    }
}

/// Panic if `s` contains characters other than identifier characters and `.`
///
/// # Panics
///
/// Panics on any other character; anchor IDs are built from parsed
/// identifiers, so this only fires on a malformed tree.
pub fn validate_dotted_ident(s: &str) {
    if BAD_ID_CHARS.is_match(s) {
        panic!("invalid identifier characters: {s:?}");
    }
}

/// The identifier naming a type expression: `T`, `*T`, `pkg.T`, `T[int]`
fn base_ident(expr: &Expr) -> Option<&Ident> {
    match expr {
        Expr::Ident(id) => Some(id),
        Expr::Star(x) | Expr::Paren(x) => base_ident(x),
        Expr::Index { x, .. } => base_ident(x),
        Expr::Selector { sel, .. } => Some(sel),
        _ => None,
    }
}

/// Compute the anchor points of a declaration
#[must_use]
pub fn anchor_points(decl: &Decl) -> HashMap<Span, AnchorPoint> {
    let mut m = HashMap::new();
    match decl {
        Decl::Gen(gen_decl) => {
            for spec in &gen_decl.specs {
                match spec {
                    Spec::Value(vs) => {
                        let kind = if gen_decl.kind == GenKind::Var {
                            AnchorKind::Variable
                        } else {
                            AnchorKind::Constant
                        };
                        for name in &vs.names {
                            m.insert(name.span, AnchorPoint::new(&name.name, kind));
                        }
                    }
                    Spec::Type(ts) => {
                        let type_name = &ts.name.name;
                        m.insert(ts.name.span, AnchorPoint::new(type_name, AnchorKind::Type));
                        let (fields, kind) = match &ts.ty {
                            Expr::StructType(f) => (f, AnchorKind::Field),
                            Expr::InterfaceType(f) => (f, AnchorKind::Method),
                            _ => continue,
                        };
                        for field in &fields.list {
                            for name in &field.names {
                                m.insert(
                                    name.span,
                                    AnchorPoint::new(format!("{type_name}.{}", name.name), kind),
                                );
                            }
                            // Embedded struct fields are named by their type;
                            // embedded interfaces only contribute methods
                            if field.names.is_empty() && kind == AnchorKind::Field {
                                if let Some(id) = base_ident(&field.ty) {
                                    m.insert(
                                        id.span,
                                        AnchorPoint::new(format!("{type_name}.{}", id.name), kind),
                                    );
                                }
                            }
                        }
                    }
                    Spec::Import(_) => {}
                }
            }
        }
        Decl::Func(func) => {
            let recv = func
                .recv
                .as_ref()
                .and_then(|r| r.list.first())
                .and_then(|f| base_ident(&f.ty));
            let point = match recv {
                Some(recv) => AnchorPoint::new(
                    format!("{}.{}", recv.name, func.name.name),
                    AnchorKind::Method,
                ),
                None => AnchorPoint::new(&func.name.name, AnchorKind::Function),
            };
            m.insert(func.name.span, point);
        }
    }
    m
}

/// Compute the reference links of a declaration
///
/// Declared names are never linked. A selector on an imported namespace links
/// both halves; otherwise unbound predeclared names link to the builtin page
/// and names bound to a top-level object of this page link to its anchor.
#[must_use]
pub fn anchor_links(decl: &Decl, resolver: &IdentifierResolver<'_>) -> HashMap<Span, String> {
    let mut m = HashMap::new();
    let mut ignore: HashSet<Span> = HashSet::new();
    visit::inspect(Node::Decl(decl), &mut |node| {
        match node {
            Node::Decl(Decl::Func(func)) => {
                ignore.insert(func.name.span);
            }
            Node::Spec(Spec::Type(ts)) => {
                ignore.insert(ts.name.span);
            }
            Node::Spec(Spec::Value(vs)) => {
                ignore.extend(vs.names.iter().map(|n| n.span));
            }
            Node::Stmt(Stmt::Assign { lhs, .. }) => {
                for e in lhs {
                    ignore.extend(visit::expr_idents(e).into_iter().map(|n| n.span));
                }
            }
            Node::Expr(Expr::Selector { x, sel }) => {
                if let Expr::Ident(prefix) = x.as_ref() {
                    if let Some(path) = prefix.import_path() {
                        m.insert(prefix.span, resolver.to_url(path, ""));
                        m.insert(sel.span, resolver.to_url(path, &sel.name));
                        return false;
                    }
                }
            }
            Node::Ident(id) => {
                if ignore.contains(&id.span) {
                    return false;
                }
                if id.binding.is_none() && is_predeclared(&id.name) {
                    m.insert(id.span, resolver.to_url(BUILTIN_PACKAGE, &id.name));
                } else if id
                    .object()
                    .is_some_and(|obj| resolver.index().is_top_level(obj))
                {
                    m.insert(id.span, format!("#{}", id.name));
                }
            }
            _ => {}
        }
        true
    });
    m
}
