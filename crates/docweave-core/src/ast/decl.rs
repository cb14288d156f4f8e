//! Top-level declaration nodes

use super::{BasicLit, Block, CommentGroup, Expr, FieldList, FuncType, Ident};

/// Keyword introducing a general declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKind {
    Import,
    Const,
    Var,
    Type,
}

impl GenKind {
    /// The keyword as written in source
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Const => "const",
            Self::Var => "var",
            Self::Type => "type",
        }
    }
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `import`, `const`, `var` or `type` declaration (possibly grouped)
    Gen(GenDecl),
    /// Function or method declaration
    Func(FuncDecl),
}

impl Decl {
    /// Has a receiver (a method declaration)
    #[must_use]
    pub fn has_receiver(&self) -> bool {
        matches!(self, Self::Func(f) if f.recv.as_ref().is_some_and(|r| !r.is_empty()))
    }
}

/// A general declaration
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub kind: GenKind,
    /// Written with parentheses: `const ( ... )`
    pub grouped: bool,
    pub specs: Vec<Spec>,
}

impl GenDecl {
    /// Create a declaration; more than one spec implies a group
    #[must_use]
    pub fn new(kind: GenKind, specs: Vec<Spec>) -> Self {
        Self {
            kind,
            grouped: specs.len() != 1,
            specs,
        }
    }

    /// Printed with parentheses; several specs always need them
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.grouped || self.specs.len() > 1
    }

    /// Force parenthesized output even for a single spec
    #[must_use]
    pub fn grouped(mut self) -> Self {
        self.grouped = true;
        self
    }
}

/// One entry of a general declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `name "path"`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub doc: Option<CommentGroup>,
    pub name: Option<Ident>,
    pub path: BasicLit,
    pub comment: Option<CommentGroup>,
}

impl ImportSpec {
    /// The import path without quotes
    #[must_use]
    pub fn path_value(&self) -> &str {
        self.path.unquoted()
    }

    /// The namespace name the import introduces
    #[must_use]
    pub fn local_name(&self) -> &str {
        match &self.name {
            Some(name) => &name.name,
            None => {
                let path = self.path_value();
                path.rsplit('/').next().unwrap_or(path)
            }
        }
    }
}

/// `names Type = values` inside `const` or `var`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub doc: Option<CommentGroup>,
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
    pub comment: Option<CommentGroup>,
}

impl ValueSpec {
    /// Create a value spec
    #[must_use]
    pub fn new(names: Vec<Ident>, ty: Option<Expr>, values: Vec<Expr>) -> Self {
        Self {
            doc: None,
            names,
            ty,
            values,
            comment: None,
        }
    }

    /// Attach a doc comment
    #[must_use]
    pub fn with_doc(mut self, doc: CommentGroup) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Attach a trailing comment
    #[must_use]
    pub fn with_comment(mut self, comment: CommentGroup) -> Self {
        self.comment = Some(comment);
        self
    }
}

/// `Name[T any] Type` or `Name = Type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub doc: Option<CommentGroup>,
    pub name: Ident,
    pub type_params: Option<FieldList>,
    /// Alias declaration: `type A = B`
    pub alias: bool,
    pub ty: Expr,
    pub comment: Option<CommentGroup>,
}

impl TypeSpec {
    /// Create a type spec
    #[must_use]
    pub fn new(name: Ident, ty: Expr) -> Self {
        Self {
            doc: None,
            name,
            type_params: None,
            alias: false,
            ty,
            comment: None,
        }
    }

    /// Attach a doc comment
    #[must_use]
    pub fn with_doc(mut self, doc: CommentGroup) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// A function or method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    /// Usually stripped before rendering
    pub body: Option<Block>,
}

impl FuncDecl {
    /// Create a function declaration without a body
    #[must_use]
    pub fn new(name: Ident, ty: FuncType) -> Self {
        Self {
            recv: None,
            name,
            ty,
            body: None,
        }
    }

    /// Make this a method on the given receiver
    #[must_use]
    pub fn with_receiver(mut self, recv: FieldList) -> Self {
        self.recv = Some(recv);
        self
    }
}
