//! Expression, type, field and statement nodes

use crate::lexer::Span;

use super::{CommentGroup, Ident};

/// Kind of a basic literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// A literal token: number, character or string
///
/// `value` holds the literal as written, including quotes or backticks.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub span: Span,
}

impl BasicLit {
    /// Create a new literal
    #[must_use]
    pub fn new(kind: LitKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Is this a raw (backtick-delimited) string literal
    #[must_use]
    pub fn is_raw_string(&self) -> bool {
        self.kind == LitKind::String && self.value.starts_with('`')
    }

    /// The value with its delimiters removed (strings only, no unescaping)
    #[must_use]
    pub fn unquoted(&self) -> &str {
        let v = self.value.as_str();
        if self.kind != LitKind::String || v.len() < 2 {
            return v;
        }
        &v[1..v.len() - 1]
    }
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// An expression or type expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier: `x`
    Ident(Ident),
    /// Literal: `42`, `"s"`
    BasicLit(BasicLit),
    /// Composite literal: `T{a, b}` (type may be elided inside another literal)
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
    },
    /// Key/value pair inside a composite literal: `k: v`
    KeyValue { key: Box<Expr>, value: Box<Expr> },
    /// Function literal: `func(x int) int { ... }`
    FuncLit { ty: FuncType, body: Block },
    /// Parenthesized expression: `(x)`
    Paren(Box<Expr>),
    /// Selector: `x.sel`
    Selector { x: Box<Expr>, sel: Ident },
    /// Index or instantiation: `x[i]`, `T[K, V]`
    Index { x: Box<Expr>, indices: Vec<Expr> },
    /// Pointer type or dereference: `*x`
    Star(Box<Expr>),
    /// Unary expression: `-x`, `&x`, `<-ch`
    Unary { op: String, x: Box<Expr> },
    /// Binary expression: `a + b`
    Binary {
        x: Box<Expr>,
        op: String,
        y: Box<Expr>,
    },
    /// Call: `f(a, b...)`
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
    },
    /// Variadic parameter type or `[...]` array length: `...T`
    Ellipsis(Option<Box<Expr>>),
    /// Array or slice type: `[N]T`, `[]T`
    ArrayType {
        len: Option<Box<Expr>>,
        elem: Box<Expr>,
    },
    /// Struct type
    StructType(FieldList),
    /// Interface type (methods and embedded types)
    InterfaceType(FieldList),
    /// Function type: `func(int) error`
    FuncType(FuncType),
    /// Map type: `map[K]V`
    MapType { key: Box<Expr>, value: Box<Expr> },
    /// Channel type: `chan T`, `chan<- T`, `<-chan T`
    ChanType { dir: ChanDir, value: Box<Expr> },
}

impl Expr {
    /// Identifier expression
    #[must_use]
    pub fn ident(ident: Ident) -> Self {
        Self::Ident(ident)
    }

    /// Selector expression `x.sel`
    #[must_use]
    pub fn selector(x: Expr, sel: Ident) -> Self {
        Self::Selector {
            x: Box::new(x),
            sel,
        }
    }

    /// Pointer type `*x`
    #[must_use]
    pub fn star(x: Expr) -> Self {
        Self::Star(Box::new(x))
    }

    /// Slice type `[]elem`
    #[must_use]
    pub fn slice(elem: Expr) -> Self {
        Self::ArrayType {
            len: None,
            elem: Box::new(elem),
        }
    }

    /// Map type `map[key]value`
    #[must_use]
    pub fn map(key: Expr, value: Expr) -> Self {
        Self::MapType {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Call expression `fun(args)`
    #[must_use]
    pub fn call(fun: Expr, args: Vec<Expr>) -> Self {
        Self::Call {
            fun: Box::new(fun),
            args,
            ellipsis: false,
        }
    }

    /// Binary expression
    #[must_use]
    pub fn binary(x: Expr, op: impl Into<String>, y: Expr) -> Self {
        Self::Binary {
            x: Box::new(x),
            op: op.into(),
            y: Box::new(y),
        }
    }

    /// Composite literal `ty{elts}`
    #[must_use]
    pub fn composite(ty: Option<Expr>, elts: Vec<Expr>) -> Self {
        Self::CompositeLit {
            ty: ty.map(Box::new),
            elts,
        }
    }

    /// Key/value element `key: value`
    #[must_use]
    pub fn key_value(key: Expr, value: Expr) -> Self {
        Self::KeyValue {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

/// A list of fields: struct fields, interface methods, parameters or results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub list: Vec<Field>,
}

impl FieldList {
    /// Create a field list
    #[must_use]
    pub fn new(list: Vec<Field>) -> Self {
        Self { list }
    }

    /// Check if there are no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of declared entries (each name counts, unnamed fields count once)
    #[must_use]
    pub fn num_fields(&self) -> usize {
        self.list.iter().map(|f| f.names.len().max(1)).sum()
    }
}

/// One field, method, parameter or result
///
/// An empty `names` list means an embedded field (structs), an embedded
/// interface (interfaces) or an unnamed parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub doc: Option<CommentGroup>,
    pub names: Vec<Ident>,
    pub ty: Expr,
    pub tag: Option<BasicLit>,
    pub comment: Option<CommentGroup>,
}

impl Field {
    /// Create a named field
    #[must_use]
    pub fn new(names: Vec<Ident>, ty: Expr) -> Self {
        Self {
            doc: None,
            names,
            ty,
            tag: None,
            comment: None,
        }
    }

    /// Create an unnamed (embedded) field
    #[must_use]
    pub fn embedded(ty: Expr) -> Self {
        Self::new(Vec::new(), ty)
    }

    /// Attach a doc comment printed above the field
    #[must_use]
    pub fn with_doc(mut self, doc: CommentGroup) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Attach a trailing comment printed after the field
    #[must_use]
    pub fn with_comment(mut self, comment: CommentGroup) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Attach a struct tag
    #[must_use]
    pub fn with_tag(mut self, tag: BasicLit) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// A function signature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuncType {
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<FieldList>,
}

impl FuncType {
    /// Create a signature
    #[must_use]
    pub fn new(params: FieldList, results: Option<FieldList>) -> Self {
        Self {
            type_params: None,
            params,
            results,
        }
    }
}

/// A statement inside a function literal or body
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Assignment or short variable declaration (`define`): `a, b := x, y`
    Assign {
        lhs: Vec<Expr>,
        define: bool,
        rhs: Vec<Expr>,
    },
    /// Expression statement
    Expr(Expr),
    /// Return statement
    Return(Vec<Expr>),
}

/// A braced statement list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    /// Create a block
    #[must_use]
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}
