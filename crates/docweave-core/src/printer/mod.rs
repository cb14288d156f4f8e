//! Canonical printer for declaration trees
//!
//! Produces tab-indented, single-spaced source for a declaration:
//! - grouped declarations print one spec per line inside parentheses
//! - struct and interface bodies print one field per line
//! - spec and field doc comments print on their own lines above the entry
//! - trailing comments and struct tags print after the entry
//!
//! The doc comment of an ungrouped declaration is not printed; it belongs to
//! the prose rendered alongside the declaration.
//!
//! Besides the text, the printer records which original identifier it printed
//! at each output offset, so that annotations computed on the tree can be
//! matched against a re-tokenization of the output.

use std::collections::BTreeMap;

use crate::ast::{
    BasicLit, Block, ChanDir, CommentGroup, Decl, Expr, Field, FieldList, FuncDecl, FuncType,
    GenDecl, Ident, ImportSpec, Span, Spec, Stmt, TypeSpec, ValueSpec,
};

const INDENT: &str = "\t";

/// Printed source text and the identifiers it contains
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintedSource {
    /// The printed text, without a trailing newline
    pub text: String,
    /// Printed byte offset of each identifier mapped to its original span
    pub idents: BTreeMap<usize, Span>,
}

impl PrintedSource {
    /// The original span of the identifier printed at `offset`
    #[must_use]
    pub fn ident_at(&self, offset: usize) -> Option<Span> {
        self.idents.get(&offset).copied()
    }
}

/// The declaration printer
#[derive(Debug, Default)]
pub struct Printer {
    /// Output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
    idents: BTreeMap<usize, Span>,
}

impl Printer {
    fn new() -> Self {
        Self {
            at_line_start: true,
            ..Self::default()
        }
    }

    fn finish(self) -> PrintedSource {
        PrintedSource {
            text: self.output,
            idents: self.idents,
        }
    }

    /// Print a declaration
    #[must_use]
    pub fn print_decl(decl: &Decl) -> PrintedSource {
        let mut p = Self::new();
        p.write_decl(decl);
        p.finish()
    }

    /// Print a function's signature without its body
    #[must_use]
    pub fn print_func_signature(func: &FuncDecl) -> PrintedSource {
        let mut p = Self::new();
        p.write_func_header(func);
        p.finish()
    }

    /// Print an expression or type on its own
    #[must_use]
    pub fn print_expr(expr: &Expr) -> PrintedSource {
        let mut p = Self::new();
        p.write_expr(expr);
        p.finish()
    }

    // ==================== Output Helpers ====================

    fn write(&mut self, s: &str) {
        if self.at_line_start && !s.is_empty() {
            self.write_indent();
        }
        self.output.push_str(s);
    }

    fn writeln(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_ident(&mut self, ident: &Ident) {
        if self.at_line_start {
            self.write_indent();
        }
        self.idents.insert(self.output.len(), ident.span);
        self.output.push_str(&ident.name);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
        self.at_line_start = false;
    }

    fn write_separated<T>(&mut self, items: &[T], sep: &str, mut f: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(sep);
            }
            f(self, item);
        }
    }

    // ==================== Comments ====================

    fn write_doc(&mut self, doc: Option<&CommentGroup>) {
        let Some(doc) = doc else { return };
        for comment in &doc.list {
            self.write(&comment.text);
            self.writeln();
        }
    }

    fn write_trailing(&mut self, comment: Option<&CommentGroup>) {
        let Some(group) = comment else { return };
        for comment in &group.list {
            self.write(" ");
            self.write(&comment.text);
        }
    }

    // ==================== Declarations ====================

    fn write_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Gen(gen_decl) => self.write_gen_decl(gen_decl),
            Decl::Func(func) => {
                self.write_func_header(func);
                if let Some(body) = &func.body {
                    self.write(" ");
                    self.write_block(body);
                }
            }
        }
    }

    fn write_gen_decl(&mut self, decl: &GenDecl) {
        self.write(decl.kind.as_str());
        self.write(" ");
        if !decl.is_grouped() {
            if let Some(spec) = decl.specs.first() {
                self.write_spec(spec);
            }
            return;
        }
        self.write("(");
        if decl.specs.is_empty() {
            self.write(")");
            return;
        }
        self.writeln();
        self.indent();
        for spec in &decl.specs {
            self.write_doc(spec_doc(spec));
            self.write_spec(spec);
            self.writeln();
        }
        self.dedent();
        self.write(")");
    }

    fn write_spec(&mut self, spec: &Spec) {
        match spec {
            Spec::Import(s) => self.write_import_spec(s),
            Spec::Value(s) => self.write_value_spec(s),
            Spec::Type(s) => self.write_type_spec(s),
        }
    }

    fn write_import_spec(&mut self, spec: &ImportSpec) {
        if let Some(name) = &spec.name {
            self.write_ident(name);
            self.write(" ");
        }
        self.write_lit(&spec.path);
        self.write_trailing(spec.comment.as_ref());
    }

    fn write_value_spec(&mut self, spec: &ValueSpec) {
        self.write_separated(&spec.names, ", ", Self::write_ident);
        if let Some(ty) = &spec.ty {
            self.write(" ");
            self.write_expr(ty);
        }
        if !spec.values.is_empty() {
            self.write(" = ");
            self.write_separated(&spec.values, ", ", Self::write_expr);
        }
        self.write_trailing(spec.comment.as_ref());
    }

    fn write_type_spec(&mut self, spec: &TypeSpec) {
        self.write_ident(&spec.name);
        if let Some(params) = &spec.type_params {
            self.write_type_params(params);
        }
        self.write(if spec.alias { " = " } else { " " });
        self.write_expr(&spec.ty);
        self.write_trailing(spec.comment.as_ref());
    }

    fn write_func_header(&mut self, func: &FuncDecl) {
        self.write("func ");
        if let Some(recv) = &func.recv {
            self.write("(");
            self.write_params(recv);
            self.write(") ");
        }
        self.write_ident(&func.name);
        self.write_signature(&func.ty);
    }

    // ==================== Signatures ====================

    fn write_signature(&mut self, ty: &FuncType) {
        if let Some(params) = &ty.type_params {
            self.write_type_params(params);
        }
        self.write("(");
        self.write_params(&ty.params);
        self.write(")");
        let Some(results) = &ty.results else { return };
        match results.list.as_slice() {
            [] => {}
            [single] if single.names.is_empty() => {
                self.write(" ");
                self.write_expr(&single.ty);
            }
            _ => {
                self.write(" (");
                self.write_params(results);
                self.write(")");
            }
        }
    }

    fn write_type_params(&mut self, params: &FieldList) {
        self.write("[");
        self.write_params(params);
        self.write("]");
    }

    fn write_params(&mut self, params: &FieldList) {
        self.write_separated(&params.list, ", ", |p, field| {
            if !field.names.is_empty() {
                p.write_separated(&field.names, ", ", Self::write_ident);
                p.write(" ");
            }
            p.write_expr(&field.ty);
        });
    }

    // ==================== Struct and Interface Bodies ====================

    fn write_field_body(&mut self, keyword: &str, fields: &FieldList, interface: bool) {
        self.write(keyword);
        if fields.is_empty() {
            self.write("{}");
            return;
        }
        self.write(" {");
        self.writeln();
        self.indent();
        for field in &fields.list {
            self.write_doc(field.doc.as_ref());
            if interface {
                self.write_interface_elem(field);
            } else {
                self.write_struct_field(field);
            }
            self.writeln();
        }
        self.dedent();
        self.write("}");
    }

    fn write_struct_field(&mut self, field: &Field) {
        if !field.names.is_empty() {
            self.write_separated(&field.names, ", ", Self::write_ident);
            self.write(" ");
        }
        self.write_expr(&field.ty);
        if let Some(tag) = &field.tag {
            self.write(" ");
            self.write_lit(tag);
        }
        self.write_trailing(field.comment.as_ref());
    }

    fn write_interface_elem(&mut self, field: &Field) {
        match (field.names.first(), &field.ty) {
            (Some(name), Expr::FuncType(sig)) => {
                self.write_ident(name);
                self.write_signature(sig);
            }
            _ => self.write_expr(&field.ty),
        }
        self.write_trailing(field.comment.as_ref());
    }

    // ==================== Expressions ====================

    fn write_lit(&mut self, lit: &BasicLit) {
        self.write(&lit.value);
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.write_ident(ident),
            Expr::BasicLit(lit) => self.write_lit(lit),
            Expr::CompositeLit { ty, elts } => {
                if let Some(ty) = ty {
                    self.write_expr(ty);
                }
                self.write("{");
                self.write_separated(elts, ", ", Self::write_expr);
                self.write("}");
            }
            Expr::KeyValue { key, value } => {
                self.write_expr(key);
                self.write(": ");
                self.write_expr(value);
            }
            Expr::FuncLit { ty, body } => {
                self.write("func");
                self.write_signature(ty);
                self.write(" ");
                self.write_block(body);
            }
            Expr::Paren(x) => {
                self.write("(");
                self.write_expr(x);
                self.write(")");
            }
            Expr::Selector { x, sel } => {
                self.write_expr(x);
                self.write(".");
                self.write_ident(sel);
            }
            Expr::Index { x, indices } => {
                self.write_expr(x);
                self.write("[");
                self.write_separated(indices, ", ", Self::write_expr);
                self.write("]");
            }
            Expr::Star(x) => {
                self.write("*");
                self.write_expr(x);
            }
            Expr::Unary { op, x } => {
                self.write(op);
                self.write_expr(x);
            }
            Expr::Binary { x, op, y } => {
                self.write_expr(x);
                self.write(" ");
                self.write(op);
                self.write(" ");
                self.write_expr(y);
            }
            Expr::Call {
                fun,
                args,
                ellipsis,
            } => {
                self.write_expr(fun);
                self.write("(");
                self.write_separated(args, ", ", Self::write_expr);
                if *ellipsis {
                    self.write("...");
                }
                self.write(")");
            }
            Expr::Ellipsis(elt) => {
                self.write("...");
                if let Some(elt) = elt {
                    self.write_expr(elt);
                }
            }
            Expr::ArrayType { len, elem } => {
                self.write("[");
                if let Some(len) = len {
                    self.write_expr(len);
                }
                self.write("]");
                self.write_expr(elem);
            }
            Expr::StructType(fields) => self.write_field_body("struct", fields, false),
            Expr::InterfaceType(fields) => self.write_field_body("interface", fields, true),
            Expr::FuncType(ty) => {
                self.write("func");
                self.write_signature(ty);
            }
            Expr::MapType { key, value } => {
                self.write("map[");
                self.write_expr(key);
                self.write("]");
                self.write_expr(value);
            }
            Expr::ChanType { dir, value } => {
                self.write(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.write_expr(value);
            }
        }
    }

    // ==================== Statements ====================

    fn write_block(&mut self, block: &Block) {
        if block.stmts.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.writeln();
        self.indent();
        for stmt in &block.stmts {
            self.write_stmt(stmt);
            self.writeln();
        }
        self.dedent();
        self.write("}");
    }

    fn write_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { lhs, define, rhs } => {
                self.write_separated(lhs, ", ", Self::write_expr);
                self.write(if *define { " := " } else { " = " });
                self.write_separated(rhs, ", ", Self::write_expr);
            }
            Stmt::Expr(e) => self.write_expr(e),
            Stmt::Return(results) => {
                self.write("return");
                if !results.is_empty() {
                    self.write(" ");
                    self.write_separated(results, ", ", Self::write_expr);
                }
            }
        }
    }
}

fn spec_doc(spec: &Spec) -> Option<&CommentGroup> {
    match spec {
        Spec::Import(s) => s.doc.as_ref(),
        Spec::Value(s) => s.doc.as_ref(),
        Spec::Type(s) => s.doc.as_ref(),
    }
}
