//! Tree traversal
//!
//! [`inspect`] walks a tree in source order (preorder, children left to
//! right), calling the callback for each node. Returning `false` from the
//! callback skips that node's children. Identifier expressions are reported
//! once, as [`Node::Ident`].
//!
//! [`VisitMut`] is the mutable counterpart used by rewriting passes.

use super::{
    Block, Decl, Expr, Field, FieldList, FuncType, GenDecl, Ident, Spec, Stmt, TypeSpec,
    ValueSpec,
};

/// A reference to any node in a declaration tree
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Decl(&'a Decl),
    Spec(&'a Spec),
    FieldList(&'a FieldList),
    Field(&'a Field),
    FuncType(&'a FuncType),
    Expr(&'a Expr),
    Ident(&'a Ident),
    Stmt(&'a Stmt),
    Block(&'a Block),
}

/// Walk `node` and its descendants in source order
pub fn inspect<'a, F>(node: Node<'a>, f: &mut F)
where
    F: FnMut(Node<'a>) -> bool,
{
    if !f(node) {
        return;
    }
    match node {
        Node::Decl(Decl::Gen(GenDecl { specs, .. })) => {
            for spec in specs {
                inspect(Node::Spec(spec), f);
            }
        }
        Node::Decl(Decl::Func(func)) => {
            if let Some(recv) = &func.recv {
                inspect(Node::FieldList(recv), f);
            }
            inspect(Node::Ident(&func.name), f);
            inspect(Node::FuncType(&func.ty), f);
            if let Some(body) = &func.body {
                inspect(Node::Block(body), f);
            }
        }
        Node::Spec(Spec::Import(spec)) => {
            if let Some(name) = &spec.name {
                inspect(Node::Ident(name), f);
            }
        }
        Node::Spec(Spec::Value(spec)) => {
            for name in &spec.names {
                inspect(Node::Ident(name), f);
            }
            if let Some(ty) = &spec.ty {
                inspect_expr(ty, f);
            }
            for value in &spec.values {
                inspect_expr(value, f);
            }
        }
        Node::Spec(Spec::Type(spec)) => {
            inspect(Node::Ident(&spec.name), f);
            if let Some(params) = &spec.type_params {
                inspect(Node::FieldList(params), f);
            }
            inspect_expr(&spec.ty, f);
        }
        Node::FieldList(list) => {
            for field in &list.list {
                inspect(Node::Field(field), f);
            }
        }
        Node::Field(field) => {
            for name in &field.names {
                inspect(Node::Ident(name), f);
            }
            inspect_expr(&field.ty, f);
        }
        Node::FuncType(ty) => {
            if let Some(params) = &ty.type_params {
                inspect(Node::FieldList(params), f);
            }
            inspect(Node::FieldList(&ty.params), f);
            if let Some(results) = &ty.results {
                inspect(Node::FieldList(results), f);
            }
        }
        Node::Expr(expr) => walk_expr_children(expr, f),
        Node::Ident(_) => {}
        Node::Stmt(stmt) => match stmt {
            Stmt::Assign { lhs, rhs, .. } => {
                for e in lhs.iter().chain(rhs) {
                    inspect_expr(e, f);
                }
            }
            Stmt::Expr(e) => inspect_expr(e, f),
            Stmt::Return(results) => {
                for e in results {
                    inspect_expr(e, f);
                }
            }
        },
        Node::Block(block) => {
            for stmt in &block.stmts {
                inspect(Node::Stmt(stmt), f);
            }
        }
    }
}

/// Inspect an expression, reporting bare identifiers as [`Node::Ident`]
pub fn inspect_expr<'a, F>(expr: &'a Expr, f: &mut F)
where
    F: FnMut(Node<'a>) -> bool,
{
    match expr {
        Expr::Ident(ident) => inspect(Node::Ident(ident), f),
        _ => inspect(Node::Expr(expr), f),
    }
}

fn walk_expr_children<'a, F>(expr: &'a Expr, f: &mut F)
where
    F: FnMut(Node<'a>) -> bool,
{
    match expr {
        Expr::Ident(_) | Expr::BasicLit(_) => {}
        Expr::CompositeLit { ty, elts } => {
            if let Some(ty) = ty {
                inspect_expr(ty, f);
            }
            for e in elts {
                inspect_expr(e, f);
            }
        }
        Expr::KeyValue { key, value } => {
            inspect_expr(key, f);
            inspect_expr(value, f);
        }
        Expr::FuncLit { ty, body } => {
            inspect(Node::FuncType(ty), f);
            inspect(Node::Block(body), f);
        }
        Expr::Paren(x) | Expr::Star(x) | Expr::Unary { x, .. } => inspect_expr(x, f),
        Expr::Selector { x, sel } => {
            inspect_expr(x, f);
            inspect(Node::Ident(sel), f);
        }
        Expr::Index { x, indices } => {
            inspect_expr(x, f);
            for e in indices {
                inspect_expr(e, f);
            }
        }
        Expr::Binary { x, y, .. } => {
            inspect_expr(x, f);
            inspect_expr(y, f);
        }
        Expr::Call { fun, args, .. } => {
            inspect_expr(fun, f);
            for e in args {
                inspect_expr(e, f);
            }
        }
        Expr::Ellipsis(elt) => {
            if let Some(elt) = elt {
                inspect_expr(elt, f);
            }
        }
        Expr::ArrayType { len, elem } => {
            if let Some(len) = len {
                inspect_expr(len, f);
            }
            inspect_expr(elem, f);
        }
        Expr::StructType(fields) | Expr::InterfaceType(fields) => {
            inspect(Node::FieldList(fields), f);
        }
        Expr::FuncType(ty) => inspect(Node::FuncType(ty), f),
        Expr::MapType { key, value } => {
            inspect_expr(key, f);
            inspect_expr(value, f);
        }
        Expr::ChanType { value, .. } => inspect_expr(value, f),
    }
}

/// Collect every identifier under `node`, in source order
#[must_use]
pub fn idents<'a>(node: Node<'a>) -> Vec<&'a Ident> {
    let mut out = Vec::new();
    inspect(node, &mut |n| {
        if let Node::Ident(id) = n {
            out.push(id);
        }
        true
    });
    out
}

/// Collect every identifier in `expr`, including `expr` itself
#[must_use]
pub fn expr_idents(expr: &Expr) -> Vec<&Ident> {
    let mut out = Vec::new();
    inspect_expr(expr, &mut |n| {
        if let Node::Ident(id) = n {
            out.push(id);
        }
        true
    });
    out
}

/// Mutable visitor over the spec and field nodes of a tree
///
/// The walker descends into every nested type and function literal; the
/// hooks are called before a node's children are visited.
pub trait VisitMut {
    fn visit_value_spec(&mut self, _spec: &mut ValueSpec) {}
    fn visit_field(&mut self, _field: &mut Field) {}
}

/// Drive `v` over every node of `decl`
pub fn walk_decl_mut<V: VisitMut + ?Sized>(v: &mut V, decl: &mut Decl) {
    match decl {
        Decl::Gen(gen_decl) => {
            for spec in &mut gen_decl.specs {
                match spec {
                    Spec::Import(_) => {}
                    Spec::Value(spec) => {
                        v.visit_value_spec(spec);
                        if let Some(ty) = &mut spec.ty {
                            walk_expr_mut(v, ty);
                        }
                        for value in &mut spec.values {
                            walk_expr_mut(v, value);
                        }
                    }
                    Spec::Type(TypeSpec {
                        type_params, ty, ..
                    }) => {
                        if let Some(params) = type_params {
                            walk_fields_mut(v, params);
                        }
                        walk_expr_mut(v, ty);
                    }
                }
            }
        }
        Decl::Func(func) => {
            if let Some(recv) = &mut func.recv {
                walk_fields_mut(v, recv);
            }
            walk_func_type_mut(v, &mut func.ty);
            if let Some(body) = &mut func.body {
                walk_block_mut(v, body);
            }
        }
    }
}

fn walk_fields_mut<V: VisitMut + ?Sized>(v: &mut V, list: &mut FieldList) {
    for field in &mut list.list {
        v.visit_field(field);
        walk_expr_mut(v, &mut field.ty);
    }
}

fn walk_func_type_mut<V: VisitMut + ?Sized>(v: &mut V, ty: &mut FuncType) {
    if let Some(params) = &mut ty.type_params {
        walk_fields_mut(v, params);
    }
    walk_fields_mut(v, &mut ty.params);
    if let Some(results) = &mut ty.results {
        walk_fields_mut(v, results);
    }
}

fn walk_block_mut<V: VisitMut + ?Sized>(v: &mut V, block: &mut Block) {
    for stmt in &mut block.stmts {
        match stmt {
            Stmt::Assign { lhs, rhs, .. } => {
                for e in lhs.iter_mut().chain(rhs.iter_mut()) {
                    walk_expr_mut(v, e);
                }
            }
            Stmt::Expr(e) => walk_expr_mut(v, e),
            Stmt::Return(results) => {
                for e in results {
                    walk_expr_mut(v, e);
                }
            }
        }
    }
}

fn walk_expr_mut<V: VisitMut + ?Sized>(v: &mut V, expr: &mut Expr) {
    match expr {
        Expr::Ident(_) | Expr::BasicLit(_) => {}
        Expr::CompositeLit { ty, elts } => {
            if let Some(ty) = ty {
                walk_expr_mut(v, ty);
            }
            for e in elts {
                walk_expr_mut(v, e);
            }
        }
        Expr::KeyValue { key, value } => {
            walk_expr_mut(v, key);
            walk_expr_mut(v, value);
        }
        Expr::FuncLit { ty, body } => {
            walk_func_type_mut(v, ty);
            walk_block_mut(v, body);
        }
        Expr::Paren(x) | Expr::Star(x) | Expr::Unary { x, .. } | Expr::Selector { x, .. } => {
            walk_expr_mut(v, x);
        }
        Expr::Index { x, indices } => {
            walk_expr_mut(v, x);
            for e in indices {
                walk_expr_mut(v, e);
            }
        }
        Expr::Binary { x, y, .. } => {
            walk_expr_mut(v, x);
            walk_expr_mut(v, y);
        }
        Expr::Call { fun, args, .. } => {
            walk_expr_mut(v, fun);
            for e in args {
                walk_expr_mut(v, e);
            }
        }
        Expr::Ellipsis(elt) => {
            if let Some(elt) = elt {
                walk_expr_mut(v, elt);
            }
        }
        Expr::ArrayType { len, elem } => {
            if let Some(len) = len {
                walk_expr_mut(v, len);
            }
            walk_expr_mut(v, elem);
        }
        Expr::StructType(fields) | Expr::InterfaceType(fields) => walk_fields_mut(v, fields),
        Expr::FuncType(ty) => walk_func_type_mut(v, ty),
        Expr::MapType { key, value } => {
            walk_expr_mut(v, key);
            walk_expr_mut(v, value);
        }
        Expr::ChanType { value, .. } => walk_expr_mut(v, value),
    }
}
