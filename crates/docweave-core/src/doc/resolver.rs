//! Identifier resolution
//!
//! This module decides where a word from prose or a name in a declaration
//! should link to: a declaration on the current page, a symbol in an
//! imported package, a predeclared name, or nowhere.

use std::collections::{HashMap, HashSet};

use crate::ast::{Decl, ObjectId, Spec};

use super::anchors::anchor_points;
use super::html::Html;

/// Predeclared type names
pub const PREDECLARED_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Predeclared constants and the zero value `nil`
pub const PREDECLARED_CONSTANTS: &[&str] = &["true", "false", "iota", "nil"];

/// Predeclared functions
pub const PREDECLARED_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// The package documenting predeclared names
pub const BUILTIN_PACKAGE: &str = "builtin";

/// Is `name` a predeclared identifier
#[must_use]
pub fn is_predeclared(name: &str) -> bool {
    PREDECLARED_TYPES.contains(&name)
        || PREDECLARED_CONSTANTS.contains(&name)
        || PREDECLARED_FUNCS.contains(&name)
}

/// Maps an import path to the URL of its documentation page
pub trait PackageUrl: Send + Sync {
    fn package_url(&self, path: &str) -> String;
}

impl<F> PackageUrl for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn package_url(&self, path: &str) -> String {
        self(path)
    }
}

/// Package pages served under a common prefix: `{prefix}{path}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixUrl {
    prefix: String,
}

impl PrefixUrl {
    /// Create a resolver for pages under `prefix`
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for PrefixUrl {
    fn default() -> Self {
        Self::new("/")
    }
}

impl PackageUrl for PrefixUrl {
    fn package_url(&self, path: &str) -> String {
        format!("{}{path}", self.prefix)
    }
}

/// Page-scoped lookup tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    /// Imported namespace name to import path
    pub imports: HashMap<String, String>,
    /// Anchor IDs defined on the page
    pub targets: HashSet<String>,
    /// Objects declared at the top level of the page
    pub top_level: HashSet<ObjectId>,
}

impl PageIndex {
    /// An empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index for a page from its declarations
    ///
    /// Imports contribute namespaces, every anchor point contributes a
    /// target, and bound declaration names contribute top-level objects.
    #[must_use]
    pub fn from_decls<'a>(decls: impl IntoIterator<Item = &'a Decl>) -> Self {
        let mut index = Self::new();
        for decl in decls {
            index.add_decl(decl);
        }
        index
    }

    fn add_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Gen(gen_decl) => {
                for spec in &gen_decl.specs {
                    match spec {
                        Spec::Import(s) => {
                            self.imports
                                .insert(s.local_name().to_string(), s.path_value().to_string());
                        }
                        Spec::Value(s) => self.top_level.extend(s.names.iter().filter_map(|n| n.object())),
                        Spec::Type(s) => self.top_level.extend(s.name.object()),
                    }
                }
            }
            // Methods are reached through their type, never by name
            Decl::Func(func) if func.recv.is_none() => self.top_level.extend(func.name.object()),
            Decl::Func(_) => {}
        }
        self.targets
            .extend(anchor_points(decl).into_values().map(|p| p.id));
    }

    /// Register an imported namespace
    #[must_use]
    pub fn with_import(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.imports.insert(name.into(), path.into());
        self
    }

    /// Register an anchor target
    #[must_use]
    pub fn with_target(mut self, id: impl Into<String>) -> Self {
        self.targets.insert(id.into());
        self
    }

    /// The import path of namespace `name`
    #[must_use]
    pub fn import_path(&self, name: &str) -> Option<&str> {
        self.imports.get(name).map(String::as_str)
    }

    /// Is `id` an anchor on this page
    #[must_use]
    pub fn is_target(&self, id: &str) -> bool {
        self.targets.contains(id)
    }

    /// Is `id` a top-level object of this page
    #[must_use]
    pub fn is_top_level(&self, id: ObjectId) -> bool {
        self.top_level.contains(&id)
    }
}

/// Turns words and symbols into URLs and links
#[derive(Clone, Copy)]
pub struct IdentifierResolver<'a> {
    index: &'a PageIndex,
    urls: &'a dyn PackageUrl,
}

impl std::fmt::Debug for IdentifierResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierResolver")
            .field("index", self.index)
            .finish_non_exhaustive()
    }
}

impl<'a> IdentifierResolver<'a> {
    /// Create a resolver over a page index
    #[must_use]
    pub fn new(index: &'a PageIndex, urls: &'a dyn PackageUrl) -> Self {
        Self { index, urls }
    }

    /// The page index this resolver consults
    #[must_use]
    pub fn index(&self) -> &'a PageIndex {
        self.index
    }

    /// URL of `symbol` in the package at `path`
    ///
    /// An empty path means the current page; an empty symbol means the
    /// package page itself.
    #[must_use]
    pub fn to_url(&self, path: &str, symbol: &str) -> String {
        match (path.is_empty(), symbol.is_empty()) {
            (true, _) => format!("#{symbol}"),
            (false, true) => self.urls.package_url(path),
            (false, false) => format!("{}#{symbol}", self.urls.package_url(path)),
        }
    }

    /// Render a word from prose, linking it if it names something known
    #[must_use]
    pub fn to_html(&self, word: &str) -> Html {
        if let Some((ns, symbol)) = word.split_once('.') {
            if let Some(path) = self.index.import_path(ns) {
                let mut html = Html::link(&self.to_url(path, ""), ns);
                html.push_escaped(".");
                html.push(&Html::link(&self.to_url(path, symbol), symbol));
                return html;
            }
        }
        if self.index.is_target(word) {
            return Html::link(&self.to_url("", word), word);
        }
        if is_predeclared(word) {
            return Html::link(&self.to_url(BUILTIN_PACKAGE, word), word);
        }
        Html::escape(word)
    }
}
