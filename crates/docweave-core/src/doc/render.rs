//! Page rendering
//!
//! [`Renderer`] owns the state shared by every unit on a page and turns doc
//! comments, declarations and examples into HTML.

use serde::Serialize;

use crate::ast::{Decl, Expr, Spec};
use crate::config::RenderOptions;
use crate::printer::Printer;

use super::blocks::{doc_to_blocks, heading_id, parse_links, Block, Link};
use super::decl::DeclFormatter;
use super::example::{format_example_code, Example};
use super::html::Html;
use super::linkify::format_line_html;
use super::resolver::{IdentifierResolver, PackageUrl, PageIndex, PrefixUrl};

const EXAMPLE_PLACEHOLDER: &str =
    "<pre class=\"Documentation-exampleCode\">Error rendering example code.</pre>";

/// A rendered doc comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocHtml {
    pub html: Html,
    /// Links collected from a "Links" section
    pub links: Vec<Link>,
}

/// A rendered declaration and its documentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeclHtml {
    pub doc: DocHtml,
    pub decl: Html,
}

/// Renders the units of one documentation page
pub struct Renderer {
    index: PageIndex,
    urls: Box<dyn PackageUrl>,
    options: RenderOptions,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("index", &self.index)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Create a renderer; package URLs are built from
    /// [`RenderOptions::package_url_prefix`]
    #[must_use]
    pub fn new(index: PageIndex, options: RenderOptions) -> Self {
        let urls = Box::new(PrefixUrl::new(options.package_url_prefix.clone()));
        Self {
            index,
            urls,
            options,
        }
    }

    /// Create a renderer for a page made of `decls`
    #[must_use]
    pub fn for_decls<'a>(decls: impl IntoIterator<Item = &'a Decl>, options: RenderOptions) -> Self {
        Self::new(PageIndex::from_decls(decls), options)
    }

    /// Replace the package URL scheme
    #[must_use]
    pub fn with_package_url(mut self, urls: impl PackageUrl + 'static) -> Self {
        self.urls = Box::new(urls);
        self
    }

    #[must_use]
    pub fn index(&self) -> &PageIndex {
        &self.index
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn resolver(&self) -> IdentifierResolver<'_> {
        IdentifierResolver::new(&self.index, self.urls.as_ref())
    }

    /// Render a doc comment
    #[must_use]
    pub fn doc_html(&self, text: &str) -> DocHtml {
        let resolver = self.resolver();
        let hotlink = (!self.options.disable_hotlinking).then_some(&resolver);

        let blocks = doc_to_blocks(text);
        let mut out = DocHtml::default();
        let mut in_links = false;
        for block in &blocks {
            match block {
                Block::Heading { title } => {
                    if self.options.extract_links && title == "Links" {
                        in_links = true;
                        continue;
                    }
                    in_links = false;
                    self.push_heading(&mut out.html, title);
                }
                Block::Paragraph { lines } | Block::Preformat { lines } if in_links => {
                    out.links.extend(parse_links(lines));
                }
                Block::Paragraph { lines } => {
                    out.html.push_static("<p>");
                    push_lines(&mut out.html, lines, hotlink);
                    out.html.push_static("</p>\n");
                }
                Block::Preformat { lines } => {
                    out.html.push_static("<pre>");
                    push_lines(&mut out.html, lines, None);
                    out.html.push_static("</pre>\n");
                }
            }
        }
        tracing::debug!(
            target: "docweave::render",
            blocks = blocks.len(),
            links = out.links.len(),
            "rendered doc comment"
        );
        out
    }

    fn push_heading(&self, html: &mut Html, title: &str) {
        let id = heading_id(title);
        html.push(&Html::heading_open(&id));
        html.push_escaped(title);
        if !self.options.disable_permalinks {
            html.push_escaped(" ");
            html.push(&Html::permalink(&id));
        }
        html.push_static("</h3>\n");
    }

    /// Render a declaration with its doc comment
    #[must_use]
    pub fn decl_html(&self, doc: &str, decl: &Decl) -> DeclHtml {
        let formatter = DeclFormatter::new(self.resolver(), &self.options.anchors, self.options.trim)
            .hotlinking(!self.options.disable_hotlinking);
        let html = DeclHtml {
            doc: self.doc_html(doc),
            decl: formatter.format(decl),
        };
        tracing::debug!(target: "docweave::render", decl = %synopsis(decl), "rendered declaration");
        html
    }

    /// Render the code of an example
    ///
    /// Failures are logged and replaced by a fixed placeholder.
    #[must_use]
    pub fn code_html(&self, example: &Example) -> Html {
        match format_example_code(example.code.as_deref()) {
            Ok(segments) => segments.to_html(),
            Err(err) => {
                tracing::warn!(
                    target: "docweave::render",
                    "example {:?}: {err}",
                    example.name
                );
                Html::from_static(EXAMPLE_PLACEHOLDER)
            }
        }
    }

    /// One-line summary of a declaration
    #[must_use]
    pub fn synopsis(&self, decl: &Decl) -> String {
        synopsis(decl)
    }
}

fn push_lines(html: &mut Html, lines: &[String], resolver: Option<&IdentifierResolver<'_>>) {
    for line in lines {
        html.push(&format_line_html(line, resolver));
        html.push_escaped("\n");
    }
}

/// One-line summary of a declaration
///
/// Functions print their signature; types print their name and either the
/// `struct`/`interface` keyword or the full type; value and import specs
/// print their names or paths, parenthesized when grouped.
#[must_use]
pub fn synopsis(decl: &Decl) -> String {
    match decl {
        Decl::Func(func) => Printer::print_func_signature(func).text,
        Decl::Gen(gen_decl) => {
            let parts: Vec<String> = gen_decl.specs.iter().map(spec_synopsis).collect();
            if gen_decl.is_grouped() {
                format!("{} ({})", gen_decl.kind.as_str(), parts.join(", "))
            } else {
                format!("{} {}", gen_decl.kind.as_str(), parts.join(", "))
            }
        }
    }
}

fn spec_synopsis(spec: &Spec) -> String {
    match spec {
        Spec::Import(s) => match &s.name {
            Some(name) => format!("{} {}", name.name, s.path.value),
            None => s.path.value.clone(),
        },
        Spec::Value(s) => s
            .names
            .iter()
            .map(|n| n.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        Spec::Type(s) => {
            let ty = match &s.ty {
                Expr::StructType(_) => "struct".to_string(),
                Expr::InterfaceType(_) => "interface".to_string(),
                other => Printer::print_expr(other).text,
            };
            if s.alias {
                format!("{} = {ty}", s.name.name)
            } else {
                format!("{} {ty}", s.name.name)
            }
        }
    }
}
