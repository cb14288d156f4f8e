//! Annotated declaration HTML
//!
//! A declaration is printed in canonical form and re-tokenized. Walking the
//! tokens, identifiers picked up from the tree get their reference links,
//! comments are wrapped and linkified, and definition anchors are collected
//! per line. Anchors are then hoisted over leading doc comments and emitted
//! as `<span id>` wrappers around their lines.

use crate::ast::Decl;
use crate::lexer::{Lexer, LineIndex, TokenKind};
use crate::printer::Printer;

use super::anchors::{anchor_links, anchor_points, AnchorPoint, AnchorPolicy};
use super::html::Html;
use super::linkify::format_line_html;
use super::resolver::IdentifierResolver;
use super::trim::TrimLimits;

const CODE_LINE: u8 = 1 << 0;
const COMMENT_LINE: u8 = 1 << 1;

/// Formats declarations as annotated HTML
#[derive(Debug, Clone, Copy)]
pub struct DeclFormatter<'a> {
    resolver: IdentifierResolver<'a>,
    policy: &'a AnchorPolicy,
    limits: TrimLimits,
    hotlinking: bool,
}

impl<'a> DeclFormatter<'a> {
    /// Create a formatter with hotlinking in comments enabled
    #[must_use]
    pub fn new(resolver: IdentifierResolver<'a>, policy: &'a AnchorPolicy, limits: TrimLimits) -> Self {
        Self {
            resolver,
            policy,
            limits,
            hotlinking: true,
        }
    }

    /// Enable or disable identifier linking inside comments
    #[must_use]
    pub fn hotlinking(mut self, enabled: bool) -> Self {
        self.hotlinking = enabled;
        self
    }

    /// Render `decl` as annotated, line-preserving HTML
    #[must_use]
    pub fn format(&self, decl: &Decl) -> Html {
        let points = anchor_points(decl);
        let links = anchor_links(decl, &self.resolver);

        let mut decl = decl.clone();
        self.limits.apply(&mut decl);
        let printed = Printer::print_decl(&decl);
        let src = printed.text.as_str();

        let (tokens, errors) = Lexer::tokenize(src);
        if let Some(err) = errors.first() {
            tracing::warn!(target: "docweave::decl", "re-tokenizing printed declaration: {err}");
            return Html::error(&format!("formatting declaration: {err}"));
        }

        let lines = LineIndex::new(src);
        let num_lines = lines.line_count();
        let mut anchor_lines: Vec<Vec<&AnchorPoint>> = vec![Vec::new(); num_lines];
        let mut line_kinds = vec![0u8; num_lines];
        let mut html_lines = vec![Html::new(); num_lines];
        let comment_resolver = self.hotlinking.then_some(&self.resolver);

        let mut last_offset = 0;
        for tok in &tokens {
            let offset = tok.offset();
            let line = lines.line(offset);

            let prev = &src[last_offset..offset];
            let mut n = line.saturating_sub(prev.matches('\n').count());
            for piece in prev.split_inclusive('\n') {
                html_lines[n].push_escaped(piece);
                if piece.ends_with('\n') {
                    n += 1;
                }
            }
            last_offset = offset;

            let kind = match tok.kind {
                TokenKind::Eof => break,
                TokenKind::LineComment | TokenKind::BlockComment => {
                    let html = &mut html_lines[line];
                    html.push_static("<span class=\"comment\">");
                    html.push(&format_line_html(&tok.lexeme, comment_resolver));
                    html.push_static("</span>");
                    last_offset += tok.lexeme.len();
                    COMMENT_LINE
                }
                TokenKind::Ident => {
                    match printed.ident_at(offset) {
                        Some(span) => {
                            if let Some(point) = points.get(&span) {
                                anchor_lines[line].push(point);
                            }
                            if let Some(href) = links.get(&span) {
                                html_lines[line].push(&Html::link(href, &tok.lexeme));
                                last_offset += tok.lexeme.len();
                            }
                        }
                        None => tracing::warn!(
                            target: "docweave::decl",
                            "identifier {:?} at offset {offset} has no tree node",
                            tok.lexeme
                        ),
                    }
                    CODE_LINE
                }
                _ => CODE_LINE,
            };
            let spanned = tok.lexeme.trim_end_matches('\n').matches('\n').count();
            for k in &mut line_kinds[line..=(line + spanned).min(num_lines - 1)] {
                *k |= kind;
            }
        }

        hoist_anchors(&mut anchor_lines, &line_kinds);

        let has_receiver = decl.has_receiver();
        let mut out = Html::new();
        for (anchors, html) in anchor_lines.iter().zip(&html_lines) {
            let mut open = 0;
            for point in anchors {
                if self.policy.emits(point.kind, has_receiver) {
                    out.push(&Html::anchor_open(&point.id, point.kind.as_str()));
                    open += 1;
                }
            }
            out.push(html);
            for _ in 0..open {
                out.push_static("</span>");
            }
        }
        out
    }
}

/// Move anchors up over the comment lines directly above them
///
/// Only an anchor line followed by a line without anchors (or by nothing)
/// moves, so that runs of consecutive anchored lines keep their places.
fn hoist_anchors<T>(anchor_lines: &mut [Vec<T>], line_kinds: &[u8]) {
    let n = anchor_lines.len();
    for i in 0..n {
        if i + 1 == n || anchor_lines[i + 1].is_empty() {
            let mut j = i;
            while j > 0 && line_kinds[j - 1] == COMMENT_LINE {
                j -= 1;
            }
            anchor_lines.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        CommentGroup, Expr, Field, FieldList, FuncDecl, FuncType, GenDecl, GenKind, ObjectId,
        Spec, TreeBuilder, TypeSpec, ValueSpec,
    };
    use crate::doc::resolver::{PageIndex, PrefixUrl};

    fn render(decl: &Decl, index: &PageIndex, policy: &AnchorPolicy) -> String {
        let urls = PrefixUrl::default();
        let resolver = IdentifierResolver::new(index, &urls);
        DeclFormatter::new(resolver, policy, TrimLimits::default())
            .format(decl)
            .into_string()
    }

    #[test]
    fn test_field_anchor_hoists_over_doc_comment() {
        let mut b = TreeBuilder::new();
        let field = Field::new(vec![b.ident("Name")], b.ident_expr("string"))
            .with_doc(CommentGroup::from_lines(["// Name is the key."]));
        let decl = Decl::Gen(GenDecl::new(
            GenKind::Type,
            vec![Spec::Type(TypeSpec::new(
                b.object("T", 1),
                Expr::StructType(FieldList::new(vec![field])),
            ))],
        ));
        assert_eq!(
            render(&decl, &PageIndex::new(), &AnchorPolicy::default()),
            concat!(
                "type T struct {\n",
                r#"<span id="T.Name" data-kind="field">"#,
                "\t<span class=\"comment\">// Name is the key.</span>\n</span>",
                "\tName <a href=\"/builtin#string\">string</a>\n",
                "}",
            )
        );
    }

    #[test]
    fn test_const_group_links_and_anchors() {
        let mut b = TreeBuilder::new();
        let decl = Decl::Gen(GenDecl::new(
            GenKind::Const,
            vec![
                Spec::Value(ValueSpec::new(
                    vec![b.object("A", 1)],
                    Some(Expr::Ident(b.object("Kind", 9))),
                    vec![b.ident_expr("iota")],
                )),
                Spec::Value(ValueSpec::new(vec![b.object("B", 2)], None, Vec::new())),
            ],
        ));
        let mut index = PageIndex::new();
        index.top_level.extend([ObjectId(1), ObjectId(2), ObjectId(9)]);
        assert_eq!(
            render(&decl, &index, &AnchorPolicy::default()),
            concat!(
                "const (\n",
                r#"<span id="A" data-kind="constant">"#,
                "\tA <a href=\"#Kind\">Kind</a> = <a href=\"/builtin#iota\">iota</a>",
                "\n</span>",
                r#"<span id="B" data-kind="constant">"#,
                "\tB\n</span>",
                ")",
            )
        );
    }

    #[test]
    fn test_method_anchors_follow_policy() {
        let mut b = TreeBuilder::new();
        let recv = FieldList::new(vec![Field::new(
            vec![b.ident("r")],
            Expr::star(Expr::Ident(b.object("Reader", 1))),
        )]);
        let decl = Decl::Func(FuncDecl::new(b.ident("Reset"), FuncType::default()).with_receiver(recv));
        let mut index = PageIndex::new();
        index.top_level.insert(ObjectId(1));

        let plain = render(&decl, &index, &AnchorPolicy::default());
        assert_eq!(plain, r##"func (r *<a href="#Reader">Reader</a>) Reset()"##);

        let anchored = render(&decl, &index, &AnchorPolicy::all());
        assert_eq!(
            anchored,
            format!(r#"<span id="Reader.Reset" data-kind="method">{plain}</span>"#)
        );
    }

    #[test]
    fn test_strings_and_comments_are_escaped() {
        let mut b = TreeBuilder::new();
        let decl = Decl::Gen(GenDecl::new(
            GenKind::Var,
            vec![Spec::Value(
                ValueSpec::new(
                    vec![b.object("Sep", 1)],
                    None,
                    vec![Expr::BasicLit(b.string("<&>"))],
                )
                .with_comment(CommentGroup::from_lines(["// see https://go.dev"])),
            )],
        ));
        assert_eq!(
            render(&decl, &PageIndex::new(), &AnchorPolicy::all()),
            concat!(
                r#"<span id="Sep" data-kind="variable">"#,
                "var Sep = &#34;&lt;&amp;&gt;&#34; ",
                r#"<span class="comment">// see <a href="https://go.dev">https://go.dev</a></span>"#,
                "</span>",
            )
        );
    }

    #[test]
    fn test_malformed_identifier_renders_error() {
        let mut b = TreeBuilder::new();
        let decl = Decl::Gen(GenDecl::new(
            GenKind::Var,
            vec![Spec::Value(ValueSpec::new(
                vec![b.object("X", 1)],
                Some(b.ident_expr("in$t")),
                Vec::new(),
            ))],
        ));
        let out = render(&decl, &PageIndex::new(), &AnchorPolicy::all());
        assert!(out.starts_with("[formatting declaration: unexpected character at "));
        assert!(out.ends_with(']'));
    }

    #[test]
    fn test_hoist_stops_at_code() {
        let mut lines = vec![vec![], vec![], vec!["x"], vec![]];
        let kinds = [CODE_LINE, COMMENT_LINE, CODE_LINE, CODE_LINE];
        hoist_anchors(&mut lines, &kinds);
        assert_eq!(lines, vec![vec![], vec!["x"], vec![], vec![]]);
    }

    #[test]
    fn test_hoist_keeps_consecutive_anchors() {
        let mut lines = vec![vec![], vec!["a"], vec!["b"], vec![]];
        let kinds = [COMMENT_LINE, CODE_LINE, CODE_LINE, CODE_LINE];
        hoist_anchors(&mut lines, &kinds);
        // "a" is followed by an anchored line and stays; "b" has code above it
        assert_eq!(lines, vec![vec![], vec!["a"], vec!["b"], vec![]]);
    }
}
