//! Integration tests for page rendering

use docweave_core::ast::visit::{self, Node};
use docweave_core::ast::{
    CommentGroup, Decl, Expr, Field, FieldList, FuncDecl, FuncType, GenDecl, GenKind, ImportSpec,
    Spec, TreeBuilder, TypeSpec, ValueSpec,
};
use docweave_core::doc::{AnchorPolicy, Example, ExampleSet, Link};
use docweave_core::lexer::{Lexer, TokenKind};
use docweave_core::printer::Printer;
use docweave_core::{RenderOptions, Renderer};

/// A small page: imports, a struct, a constructor, a method and constants
fn page() -> Vec<Decl> {
    let mut b = TreeBuilder::new();

    let imports = Decl::Gen(GenDecl::new(
        GenKind::Import,
        vec![
            Spec::Import(ImportSpec {
                doc: None,
                name: None,
                path: b.string("io"),
                comment: None,
            }),
            Spec::Import(ImportSpec {
                doc: None,
                name: None,
                path: b.string("strings"),
                comment: None,
            }),
        ],
    ));

    let buf = Field::new(vec![b.ident("Buf")], Expr::slice(b.ident_expr("byte")))
        .with_doc(CommentGroup::from_lines(["// Buf holds unread bytes."]));
    let embedded = Field::embedded(b.qualified("io", "io", "Reader"));
    let reader = Decl::Gen(GenDecl::new(
        GenKind::Type,
        vec![Spec::Type(TypeSpec::new(
            b.object("Reader", 1),
            Expr::StructType(FieldList::new(vec![buf, embedded])),
        ))],
    ));

    let new_reader = Decl::Func(FuncDecl::new(
        b.object("NewReader", 2),
        FuncType::new(
            FieldList::new(vec![Field::new(vec![b.ident("s")], b.ident_expr("string"))]),
            Some(FieldList::new(vec![Field::embedded(Expr::star(Expr::Ident(
                b.object("Reader", 1),
            )))])),
        ),
    ));

    let recv = FieldList::new(vec![Field::new(
        vec![b.ident("r")],
        Expr::star(Expr::Ident(b.object("Reader", 1))),
    )]);
    let p = Field::new(vec![b.ident("p")], Expr::slice(b.ident_expr("byte")));
    let results = FieldList::new(vec![
        Field::new(vec![b.ident("n")], b.ident_expr("int")),
        Field::new(vec![b.ident("err")], b.ident_expr("error")),
    ]);
    let read = Decl::Func(
        FuncDecl::new(
            b.object("Read", 3),
            FuncType::new(FieldList::new(vec![p]), Some(results)),
        )
        .with_receiver(recv),
    );

    let sizes = Decl::Gen(GenDecl::new(
        GenKind::Const,
        vec![
            Spec::Value(ValueSpec::new(
                vec![b.object("MinRead", 4)],
                None,
                vec![b.int(512)],
            )),
            Spec::Value(
                ValueSpec::new(
                    vec![b.object("MaxRead", 5)],
                    None,
                    vec![Expr::binary(Expr::Ident(b.object("MinRead", 4)), "*", b.int(64))],
                )
                .with_doc(CommentGroup::from_lines(["// MaxRead is the largest read."])),
            ),
        ],
    ));

    vec![imports, reader, new_reader, read, sizes]
}

#[test]
fn test_every_printed_identifier_is_a_tree_identifier() {
    for decl in page() {
        let printed = Printer::print_decl(&decl);
        let (tokens, errors) = Lexer::tokenize(&printed.text);
        assert!(errors.is_empty(), "{}: {errors:?}", printed.text);

        let ident_tokens: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Ident)
            .collect();
        let tree_idents = visit::idents(Node::Decl(&decl));
        assert_eq!(ident_tokens.len(), tree_idents.len(), "{}", printed.text);
        assert_eq!(printed.idents.len(), tree_idents.len());
        for tok in ident_tokens {
            let span = printed.ident_at(tok.offset()).expect("token has a node");
            assert!(tree_idents.iter().any(|id| id.span == span && id.name == tok.lexeme));
        }
    }
}

#[test]
fn test_struct_decl_html() {
    let decls = page();
    let renderer = Renderer::for_decls(&decls, RenderOptions::default());
    let out = renderer.decl_html(
        "Reader reads from a string.\n\nSee NewReader and strings.Builder.",
        &decls[1],
    );
    assert_eq!(
        out.doc.html.as_str(),
        concat!(
            "<p><a href=\"#Reader\">Reader</a> reads from a ",
            "<a href=\"/builtin#string\">string</a>.\n</p>\n",
            "<p>See <a href=\"#NewReader\">NewReader</a> and ",
            "<a href=\"/strings\">strings</a>.<a href=\"/strings#Builder\">Builder</a>.\n</p>\n",
        )
    );
    assert_eq!(
        out.decl.as_str(),
        concat!(
            "type Reader struct {\n",
            "\t<span class=\"comment\">// Buf holds unread bytes.</span>\n",
            "<span id=\"Reader.Buf\" data-kind=\"field\">",
            "\tBuf []<a href=\"/builtin#byte\">byte</a>\n</span>",
            "<span id=\"Reader.Reader\" data-kind=\"field\">",
            "\t<a href=\"/io\">io</a>.<a href=\"/io#Reader\">Reader</a>\n</span>",
            "}",
        )
    );
}

#[test]
fn test_func_and_method_decl_html() {
    let decls = page();
    let renderer = Renderer::for_decls(&decls, RenderOptions::default());
    assert_eq!(
        renderer.decl_html("", &decls[3]).decl.as_str(),
        concat!(
            "func (r *<a href=\"#Reader\">Reader</a>) Read(p []<a href=\"/builtin#byte\">byte</a>) ",
            "(n <a href=\"/builtin#int\">int</a>, err <a href=\"/builtin#error\">error</a>)",
        )
    );

    let options = RenderOptions {
        anchors: AnchorPolicy::all(),
        ..RenderOptions::default()
    };
    let renderer = Renderer::for_decls(&decls, options);
    assert_eq!(
        renderer.decl_html("", &decls[2]).decl.as_str(),
        concat!(
            "<span id=\"NewReader\" data-kind=\"function\">",
            "func NewReader(s <a href=\"/builtin#string\">string</a>) *<a href=\"#Reader\">Reader</a>",
            "</span>",
        )
    );
}

#[test]
fn test_const_group_anchor_hoists_over_doc() {
    let decls = page();
    let renderer = Renderer::for_decls(&decls, RenderOptions::default());
    assert_eq!(
        renderer.decl_html("", &decls[4]).decl.as_str(),
        concat!(
            "const (\n",
            "<span id=\"MinRead\" data-kind=\"constant\">\tMinRead = 512\n</span>",
            "<span id=\"MaxRead\" data-kind=\"constant\">",
            "\t<span class=\"comment\">// MaxRead is the largest read.</span>\n</span>",
            "\tMaxRead = <a href=\"#MinRead\">MinRead</a> * 64\n",
            ")",
        )
    );
}

#[test]
fn test_synopses() {
    let decls = page();
    let renderer = Renderer::for_decls(&decls, RenderOptions::default());
    let synopses: Vec<String> = decls.iter().map(|d| renderer.synopsis(d)).collect();
    assert_eq!(
        synopses,
        vec![
            "import (\"io\", \"strings\")",
            "type Reader struct",
            "func NewReader(s string) *Reader",
            "func (r *Reader) Read(p []byte) (n int, err error)",
            "const (MinRead, MaxRead)",
        ]
    );
}

#[test]
fn test_examples_render_in_parent_order() {
    let decls = page();
    let renderer = Renderer::for_decls(&decls, RenderOptions::default());
    let set = ExampleSet::collect([
        (
            "Reader.Read",
            Example::new(
                "Reader_Read",
                "",
                "{\n\tr := NewReader(\"abc\")\n\tfmt.Println(r.Buf) // the bytes\n\t// Output: [97 98 99]\n}",
            ),
        ),
        ("", Example::new("", "", "{\n\tfmt.Println(MinRead)\n}")),
        ("Reader.Read", Example::default()),
    ]);

    let ids: Vec<&str> = set.list.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["example-package", "example-Reader.Read", "example-Reader.Read"]
    );

    let html: Vec<String> = set
        .for_parent("Reader.Read")
        .iter()
        .map(|e| renderer.code_html(&e.example).into_string())
        .collect();
    assert_eq!(
        html,
        vec![
            concat!(
                "<pre class=\"Documentation-exampleCode\">",
                "r := NewReader(&#34;abc&#34;)\nfmt.Println(r.Buf) ",
                "<span class=\"comment\">// the bytes</span></pre>",
            )
            .to_string(),
            "<pre class=\"Documentation-exampleCode\">Error rendering example code.</pre>".to_string(),
        ]
    );
}

#[test]
fn test_options_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docweave.toml");
    std::fs::write(
        &path,
        "package_url_prefix = \"https://pkg.example/\"\ndisable_permalinks = true\nextract_links = true\n",
    )
    .unwrap();

    let options = RenderOptions::from_path(&path).unwrap();
    let decls = page();
    let renderer = Renderer::for_decls(&decls, options);
    let doc = renderer.doc_html(
        "Package bufio wraps an io.Reader.\n\nLinks\n\n- Design, https://example.com/design\n\nCaveats\n\nNone.",
    );
    assert_eq!(
        doc.html.as_str(),
        concat!(
            "<p>Package bufio wraps an <a href=\"https://pkg.example/io\">io</a>.",
            "<a href=\"https://pkg.example/io#Reader\">Reader</a>.\n</p>\n",
            "<h3 id=\"hdr-Caveats\">Caveats</h3>\n",
            "<p>None.\n</p>\n",
        )
    );
    assert_eq!(
        doc.links,
        vec![Link {
            text: "Design".to_string(),
            href: "https://example.com/design".to_string(),
        }]
    );
}

#[test]
fn test_missing_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RenderOptions::from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, docweave_core::ConfigError::Io(..)));
}
