//! Benchmark suite for docweave rendering
//!
//! Covers the two per-line hot paths: linkifying prose and annotating
//! printed declarations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use docweave_core::ast::{
    CommentGroup, Decl, Expr, Field, FieldList, GenDecl, GenKind, Spec, TreeBuilder, TypeSpec,
};
use docweave_core::doc::{format_line_html, IdentifierResolver, PageIndex, PrefixUrl};
use docweave_core::{RenderOptions, Renderer};

const PROSE: &str = "Read reads up to len(p) bytes into p, see io.Reader and \
                     RFC 7230, Section 3.2 or https://example.com/docs/(read) for \"Reader\" details.";

/// Generate a struct declaration with the specified number of fields
fn generate_struct(num_fields: usize) -> Decl {
    let mut b = TreeBuilder::new();
    let fields = (0..num_fields)
        .map(|i| {
            Field::new(vec![b.ident(&format!("Field{i}"))], b.qualified("io", "io", "Reader"))
                .with_doc(CommentGroup::from_lines([format!("// Field{i} reads from io.Reader.")]))
        })
        .collect();
    Decl::Gen(GenDecl::new(
        GenKind::Type,
        vec![Spec::Type(TypeSpec::new(
            b.object("Large", 1),
            Expr::StructType(FieldList::new(fields)),
        ))],
    ))
}

fn bench_linkify(c: &mut Criterion) {
    let index = PageIndex::new()
        .with_import("io", "io")
        .with_target("Reader")
        .with_target("Read");
    let urls = PrefixUrl::default();
    let resolver = IdentifierResolver::new(&index, &urls);

    let mut group = c.benchmark_group("linkify");
    group.throughput(Throughput::Bytes(PROSE.len() as u64));
    group.bench_function("hotlinked", |b| {
        b.iter(|| format_line_html(black_box(PROSE), Some(&resolver)));
    });
    group.bench_function("plain", |b| {
        b.iter(|| format_line_html(black_box(PROSE), None));
    });
    group.finish();
}

fn bench_decl_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("decl_html");

    for size in &[10usize, 100, 1_000] {
        let decl = generate_struct(*size);
        let renderer = Renderer::for_decls([&decl], RenderOptions::default());
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(renderer.decl_html("", &decl)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_linkify, bench_decl_html);
criterion_main!(benches);
