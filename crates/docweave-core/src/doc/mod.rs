//! Documentation rendering
//!
//! Doc comments are segmented into blocks and linkified line by line;
//! declarations are printed, re-tokenized and annotated with definition
//! anchors and reference links; example bodies are split into code and
//! comment segments.

mod anchors;
mod blocks;
mod decl;
mod example;
mod html;
mod linkify;
mod render;
mod resolver;
mod trim;

pub use anchors::{
    anchor_links, anchor_points, validate_dotted_ident, AnchorKind, AnchorPoint, AnchorPolicy,
};
pub use blocks::{doc_to_blocks, heading, heading_id, parse_link, parse_links, Block, Link};
pub use decl::DeclFormatter;
pub use example::{
    example_id, format_example_code, CodeSegment, CodeSegments, Example, ExampleEntry, ExampleSet,
};
pub use html::{escape_html, sanitize_href, Html};
pub use linkify::{convert_quotes, format_line_html};
pub use render::{synopsis, DeclHtml, DocHtml, Renderer};
pub use resolver::{
    is_predeclared, IdentifierResolver, PackageUrl, PageIndex, PrefixUrl, BUILTIN_PACKAGE,
    PREDECLARED_CONSTANTS, PREDECLARED_FUNCS, PREDECLARED_TYPES,
};
pub use trim::{TrimLimits, DEFAULT_MAX_ELEMENTS, DEFAULT_MAX_STRING_SIZE};
