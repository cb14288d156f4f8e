//! docweave - annotated HTML for declarations and doc comments
//!
//! This crate provides:
//! - Lexer: tokenization of printed declarations and example code
//! - AST: the declaration trees handed in by a parser
//! - Printer: canonical source for declarations, with identifier positions
//! - Doc: comment segmentation, inline linking, declaration annotation and
//!   example formatting
//! - Config: render options loaded from TOML

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of printed source
pub mod lexer;

/// Declaration trees
pub mod ast;

/// Canonical declaration printer
pub mod printer;

/// Documentation rendering
pub mod doc;

/// Render options
pub mod config;

/// Rendering errors
pub mod error;

/// Convenience re-export of the page renderer
pub use doc::{DeclHtml, DocHtml, Renderer};

/// Convenience re-export of render options
pub use config::{ConfigError, RenderOptions};

pub use error::RenderError;
