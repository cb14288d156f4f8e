//! Rendering errors

use thiserror::Error;

/// Errors that can occur while rendering a unit of documentation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("example has no code")]
    MissingExampleCode,

    #[error("template failed: {0}")]
    Template(String),
}
