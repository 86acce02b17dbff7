//! Error types for the hashart library.

use thiserror::Error;

/// Errors surfaced by template construction, field extraction, drawing,
/// and the enabled-pieces registry.
///
/// Draw failures are not retried; after one the canvas contents are
/// unspecified and the caller must treat the whole render as failed.
#[derive(Error, Debug)]
pub enum ArtError {
    #[error("byte template declares no fields")]
    EmptyTemplate,
    #[error("byte template declares {total} bytes, digest holds only 32")]
    TemplateTooWide { total: usize },
    #[error("field {0:?} is not declared by this piece's template")]
    UnknownField(String),
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("registry update would leave no piece enabled")]
    EmptyRegistry,
}
