//! Error types for the porder-core library.

use thiserror::Error;

/// Main error type for the porder library.
#[derive(Error, Debug)]
pub enum PorderError {
    /// A builder rejected a callback.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// Rendering the builder's artifact failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by builders while accumulating their artifact.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A product field arrived before any product was begun.
    #[error("cannot set product {field}: no product has been started")]
    NoCurrentProduct { field: &'static str },
}

/// Errors raised while serializing a finished artifact.
#[derive(Error, Debug)]
pub enum RenderError {
    /// XML writer failure.
    #[error("failed to write XML: {0}")]
    Xml(String),

    /// CSV writer failure.
    #[error("failed to write CSV: {0}")]
    Csv(String),

    /// Workbook writer failure.
    #[error("failed to write workbook: {0}")]
    Xlsx(String),

    /// JSON serialization failure.
    #[error("failed to write JSON: {0}")]
    Json(String),

    /// A binary format was requested as text.
    #[error("{0} output is binary and cannot be rendered as text")]
    Binary(&'static str),

    /// A writer produced bytes that are not valid UTF-8.
    #[error("rendered output is not valid UTF-8")]
    Utf8,
}

/// Result type for the porder library.
pub type Result<T> = std::result::Result<T, PorderError>;
