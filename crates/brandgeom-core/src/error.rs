//! Error handling for BrandGeom
//!
//! Provides error types for each layer of the overlay engine:
//! - Parse errors (vector source ingestion)
//! - Render errors (surface export and rasterization)
//!
//! Degenerate geometry has no error variant; renderers skip such candidates
//! locally.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Vector source parse error
///
/// Raised when an uploaded vector source cannot be ingested. Ingestion performs
/// no partial recovery, so any of these aborts the whole parse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The document has no `<svg>` root element
    #[error("Invalid vector source: missing <svg> element")]
    MissingSvgRoot,

    /// A tag was opened but never closed with `>`
    #[error("Unterminated tag at byte offset {offset}")]
    UnterminatedTag {
        /// Byte offset of the opening `<`.
        offset: usize,
    },

    /// Path data could not be interpreted
    #[error("Invalid path data in <{element}>: {reason}")]
    InvalidPathData {
        /// The element carrying the path data.
        element: String,
        /// Why the data was rejected.
        reason: String,
    },

    /// A numeric attribute did not parse
    #[error("Invalid number for attribute '{attribute}': {value}")]
    InvalidNumber {
        /// The attribute name.
        attribute: String,
        /// The raw attribute value.
        value: String,
    },

    /// A transform attribute could not be parsed
    #[error("Invalid transform: {value}")]
    InvalidTransform {
        /// The raw transform value.
        value: String,
    },

    /// `</g>` without a matching `<g>`
    #[error("Unbalanced group nesting")]
    UnbalancedGroup,
}

/// Render/export error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Canvas or pixmap dimensions are unusable
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Encoding the rasterized surface failed
    #[error("Encode error: {0}")]
    Encode(String),
}

/// Main error type for BrandGeom
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is a render error
    pub fn is_render_error(&self) -> bool {
        matches!(self, Error::Render(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
