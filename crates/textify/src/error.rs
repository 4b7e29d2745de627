//! Error types for HTML to text conversion.

use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors that can occur while loading or rendering a document.
///
/// Rendering a well-formed element tree never fails; errors come from the
/// HTML front-end or from addressing a node that is not in the tree.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// HTML parsing error
    #[error("HTML parsing error: {0}")]
    ParseError(String),

    /// I/O error while reading markup
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested node does not exist or is not an element
    #[error("node {0} is not an element of this document")]
    InvalidNode(usize),
}
