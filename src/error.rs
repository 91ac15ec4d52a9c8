//! Crate error type.

use thiserror::Error;

/// Smallest document width accepted by [`crate::Document::new`].
pub const MIN_DOCUMENT_WIDTH: usize = 50;
/// Largest document width accepted by [`crate::Document::new`].
pub const MAX_DOCUMENT_WIDTH: usize = 200;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document width {width} is outside [{MIN_DOCUMENT_WIDTH}, {MAX_DOCUMENT_WIDTH}]")]
    InvalidWidth { width: usize },

    #[error("table row {row} has {found} cells, expected {expected}")]
    RowShape {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("terminal I/O failed")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
