//! Error types for rust-sheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the coordinate and value codecs and by snapshot construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Text that is not a `<letters><digits>` spreadsheet location
    #[error("Malformed location: {0}")]
    MalformedLocation(String),

    /// Text that is not a `Tag(payload)` cell value
    #[error("Malformed cell value: {0}")]
    MalformedCellValue(String),

    /// A position outside the dimensions of a snapshot
    #[error("Position {position} out of bounds ({n_cols} cols, {n_rows} rows)")]
    PositionOutOfBounds {
        position: String,
        n_cols: u32,
        n_rows: u32,
    },

    /// The same position was given a value twice
    #[error("Duplicate cell: {0}")]
    DuplicateCell(String),
}

impl Error {
    pub(crate) fn location<S: Into<String>>(msg: S) -> Self {
        Error::MalformedLocation(msg.into())
    }

    pub(crate) fn cell_value<S: Into<String>>(msg: S) -> Self {
        Error::MalformedCellValue(msg.into())
    }
}
