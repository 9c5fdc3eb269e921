//! Error types for grid construction and pieces-file parsing.
//!
//! Programmer errors (out-of-bounds access, oversized sub-grid extraction,
//! plane injection on a non-cube grid) are not represented here: they
//! `panic!` with a diagnostic at the call site, per the taxonomy in
//! SPEC_FULL.md §7. Only input-shape errors that a caller can reasonably
//! recover from are typed.

use thiserror::Error;

/// Errors raised while constructing a [`crate::grid::Grid2D`] or
/// [`crate::grid3d::Grid3D`] from a textual spec, or while assembling a
/// puzzle from a dimensions + piece-name string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid spec is not rectangular: row {row} has width {width}, expected {expected}")]
    NotRectangular {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("grid spec contains no rows")]
    Empty,

    #[error(
        "puzzle total cell count ({total}) does not equal board size ({board}); solver will find zero solutions"
    )]
    AreaMismatch { total: usize, board: usize },

    #[error("unknown piece {name:?} in puzzle spec")]
    UnknownPiece { name: char },
}

/// Errors raised while parsing a pieces file (§6 "Pieces file").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PiecesFileError {
    #[error("line {line}: `piece` stanza has no name character")]
    MissingName { line: usize },

    #[error("line {line}: piece {name:?} already has two shapes (chiral pair max)")]
    TooManyShapes { line: usize, name: char },

    #[error("line {line}: piece {name:?} has an empty shape")]
    EmptyShape { line: usize, name: char },

    #[error("line {line}: piece {name:?} shape is not rectangular: {source}")]
    BadShape {
        line: usize,
        name: char,
        source: GridError,
    },

    #[error("line {line}: `rotate` value {value} is not one of 1, 2, 4")]
    BadRotate { line: usize, value: i64 },

    #[error("line {line}: `rotate` value is not a valid integer: {text:?}")]
    BadRotateSyntax { line: usize, text: String },

    #[error("line {line}: `color` value {text:?} is not six hex digits")]
    BadColor { line: usize, text: String },
}
