//! Command-line surface: argument parsing and puzzle-spec resolution.
//!
//! Grounded in the teacher's `clap`-derived `Cli`/`Subcommand` in
//! `main.rs`, generalized from a fixed 3x3x3 puzzle to runtime `--dims`
//! and a `--play` piece multiset string (spec.md §6 "CLI surface").

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::GridError;
use crate::piece::Piece;

#[derive(Parser)]
#[command(name = "grid-cover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Solve a puzzle and write solutions to disk.
    Solve {
        /// Path to a pieces file (see `crate::pieces_file`).
        #[arg(long)]
        pieces: PathBuf,

        /// Board dimensions: `WxH` for 2D, `WxHxD` for 3D.
        #[arg(long)]
        dims: String,

        /// Piece multiset: one character per placement, e.g. `otzvI`.
        #[arg(long)]
        play: String,

        /// Stop after this many solutions (0 means unbounded).
        #[arg(long, default_value_t = 0)]
        max: usize,

        /// Only count solutions; don't keep or render them.
        #[arg(long, default_value_t = false)]
        count_only: bool,

        /// Render at most this many solutions to PNG (0 means none).
        #[arg(long, default_value_t = 0)]
        write: usize,

        /// Output directory for rendered PNGs and solution dumps.
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Enable debug-level logging regardless of `RUST_LOG`.
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
    /// Print the number of solutions recorded in a saved solutions file.
    Count {
        #[arg(long, default_value = "solutions.bin")]
        bin: PathBuf,
    },
}

/// Resolved board dimensionality and extent, parsed from `--dims`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dims {
    TwoD { w: usize, h: usize },
    ThreeD { w: usize, h: usize, d: usize },
}

/// Parses `WxH` or `WxHxD` into a [`Dims`].
pub fn parse_dims(text: &str) -> Result<Dims, String> {
    let parts: Vec<&str> = text.split('x').collect();
    let parse_one = |s: &str| s.parse::<usize>().map_err(|_| format!("invalid dimension {s:?} in {text:?}"));
    match parts.as_slice() {
        [w, h] => Ok(Dims::TwoD {
            w: parse_one(w)?,
            h: parse_one(h)?,
        }),
        [w, h, d] => Ok(Dims::ThreeD {
            w: parse_one(w)?,
            h: parse_one(h)?,
            d: parse_one(d)?,
        }),
        _ => Err(format!("dims {text:?} must be WxH or WxHxD")),
    }
}

/// Resolves a `--play` multiset string against a parsed pieces map,
/// cloning one `Piece` per character in the string's order (order feeds
/// directly into coverage-matrix column order, and from there into
/// deterministic solution ordering — see spec.md §8).
pub fn build_multiset(
    play: &str,
    pieces: &std::collections::HashMap<char, Piece>,
) -> Result<Vec<Piece>, GridError> {
    play.chars()
        .map(|name| pieces.get(&name).cloned().ok_or(GridError::UnknownPiece { name }))
        .collect()
}

/// Validates that a puzzle's total piece area matches its board size,
/// per spec.md §7's "area mismatch is a reportable input error, not a
/// panic" guidance.
pub fn check_area(pieces: &[Piece], board_cells: usize) -> Result<(), GridError> {
    let total: usize = pieces.iter().map(Piece::cell_count).sum();
    if total != board_cells {
        return Err(GridError::AreaMismatch {
            total,
            board: board_cells,
        });
    }
    Ok(())
}

/// Explicit run configuration threaded through the solve path, replacing
/// any notion of a global mutable debug flag (spec.md §9's design note;
/// see DESIGN.md).
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub max: usize,
    pub count_only: bool,
    pub debug: bool,
}
