//! Reconstructs placements from a solved exact-cover matrix.
//!
//! A DLX solution is a set of row indices into `crate::coverage::Coverage`.
//! This module turns that back into per-piece placement records: which
//! piece, where its bounding box sits on the board, and the piece-local
//! sub-grid occupying it. Grounded in `original_source/game/coverage.go`'s
//! solution-printing path, which performs the same row -> grid -> bounding
//! box recovery.

use crate::coverage::{row_to_grid_2d, row_to_grid_3d, Coverage};
use crate::grid::Grid2D;
use crate::grid3d::Grid3D;
use crate::piece::Piece;

/// One piece's placement on a solved 2D board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement2D {
    pub piece_name: char,
    pub x: usize,
    pub y: usize,
    pub shape: Grid2D,
}

/// One piece's placement within a solved 3D cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement3D {
    pub piece_name: char,
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub shape: Grid3D,
}

/// Decodes a DLX solution (row indices into `cov`) into one placement per
/// selected row, in row order. `w`, `h` are the board dimensions the
/// coverage matrix was built with — the cell-column count alone (`w * h`)
/// doesn't determine them uniquely, so they're passed explicitly.
///
/// Panics if `rows` contains an index out of range for `cov` — an internal
/// consistency error (the solver only ever reports indices it was given),
/// not a reportable input error.
pub fn decode_2d(cov: &Coverage, pieces: &[Piece], rows: &[usize], w: usize, h: usize) -> Vec<Placement2D> {
    rows.iter()
        .map(|&r| {
            let row = &cov.rows[r];
            let piece = &pieces[cov.piece_of[r]];
            let full = row_to_grid_2d(row, cov.num_pieces, w, h);
            let (x, y, bw, bh) = full.bounding_box().expect("selected row covers no cells");
            let shape = full.get_subgrid(x, y, bw, bh);
            Placement2D {
                piece_name: piece.name,
                x,
                y,
                shape,
            }
        })
        .collect()
}

/// Decodes a DLX solution for a 3D cube. `w`, `h`, `d` are the board
/// dimensions the coverage matrix was built with — unlike the 2D case
/// there's no way to recover all three independently from row length
/// alone, so they're passed explicitly.
pub fn decode_3d(
    cov: &Coverage,
    pieces: &[Piece],
    rows: &[usize],
    w: usize,
    h: usize,
    d: usize,
) -> Vec<Placement3D> {
    rows.iter()
        .map(|&r| {
            let row = &cov.rows[r];
            let piece = &pieces[cov.piece_of[r]];
            let full = row_to_grid_3d(row, cov.num_pieces, w, h, d);
            let (x, y, z, bw, bh, bd) = full
                .bounding_box()
                .expect("selected row covers no cells");
            let shape = extract_subcube(&full, x, y, z, bw, bh, bd);
            Placement3D {
                piece_name: piece.name,
                x,
                y,
                z,
                shape,
            }
        })
        .collect()
}

fn extract_subcube(
    full: &Grid3D,
    x0: usize,
    y0: usize,
    z0: usize,
    w: usize,
    h: usize,
    d: usize,
) -> Grid3D {
    let mut sub = Grid3D::new_empty(w, h, d);
    for z in 0..d {
        for y in 0..h {
            for x in 0..w {
                sub.set(x, y, z, full.get(x0 + x, y0 + y, z0 + z));
            }
        }
    }
    sub
}

/// Assembles the full occupied board (not per-piece, the union of every
/// placement) from a 2D solution — useful for rendering and for sanity
/// checks that a solution tiles the board exactly once per cell.
pub fn assemble_board_2d(cov: &Coverage, rows: &[usize], w: usize, h: usize) -> Grid2D {
    let mut board = Grid2D::new_empty(w, h);
    for &r in rows {
        let row = &cov.rows[r];
        let full = row_to_grid_2d(row, cov.num_pieces, w, h);
        for y in 0..h {
            for x in 0..w {
                if full.get(x, y) {
                    board.set(x, y, true);
                }
            }
        }
    }
    board
}

/// Assembles the full occupied cube from a 3D solution.
pub fn assemble_board_3d(cov: &Coverage, rows: &[usize], w: usize, h: usize, d: usize) -> Grid3D {
    let mut board = Grid3D::new_empty(w, h, d);
    for &r in rows {
        let row = &cov.rows[r];
        let full = row_to_grid_3d(row, cov.num_pieces, w, h, d);
        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    if full.get(x, y, z) {
                        board.set(x, y, z, true);
                    }
                }
            }
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::build_2d;
    use crate::dlx::{never_stop, Dlx};

    fn piece_from(name: char, spec: &str, rotate: u8) -> Piece {
        Piece::new(name, vec![Grid2D::from_spec(spec).unwrap()], rotate, [0, 0, 0])
    }

    #[test]
    fn decode_2d_recovers_piece_names_and_full_coverage() {
        let pieces = vec![
            piece_from('a', "##\n", 2),
            piece_from('b', "##\n", 2),
        ];
        let cov = build_2d(&pieces, 2, 2);
        let mut dlx = Dlx::new(&cov.rows, cov.width(), 1, false);
        dlx.search(&never_stop());
        let solution = &dlx.solutions()[0];

        let placements = decode_2d(&cov, &pieces, solution, 2, 2);
        assert_eq!(placements.len(), 2);
        let mut names: Vec<char> = placements.iter().map(|p| p.piece_name).collect();
        names.sort();
        assert_eq!(names, vec!['a', 'b']);

        let board = assemble_board_2d(&cov, solution, 2, 2);
        assert_eq!(board.count(), 4);
    }

    #[test]
    fn assembled_board_matches_union_of_placements() {
        let pieces = vec![piece_from('a', "#\n", 1)];
        let cov = build_2d(&pieces, 1, 1);
        let mut dlx = Dlx::new(&cov.rows, cov.width(), 0, false);
        dlx.search(&never_stop());
        let solution = &dlx.solutions()[0];
        let board = assemble_board_2d(&cov, solution, 1, 1);
        assert!(board.get(0, 0));
    }
}
