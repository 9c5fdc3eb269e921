//! Enumerates every distinct placement of a piece within a board.
//!
//! Grounded in `original_source/game/coverage.go`'s `Piece.Positions` /
//! `perms` (2D) and `Piece.Positions3D` (3D, via plane injection and
//! linear-scan duplicate rejection) — see SPEC_FULL.md §4.2.

use rustc_hash::FxHashSet;

use crate::grid::Grid2D;
use crate::grid3d::Grid3D;
use crate::piece::Piece;

/// All distinct full-board placements of `piece` on a `w`x`h` board.
///
/// For each canonical shape, the shape and its first `rotate - 1`
/// clockwise rotations are tried at every translation that fits inside
/// the board. Translations that would fall (even partially) outside the
/// board are skipped — `set_subgrid` makes that a no-op, so such attempts
/// never add a non-empty candidate. Deduplicated by structural equality.
pub fn positions_2d(piece: &Piece, w: usize, h: usize) -> Vec<Grid2D> {
    let mut seen: FxHashSet<Grid2D> = FxHashSet::default();
    let mut out = Vec::new();

    for shape in &piece.shapes {
        let mut rotated = shape.clone();
        for _ in 0..piece.rotate {
            for y in 0..h {
                for x in 0..w {
                    let mut candidate = Grid2D::new_empty(w, h);
                    candidate.set_subgrid(x, y, &rotated);
                    if candidate.is_empty() {
                        continue;
                    }
                    if seen.insert(candidate.clone()) {
                        out.push(candidate);
                    }
                }
            }
            rotated = rotated.rotate_cw();
        }
    }

    out
}

/// All distinct full-board placements of `piece` within a `w`x`h`x`d`
/// cube.
///
/// Each 2D placement on the `w`x`h` slice is injected onto every
/// perpendicular plane along each axis (`set_plane_x/y/z`), for every
/// valid plane index. Many of these injections are congruent for
/// symmetric pieces, so duplicates are rejected by linear scan against
/// the placements accepted so far — acceptable for the few-hundred
/// orientation case the core targets (SPEC_FULL.md §9 notes this should
/// be replaced with hashed canonical forms for much larger cubes, but
/// that is future work, not part of this crate's contract).
pub fn positions_3d(piece: &Piece, w: usize, h: usize, d: usize) -> Vec<Grid3D> {
    let slice_positions = positions_2d(piece, w, h);
    let mut out: Vec<Grid3D> = Vec::new();

    for plane in &slice_positions {
        for z in 0..d {
            let mut cube = Grid3D::new_empty(w, h, d);
            cube.set_plane_z(z, plane);
            push_if_new(&mut out, cube);
        }
        for y in 0..h {
            let mut cube = Grid3D::new_empty(w, h, d);
            cube.set_plane_y(y, plane);
            push_if_new(&mut out, cube);
        }
        for x in 0..w {
            let mut cube = Grid3D::new_empty(w, h, d);
            cube.set_plane_x(x, plane);
            push_if_new(&mut out, cube);
        }
    }

    out
}

fn push_if_new(accepted: &mut Vec<Grid3D>, candidate: Grid3D) {
    if !accepted.iter().any(|g| g == &candidate) {
        accepted.push(candidate);
    }
}
