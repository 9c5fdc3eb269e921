//! Puzzle piece definitions: canonical shapes, rotational symmetry and
//! display color.

use crate::grid::Grid2D;

/// A named, multi-cell shape with an associated rotational symmetry
/// count and display color.
///
/// A piece carries one canonical shape if it is mirror-symmetric, or two
/// (the shape and its chiral mirror) if it isn't and the puzzle permits
/// chirality. `rotate` is the number of distinct rotations to enumerate
/// per shape: 1 means the shape is rotationally symmetric (no extra
/// rotations beyond the canonical orientation), 2 means half-turn
/// symmetric, 4 means fully asymmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub name: char,
    pub shapes: Vec<Grid2D>,
    pub rotate: u8,
    pub color: [u8; 3],
}

impl Piece {
    /// Builds a piece from a single canonical shape.
    ///
    /// Panics if `shapes` is empty or any shape is empty or not minimally
    /// bounding (spec.md's "no all-false border rows/cols" invariant — a
    /// padded shape silently under-counts placements in
    /// `crate::positions`, since `set_subgrid`'s bounds check sees the
    /// padded width/height), or if `rotate` is not one of 1, 2, 4 — these
    /// are invariant violations a caller controls directly (constructed
    /// from already-validated data), not recoverable input errors.
    pub fn new(name: char, shapes: Vec<Grid2D>, rotate: u8, color: [u8; 3]) -> Self {
        assert!(!shapes.is_empty(), "piece {name:?} has no shapes");
        assert!(shapes.len() <= 2, "piece {name:?} has more than 2 shapes");
        for shape in &shapes {
            assert!(!shape.is_empty(), "piece {name:?} has an empty shape");
            assert_eq!(
                shape.bounding_box(),
                Some((0, 0, shape.width(), shape.height())),
                "piece {name:?} shape is not minimally bounding: has an all-false border row or column"
            );
        }
        assert!(
            matches!(rotate, 1 | 2 | 4),
            "piece {name:?} rotate must be 1, 2 or 4, got {rotate}"
        );
        Self {
            name,
            shapes,
            rotate,
            color,
        }
    }

    /// Number of true cells in the canonical shape (both shapes of a
    /// chiral pair always have the same cell count).
    pub fn cell_count(&self) -> usize {
        self.shapes[0].count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_count_matches_shape() {
        let shape = Grid2D::from_spec("###\n").unwrap();
        let p = Piece::new('i', vec![shape], 2, [255, 0, 0]);
        assert_eq!(p.cell_count(), 3);
    }

    #[test]
    #[should_panic]
    fn rejects_bad_rotate() {
        let shape = Grid2D::from_spec("##\n").unwrap();
        Piece::new('o', vec![shape], 3, [0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn rejects_padded_shape() {
        let shape = Grid2D::from_spec("...\n.#.\n...\n").unwrap();
        Piece::new('p', vec![shape], 1, [0, 0, 0]);
    }
}
