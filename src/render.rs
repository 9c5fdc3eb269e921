//! PNG rendering of a solved board.
//!
//! Grounded in `original_source/display/render.go`: same `tile`/`pad`
//! layout constants, same idea of merging a piece's tiles across their
//! shared padding so a piece reads as one contiguous shape with a border
//! only where it meets the background or another piece. `render3d.go`'s
//! approach (flattening each Z-plane to its own 2D render) is followed
//! for cubes rather than attempting an isometric projection.

use image::{Rgb, RgbImage};

use crate::decode::{Placement2D, Placement3D};

const TILE: u32 = 50;
const PAD: u32 = 3;
const BORDER: u32 = 1;
const BORDER_COLOR: Rgb<u8> = Rgb([0xBD, 0xBD, 0xBD]);
const BACKGROUND: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

fn canvas_width(cols: u32) -> u32 {
    TILE * cols + PAD * (cols + 1)
}

fn canvas_height(rows: u32) -> u32 {
    TILE * rows + PAD * (rows + 1)
}

fn tile_origin(x: u32, y: u32) -> (u32, u32) {
    (canvas_width(x), canvas_height(y))
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Builds the per-cell piece-name ownership map for a board, from a set
/// of placements. `None` means the cell is unoccupied.
fn owner_grid(w: usize, h: usize, placements: &[Placement2D]) -> Vec<Option<char>> {
    let mut owners = vec![None; w * h];
    for placement in placements {
        for dy in 0..placement.shape.height() {
            for dx in 0..placement.shape.width() {
                if placement.shape.get(dx, dy) {
                    let (x, y) = (placement.x + dx, placement.y + dy);
                    owners[y * w + x] = Some(placement.piece_name);
                }
            }
        }
    }
    owners
}

fn owner_at(owners: &[Option<char>], w: usize, h: usize, x: i64, y: i64) -> Option<char> {
    if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
        return None;
    }
    owners[y as usize * w + x as usize]
}

/// Renders a solved 2D board to an RGB PNG image, one pixel block per
/// cell (`TILE`x`TILE` with `PAD`-wide gutters). `colors` maps piece name
/// to display color; a piece with no entry renders mid-gray.
pub fn render_2d(
    w: usize,
    h: usize,
    placements: &[Placement2D],
    colors: &std::collections::HashMap<char, [u8; 3]>,
) -> RgbImage {
    let mut img = RgbImage::from_pixel(canvas_width(w as u32), canvas_height(h as u32), BACKGROUND);
    let owners = owner_grid(w, h, placements);

    for y in 0..h {
        for x in 0..w {
            let Some(name) = owners[y * w + x] else {
                continue;
            };
            let color = colors.get(&name).copied().unwrap_or([0x90, 0x90, 0x90]);
            let color = Rgb(color);
            let (x0, y0) = tile_origin(x as u32, y as u32);
            let (x1, y1) = (x0 + TILE, y0 + TILE);
            fill_rect(&mut img, x0, y0, x1, y1, color);

            let same = |dx: i64, dy: i64| owner_at(&owners, w, h, x as i64 + dx, y as i64 + dy) == Some(name);

            // merge across shared padding with a same-piece neighbor
            if same(0, -1) {
                fill_rect(&mut img, x0, y0.saturating_sub(PAD), x1, y0, color);
            }
            if same(0, 1) {
                fill_rect(&mut img, x0, y1, x1, y1 + PAD, color);
            }
            if same(-1, 0) {
                fill_rect(&mut img, x0.saturating_sub(PAD), y0, x0, y1, color);
            }
            if same(1, 0) {
                fill_rect(&mut img, x1, y0, x1 + PAD, y1, color);
            }

            // border strip on any edge not merged into a same-piece neighbor
            if !same(0, -1) {
                fill_rect(&mut img, x0, y0, x1, y0 + BORDER, BORDER_COLOR);
            }
            if !same(0, 1) {
                fill_rect(&mut img, x0, y1 - BORDER, x1, y1, BORDER_COLOR);
            }
            if !same(-1, 0) {
                fill_rect(&mut img, x0, y0, x0 + BORDER, y1, BORDER_COLOR);
            }
            if !same(1, 0) {
                fill_rect(&mut img, x1 - BORDER, y0, x1, y1, BORDER_COLOR);
            }
        }
    }

    img
}

/// Renders a solved 3D cube as one PNG per Z-plane, per
/// `original_source/display/render3d.go`'s plane-by-plane approach. Plane
/// `z` in the returned vector holds the board as seen looking down that
/// slice.
pub fn render_3d_planes(
    w: usize,
    h: usize,
    d: usize,
    placements: &[Placement3D],
    colors: &std::collections::HashMap<char, [u8; 3]>,
) -> Vec<RgbImage> {
    (0..d)
        .map(|z| {
            let mut flat = Vec::new();
            for p in placements {
                for dz in 0..p.shape.depth() {
                    if p.z + dz != z {
                        continue;
                    }
                    for dy in 0..p.shape.height() {
                        for dx in 0..p.shape.width() {
                            if p.shape.get(dx, dy, dz) {
                                flat.push((p.piece_name, p.x + dx, p.y + dy));
                            }
                        }
                    }
                }
            }
            let mut by_piece: std::collections::HashMap<char, crate::grid::Grid2D> = std::collections::HashMap::new();
            let mut placements_2d = Vec::new();
            for (name, x, y) in flat {
                let grid = by_piece.entry(name).or_insert_with(|| crate::grid::Grid2D::new_empty(w, h));
                grid.set(x, y, true);
            }
            for (name, grid) in &by_piece {
                if let Some((bx, by, bw, bh)) = grid.bounding_box() {
                    placements_2d.push(Placement2D {
                        piece_name: *name,
                        x: bx,
                        y: by,
                        shape: grid.get_subgrid(bx, by, bw, bh),
                    });
                }
            }
            render_2d(w, h, &placements_2d, colors)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid2D;

    #[test]
    fn renders_expected_canvas_size() {
        let img = render_2d(2, 3, &[], &std::collections::HashMap::new());
        assert_eq!(img.width(), canvas_width(2));
        assert_eq!(img.height(), canvas_height(3));
    }

    #[test]
    fn occupied_cell_is_piece_colored() {
        let shape = Grid2D::from_spec("#\n").unwrap();
        let placements = vec![Placement2D {
            piece_name: 'a',
            x: 0,
            y: 0,
            shape,
        }];
        let mut colors = std::collections::HashMap::new();
        colors.insert('a', [10u8, 20, 30]);
        let img = render_2d(1, 1, &placements, &colors);
        let (x0, y0) = tile_origin(0, 0);
        assert_eq!(*img.get_pixel(x0 + TILE / 2, y0 + TILE / 2), Rgb([10, 20, 30]));
    }

    #[test]
    fn unoccupied_cell_stays_background() {
        let img = render_2d(1, 1, &[], &std::collections::HashMap::new());
        let (x0, y0) = tile_origin(0, 0);
        assert_eq!(*img.get_pixel(x0 + TILE / 2, y0 + TILE / 2), BACKGROUND);
    }
}
