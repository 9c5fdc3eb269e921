//! File I/O for saving and loading solved boards.
//!
//! Binary format for `solutions.bin` (little endian), generalized from
//! the teacher's const-generic, fixed-dimension framing to runtime
//! dimensions while keeping the same magic/version/count envelope:
//!
//! - 4 bytes: magic (`GCVR`)
//! - u8: format version
//! - u8: 0 for a 2D board, 1 for a 3D cube
//! - u16 x3: width, height, depth (depth is 1 for a 2D board)
//! - u32: solution count
//! - repeat per solution:
//!   - u32: placement count
//!   - repeat per placement:
//!     - u8: piece name (ASCII)
//!     - u32: cell count
//!     - repeat per cell: u16 x, u16 y, u16 z (z is 0 for a 2D board)
//!
//! A paired `solutions.txt` carries the same solutions as
//! human-readable board renders, one per solution — the teacher's
//! `save_text` does the analogous thing with `format_solution`.

use std::fs::File;
use std::io::{Read, Write};

use crate::decode::{Placement2D, Placement3D};

const FILE_MAGIC: [u8; 4] = *b"GCVR";
const FILE_VERSION: u8 = 1;

fn write_header(file: &mut File, is_3d: bool, w: usize, h: usize, d: usize) -> std::io::Result<()> {
    file.write_all(&FILE_MAGIC)?;
    file.write_all(&[FILE_VERSION, is_3d as u8])?;
    file.write_all(&(w as u16).to_le_bytes())?;
    file.write_all(&(h as u16).to_le_bytes())?;
    file.write_all(&(d as u16).to_le_bytes())?;
    Ok(())
}

struct Header {
    is_3d: bool,
    w: usize,
    h: usize,
    d: usize,
}

fn read_header(file: &mut File) -> Option<Header> {
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic).ok()?;
    if magic != FILE_MAGIC {
        return None;
    }
    let mut rest = [0u8; 2];
    file.read_exact(&mut rest).ok()?;
    if rest[0] != FILE_VERSION {
        return None;
    }
    let is_3d = rest[1] != 0;
    let w = read_u16(file)? as usize;
    let h = read_u16(file)? as usize;
    let d = read_u16(file)? as usize;
    Some(Header { is_3d, w, h, d })
}

#[inline]
fn read_u16<R: Read>(reader: &mut R) -> Option<u16> {
    let mut buffer = [0u8; 2];
    reader.read_exact(&mut buffer).ok()?;
    Some(u16::from_le_bytes(buffer))
}

#[inline]
fn read_u32<R: Read>(reader: &mut R) -> Option<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer).ok()?;
    Some(u32::from_le_bytes(buffer))
}

/// Saves a batch of 2D solutions to `bin_path` (binary) and `txt_path`
/// (rendered text), one entry per solution in `solutions`.
pub fn save_2d(
    bin_path: &str,
    txt_path: &str,
    w: usize,
    h: usize,
    solutions: &[Vec<Placement2D>],
) -> std::io::Result<()> {
    let mut bin = File::create(bin_path)?;
    write_header(&mut bin, false, w, h, 1)?;
    bin.write_all(&(solutions.len() as u32).to_le_bytes())?;
    for solution in solutions {
        bin.write_all(&(solution.len() as u32).to_le_bytes())?;
        for placement in solution {
            bin.write_all(&[placement.piece_name as u8])?;
            let cells: Vec<(usize, usize)> = (0..placement.shape.height())
                .flat_map(|dy| (0..placement.shape.width()).map(move |dx| (dx, dy)))
                .filter(|&(dx, dy)| placement.shape.get(dx, dy))
                .map(|(dx, dy)| (placement.x + dx, placement.y + dy))
                .collect();
            bin.write_all(&(cells.len() as u32).to_le_bytes())?;
            for (x, y) in cells {
                bin.write_all(&(x as u16).to_le_bytes())?;
                bin.write_all(&(y as u16).to_le_bytes())?;
                bin.write_all(&0u16.to_le_bytes())?;
            }
        }
    }

    let mut txt = File::create(txt_path)?;
    writeln!(txt, "Found {} solutions:\n", solutions.len())?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(txt, "Solution {}:", i + 1)?;
        let mut board = crate::grid::Grid2D::new_empty(w, h);
        for placement in solution {
            for dy in 0..placement.shape.height() {
                for dx in 0..placement.shape.width() {
                    if placement.shape.get(dx, dy) {
                        board.set(placement.x + dx, placement.y + dy, true);
                    }
                }
            }
        }
        write!(txt, "{board}")?;
        writeln!(txt)?;
    }
    Ok(())
}

/// Loads a batch of 2D solutions saved by [`save_2d`]. Returns `None` on
/// any format mismatch or truncated/corrupt file. Each placement comes
/// back as `(piece_name, cells)`, cells being absolute board
/// coordinates.
pub fn load_2d(bin_path: &str) -> Option<Vec<Vec<(char, Vec<(usize, usize)>)>>> {
    let mut file = File::open(bin_path).ok()?;
    let header = read_header(&mut file)?;
    if header.is_3d {
        return None;
    }
    let solution_count = read_u32(&mut file)? as usize;
    let mut solutions = Vec::with_capacity(solution_count);
    for _ in 0..solution_count {
        let placement_count = read_u32(&mut file)? as usize;
        let mut solution = Vec::with_capacity(placement_count);
        for _ in 0..placement_count {
            let mut name_byte = [0u8; 1];
            file.read_exact(&mut name_byte).ok()?;
            let name = name_byte[0] as char;
            let cell_count = read_u32(&mut file)? as usize;
            let mut cells = Vec::with_capacity(cell_count);
            for _ in 0..cell_count {
                let x = read_u16(&mut file)? as usize;
                let y = read_u16(&mut file)? as usize;
                let _z = read_u16(&mut file)?;
                if x >= header.w || y >= header.h {
                    return None;
                }
                cells.push((x, y));
            }
            solution.push((name, cells));
        }
        solutions.push(solution);
    }
    Some(solutions)
}

/// Saves a batch of 3D solutions, analogous to [`save_2d`].
pub fn save_3d(
    bin_path: &str,
    txt_path: &str,
    w: usize,
    h: usize,
    d: usize,
    solutions: &[Vec<Placement3D>],
) -> std::io::Result<()> {
    let mut bin = File::create(bin_path)?;
    write_header(&mut bin, true, w, h, d)?;
    bin.write_all(&(solutions.len() as u32).to_le_bytes())?;
    for solution in solutions {
        bin.write_all(&(solution.len() as u32).to_le_bytes())?;
        for placement in solution {
            bin.write_all(&[placement.piece_name as u8])?;
            let mut cells = Vec::new();
            for dz in 0..placement.shape.depth() {
                for dy in 0..placement.shape.height() {
                    for dx in 0..placement.shape.width() {
                        if placement.shape.get(dx, dy, dz) {
                            cells.push((placement.x + dx, placement.y + dy, placement.z + dz));
                        }
                    }
                }
            }
            bin.write_all(&(cells.len() as u32).to_le_bytes())?;
            for (x, y, z) in cells {
                bin.write_all(&(x as u16).to_le_bytes())?;
                bin.write_all(&(y as u16).to_le_bytes())?;
                bin.write_all(&(z as u16).to_le_bytes())?;
            }
        }
    }

    let mut txt = File::create(txt_path)?;
    writeln!(txt, "Found {} solutions:\n", solutions.len())?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(txt, "Solution {}:", i + 1)?;
        for z in 0..d {
            writeln!(txt, "z={z}:")?;
            let mut board = crate::grid::Grid2D::new_empty(w, h);
            for placement in solution {
                for dz in 0..placement.shape.depth() {
                    if placement.z + dz != z {
                        continue;
                    }
                    for dy in 0..placement.shape.height() {
                        for dx in 0..placement.shape.width() {
                            if placement.shape.get(dx, dy, dz) {
                                board.set(placement.x + dx, placement.y + dy, true);
                            }
                        }
                    }
                }
            }
            write!(txt, "{board}")?;
        }
        writeln!(txt)?;
    }
    Ok(())
}

/// Loads a batch of 3D solutions saved by [`save_3d`].
pub fn load_3d(bin_path: &str) -> Option<Vec<Vec<(char, Vec<(usize, usize, usize)>)>>> {
    let mut file = File::open(bin_path).ok()?;
    let header = read_header(&mut file)?;
    if !header.is_3d {
        return None;
    }
    let solution_count = read_u32(&mut file)? as usize;
    let mut solutions = Vec::with_capacity(solution_count);
    for _ in 0..solution_count {
        let placement_count = read_u32(&mut file)? as usize;
        let mut solution = Vec::with_capacity(placement_count);
        for _ in 0..placement_count {
            let mut name_byte = [0u8; 1];
            file.read_exact(&mut name_byte).ok()?;
            let name = name_byte[0] as char;
            let cell_count = read_u32(&mut file)? as usize;
            let mut cells = Vec::with_capacity(cell_count);
            for _ in 0..cell_count {
                let x = read_u16(&mut file)? as usize;
                let y = read_u16(&mut file)? as usize;
                let z = read_u16(&mut file)? as usize;
                if x >= header.w || y >= header.h || z >= header.d {
                    return None;
                }
                cells.push((x, y, z));
            }
            solution.push((name, cells));
        }
        solutions.push(solution);
    }
    Some(solutions)
}

/// Returns the number of solutions recorded in a saved file, without
/// loading the placements, for either board kind.
pub fn count(bin_path: &str) -> Option<usize> {
    let mut file = File::open(bin_path).ok()?;
    read_header(&mut file)?;
    Some(read_u32(&mut file)? as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid2D;
    use crate::grid3d::Grid3D;
    use std::sync::atomic::{AtomicU64, Ordering};

    static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn scratch_path(suffix: &str) -> String {
        let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("grid_cover_test_{n}_{suffix}"))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn round_trips_2d_solutions() {
        let shape = Grid2D::from_spec("##\n").unwrap();
        let solutions = vec![vec![Placement2D {
            piece_name: 'a',
            x: 0,
            y: 0,
            shape,
        }]];
        let bin = scratch_path("2d.bin");
        let txt = scratch_path("2d.txt");
        save_2d(&bin, &txt, 2, 1, &solutions).unwrap();
        let loaded = load_2d(&bin).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0][0].0, 'a');
        assert_eq!(loaded[0][0].1, vec![(0, 0), (1, 0)]);
        assert_eq!(count(&bin), Some(1));
    }

    #[test]
    fn round_trips_3d_solutions() {
        let mut cube = Grid3D::new_empty(1, 1, 2);
        cube.set(0, 0, 0, true);
        cube.set(0, 0, 1, true);
        let solutions = vec![vec![Placement3D {
            piece_name: 'z',
            x: 0,
            y: 0,
            z: 0,
            shape: cube,
        }]];
        let bin = scratch_path("3d.bin");
        let txt = scratch_path("3d.txt");
        save_3d(&bin, &txt, 1, 1, 2, &solutions).unwrap();
        let loaded = load_3d(&bin).unwrap();
        assert_eq!(loaded[0][0].0, 'z');
        assert_eq!(loaded[0][0].1.len(), 2);
    }

    #[test]
    fn load_2d_rejects_3d_file() {
        let solutions: Vec<Vec<Placement3D>> = vec![];
        let bin = scratch_path("mismatch.bin");
        let txt = scratch_path("mismatch.txt");
        save_3d(&bin, &txt, 1, 1, 1, &solutions).unwrap();
        assert!(load_2d(&bin).is_none());
    }
}
