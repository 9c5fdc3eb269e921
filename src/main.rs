//! Exact-cover polyomino/polycube tiling solver CLI.
//!
//! Reads a pieces file and a `--dims`/`--play` puzzle spec, builds the
//! exact-cover matrix, runs Dancing Links, decodes the solutions, and
//! writes PNG renders plus a binary/text dump — the same end-to-end
//! shape as `original_source/main.go`'s `LoadPieces` -> `NewBoardGame` ->
//! `dlx.New` -> `Search` pipeline, generalized to runtime dimensions and
//! fronted by `clap` rather than a hardcoded `games` table.

use std::collections::HashMap;
use std::fs;

use clap::Parser;
use log::{info, warn};

use grid_cover::cli::{build_multiset, check_area, parse_dims, Cli, Command, Dims, RunConfig};
use grid_cover::coverage::{build_2d, build_3d};
use grid_cover::decode::{decode_2d, decode_3d};
use grid_cover::dlx::{never_stop, Dlx};
use grid_cover::persistence::{count, save_2d, save_3d};
use grid_cover::pieces_file::parse_pieces;
use grid_cover::render::{render_2d, render_3d_planes};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            pieces,
            dims,
            play,
            max,
            count_only,
            write,
            out,
            debug,
        } => {
            if debug {
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
            } else {
                env_logger::init();
            }
            let config = RunConfig {
                max,
                count_only,
                debug,
            };
            if let Err(e) = run_solve(&pieces, &dims, &play, &config, write, &out) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Command::Count { bin } => {
            env_logger::init();
            match count(bin.to_string_lossy().as_ref()) {
                Some(n) => println!("{n} solutions"),
                None => {
                    eprintln!("no solutions file at {}", bin.display());
                    std::process::exit(1);
                }
            }
        }
    }
}

fn run_solve(
    pieces_path: &std::path::Path,
    dims: &str,
    play: &str,
    config: &RunConfig,
    write: usize,
    out: &std::path::Path,
) -> Result<(), String> {
    let text = fs::read_to_string(pieces_path).map_err(|e| format!("reading {}: {e}", pieces_path.display()))?;
    let pieces_map = parse_pieces(&text).map_err(|e| e.to_string())?;
    let dims = parse_dims(dims)?;
    let multiset = build_multiset(play, &pieces_map).map_err(|e| e.to_string())?;

    fs::create_dir_all(out).map_err(|e| format!("creating {}: {e}", out.display()))?;

    match dims {
        Dims::TwoD { w, h } => solve_2d(&multiset, w, h, config, write, out),
        Dims::ThreeD { w, h, d } => solve_3d(&multiset, w, h, d, config, write, out),
    }
}

fn solve_2d(
    pieces: &[grid_cover::piece::Piece],
    w: usize,
    h: usize,
    config: &RunConfig,
    write: usize,
    out: &std::path::Path,
) -> Result<(), String> {
    if let Err(e) = check_area(pieces, w * h) {
        warn!("{e}");
    }

    info!("building 2D coverage matrix for {w}x{h} board, {} pieces", pieces.len());
    let cov = build_2d(pieces, w, h);
    info!("solving: {} rows, {} columns", cov.height(), cov.width());

    let mut dlx = Dlx::new(&cov.rows, cov.width(), config.max, config.count_only);
    dlx.search(&never_stop());
    info!("found {} solutions in {} steps", dlx.solution_count(), dlx.step_count());
    println!("Found {} solutions", dlx.solution_count());

    if config.count_only {
        return Ok(());
    }

    let solutions: Vec<_> = dlx
        .solutions()
        .iter()
        .map(|rows| decode_2d(&cov, pieces, rows, w, h))
        .collect();

    let bin_path = out.join("solutions.bin");
    let txt_path = out.join("solutions.txt");
    save_2d(
        bin_path.to_string_lossy().as_ref(),
        txt_path.to_string_lossy().as_ref(),
        w,
        h,
        &solutions,
    )
    .map_err(|e| format!("saving solutions: {e}"))?;
    println!("Wrote {} and {}", bin_path.display(), txt_path.display());

    let colors = color_map(pieces);
    for (i, solution) in solutions.iter().take(write).enumerate() {
        let img = render_2d(w, h, solution, &colors);
        let path = out.join(format!("solution_{i}.png"));
        img.save(&path).map_err(|e| format!("rendering {}: {e}", path.display()))?;
    }
    if write > 0 {
        println!("Rendered {} solution(s) to {}", write.min(solutions.len()), out.display());
    }

    Ok(())
}

fn solve_3d(
    pieces: &[grid_cover::piece::Piece],
    w: usize,
    h: usize,
    d: usize,
    config: &RunConfig,
    write: usize,
    out: &std::path::Path,
) -> Result<(), String> {
    if let Err(e) = check_area(pieces, w * h * d) {
        warn!("{e}");
    }

    info!("building 3D coverage matrix for {w}x{h}x{d} cube, {} pieces", pieces.len());
    let cov = build_3d(pieces, w, h, d);
    info!("solving: {} rows, {} columns", cov.height(), cov.width());

    let mut dlx = Dlx::new(&cov.rows, cov.width(), config.max, config.count_only);
    dlx.search(&never_stop());
    info!("found {} solutions in {} steps", dlx.solution_count(), dlx.step_count());
    println!("Found {} solutions", dlx.solution_count());

    if config.count_only {
        return Ok(());
    }

    let solutions: Vec<_> = dlx
        .solutions()
        .iter()
        .map(|rows| decode_3d(&cov, pieces, rows, w, h, d))
        .collect();

    let bin_path = out.join("solutions.bin");
    let txt_path = out.join("solutions.txt");
    save_3d(
        bin_path.to_string_lossy().as_ref(),
        txt_path.to_string_lossy().as_ref(),
        w,
        h,
        d,
        &solutions,
    )
    .map_err(|e| format!("saving solutions: {e}"))?;
    println!("Wrote {} and {}", bin_path.display(), txt_path.display());

    let colors = color_map(pieces);
    for (i, solution) in solutions.iter().take(write).enumerate() {
        for (z, plane) in render_3d_planes(w, h, d, solution, &colors).iter().enumerate() {
            let path = out.join(format!("solution_{i}_z{z}.png"));
            plane.save(&path).map_err(|e| format!("rendering {}: {e}", path.display()))?;
        }
    }
    if write > 0 {
        println!("Rendered {} solution(s) to {}", write.min(solutions.len()), out.display());
    }

    Ok(())
}

fn color_map(pieces: &[grid_cover::piece::Piece]) -> HashMap<char, [u8; 3]> {
    pieces.iter().map(|p| (p.name, p.color)).collect()
}
