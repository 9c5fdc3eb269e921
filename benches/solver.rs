//! Benchmarks for the exact-cover tiling solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use grid_cover::coverage::build_2d;
use grid_cover::dlx::{never_stop, Dlx};
use grid_cover::grid::Grid2D;
use grid_cover::piece::Piece;
use grid_cover::positions::positions_2d;

/// A 5x3 board tiled by five pentominoes, used across benchmarks as a
/// representative small-but-nontrivial instance.
fn sample_pieces() -> Vec<Piece> {
    vec![
        Piece::new('o', vec![Grid2D::from_spec("##\n##\n").unwrap()], 1, [230, 25, 75]),
        Piece::new('t', vec![Grid2D::from_spec("###\n.#.\n.#.\n").unwrap()], 4, [60, 180, 75]),
        Piece::new('z', vec![Grid2D::from_spec("##.\n.##\n").unwrap()], 2, [255, 225, 25]),
        Piece::new('v', vec![Grid2D::from_spec("#..\n#..\n###\n").unwrap()], 4, [0, 130, 200]),
        Piece::new('i', vec![Grid2D::from_spec("#\n#\n#\n").unwrap()], 2, [245, 130, 48]),
    ]
}

fn bench_positions(c: &mut Criterion) {
    let pieces = sample_pieces();
    c.bench_function("positions_2d", |b| {
        b.iter(|| positions_2d(black_box(&pieces[1]), 5, 3))
    });
}

fn bench_build_coverage(c: &mut Criterion) {
    let pieces = sample_pieces();
    c.bench_function("build_2d_coverage", |b| {
        b.iter(|| build_2d(black_box(&pieces), 5, 3))
    });
}

fn bench_solve(c: &mut Criterion) {
    let pieces = sample_pieces();
    let cov = build_2d(&pieces, 5, 3);
    c.bench_function("dlx_solve", |b| {
        b.iter(|| {
            let mut dlx = Dlx::new(black_box(&cov.rows), cov.width(), 0, true);
            dlx.search(&never_stop());
            dlx.solution_count()
        })
    });
}

criterion_group!(benches, bench_positions, bench_build_coverage, bench_solve);
criterion_main!(benches);
