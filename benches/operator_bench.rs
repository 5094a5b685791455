//! Benchmarks for operator-table construction and Laplacian assembly.
//!
//! Run with: `cargo bench --bench operator_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mac_rs::{Grid3D, OperatorTables, PressureOperator};

fn cut_cell_grid(n: usize) -> Grid3D {
    let half = n as f64 / 2.0;
    Grid3D::uniform_box([0.0; 3], [n as f64; 3], [n; 3], [true; 3])
        .unwrap()
        .with_volume_fraction(|x, y, z| {
            let r2 = (x - half).powi(2) + (y - half).powi(2) + (z - half).powi(2);
            let r = half / 3.0;
            if r2 < r * r {
                0.0
            } else if r2 < 4.0 * r * r {
                0.5
            } else {
                1.0
            }
        })
}

fn bench_build_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tables");
    for n in [16, 32, 64] {
        let grid = cut_cell_grid(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &grid, |b, grid| {
            b.iter(|| OperatorTables::build(black_box(grid)));
        });
    }
    group.finish();
}

fn bench_assemble_laplacian(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_laplacian");
    for n in [16, 32, 64] {
        let grid = cut_cell_grid(n);
        let ops = OperatorTables::build(&grid);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| PressureOperator::assemble(black_box(&grid), black_box(&ops)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_tables, bench_assemble_laplacian);
criterion_main!(benches);
