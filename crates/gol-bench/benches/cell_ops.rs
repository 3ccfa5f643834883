//! Criterion micro-benchmarks for the packed cell primitives.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gol_bench::reference_board;
use gol_core::cell;
use gol_core::Snapshot;

/// Classify every byte of a 64K-cell board through the transition table.
fn bench_transition_table(c: &mut Criterion) {
    let board = reference_board(3);
    c.bench_function("transition_table_64k", |b| {
        b.iter(|| {
            board
                .cells()
                .iter()
                .filter(|&&v| cell::transition(black_box(v)) != cell::Transition::Stay)
                .count()
        });
    });
}

/// Toggle a full row of cells on and off again.
fn bench_toggle_row(c: &mut Criterion) {
    let mut board = reference_board(5);
    let cols = board.cols();
    c.bench_function("toggle_row_256", |b| {
        b.iter(|| {
            for col in 0..cols {
                let alive = board.get_cell(100, col);
                board.set_cell(100, col, !alive);
                board.set_cell(100, col, alive);
            }
        });
    });
}

/// Refresh a snapshot in place (one memcpy of the board).
fn bench_snapshot_refresh(c: &mut Criterion) {
    let board = reference_board(9);
    let mut snapshot = Snapshot::capture(&board);
    c.bench_function("snapshot_refresh_64k", |b| {
        b.iter(|| snapshot.refresh(black_box(&board)));
    });
}

criterion_group!(
    benches,
    bench_transition_table,
    bench_toggle_row,
    bench_snapshot_refresh
);
criterion_main!(benches);
