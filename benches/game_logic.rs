use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameSession, GameSnapshot, PieceSupply, Tetromino};
use blockfall::types::{Cell, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if session.game_over() {
                session.restart();
            }
            session.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Cell::Filled(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_can_place(c: &mut Criterion) {
    let board = Board::from_rows(&["I.IIIIIIII", "IIIII.IIII", ".IIIIIIIII"]);
    let piece = Tetromino::new(PieceKind::T);

    c.bench_function("can_place", |b| {
        b.iter(|| board.can_place(black_box(&piece), black_box(3), black_box(16)))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if session.game_over() {
                session.restart();
            }
            session.hard_drop();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("rotate_cw", |b| {
        b.iter(|| {
            session.rotate_cw();
        })
    });
}

fn bench_supply(c: &mut Criterion) {
    let mut supply = PieceSupply::from_seed(7);

    c.bench_function("supply_next", |b| b.iter(|| black_box(supply.next())));
}

fn bench_snapshot_into(c: &mut Criterion) {
    let session = GameSession::new(12345);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| session.snapshot_into(black_box(&mut snap)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_can_place,
    bench_hard_drop,
    bench_rotate,
    bench_supply,
    bench_snapshot_into
);
criterion_main!(benches);
