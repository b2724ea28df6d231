use criterion::{black_box, criterion_group, criterion_main, Criterion, SamplingMode};
use chess_rules::attacks::{attackers_of, attacks};
use chess_rules::bitboard::square_from_algebraic;
use chess_rules::board::BoardState;
use chess_rules::legality::{legal_moves, validate};
use chess_rules::magic::{magic_tables, MagicSearchConfig, MagicTables};
use chess_rules::rays::rook_attacks_slow;
use chess_rules::status::is_terminal;
use chess_rules::types::{Color, Move, PieceType};

const SEB_FEN: &str = "r3k2r/p1ppqpb1/Bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPB1PPP/R3K2R b KQkq - 0 1";

fn sq(s: &str) -> u8 {
    square_from_algebraic(s).unwrap()
}

pub fn bench_rook_attacks_magic(c: &mut Criterion) {
    let occupied = BoardState::from_fen(SEB_FEN).unwrap().occupancy.occupied();
    // force table construction outside the timed loop
    magic_tables();
    c.bench_function("rook attacks magic all squares", |b| {
        b.iter(|| {
            (0..64u8).fold(0u64, |acc, s| {
                acc ^ attacks(PieceType::Rook, Color::White, black_box(s), black_box(occupied))
            })
        })
    });
}

pub fn bench_rook_attacks_slow(c: &mut Criterion) {
    let occupied = BoardState::from_fen(SEB_FEN).unwrap().occupancy.occupied();
    c.bench_function("rook attacks ray cast all squares", |b| {
        b.iter(|| {
            (0..64u8).fold(0u64, |acc, s| acc ^ rook_attacks_slow(black_box(s), black_box(occupied)))
        })
    });
}

pub fn bench_attackers_of_seb(c: &mut Criterion) {
    let bo = BoardState::from_fen(SEB_FEN).unwrap();
    magic_tables();
    c.bench_function("attackers of every square seb", |b| {
        b.iter(|| {
            (0..64u8).fold(0u64, |acc, s| acc | attackers_of(black_box(s), &bo.occupancy, None))
        })
    });
}

pub fn bench_validate_castle_seb(c: &mut Criterion) {
    let bo = BoardState::from_fen(SEB_FEN).unwrap();
    let mv = Move::castle(sq("e8"), sq("c8"));
    magic_tables();
    c.bench_function("validate castle seb", |b| b.iter(|| validate(black_box(&bo), black_box(mv))));
}

pub fn bench_legal_moves_from_start(c: &mut Criterion) {
    let bo = BoardState::new();
    c.bench_function("get legal moves from start", |b| {
        b.iter(|| legal_moves(black_box(&bo)))
    });
}

pub fn bench_legal_moves_from_seb(c: &mut Criterion) {
    let bo = BoardState::from_fen(SEB_FEN).unwrap();
    c.bench_function("get legal moves from seb", |b| {
        b.iter(|| legal_moves(black_box(&bo)))
    });
}

pub fn bench_is_terminal_stalemate(c: &mut Criterion) {
    let bo = BoardState::from_fen("7K/8/8/8/8/8/2Q5/k7 b - - 0 1").unwrap();
    c.bench_function("is terminal stalemate", |b| b.iter(|| is_terminal(black_box(&bo))));
}

pub fn bench_magic_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat-sampling");
    group.sample_size(10);
    group.sampling_mode(SamplingMode::Flat);
    group.bench_function("magic search all squares", |b| {
        b.iter(|| {
            MagicTables::build(&MagicSearchConfig {
                seed: Some(black_box(0xC0FFEE)),
                ..MagicSearchConfig::default()
            })
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rook_attacks_magic,
    bench_rook_attacks_slow,
    bench_attackers_of_seb,
    bench_validate_castle_seb,
    bench_legal_moves_from_start,
    bench_legal_moves_from_seb,
    bench_is_terminal_stalemate,
    bench_magic_search,
);
criterion_main!(benches);
