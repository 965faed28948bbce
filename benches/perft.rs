use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use negachess::config::SearchConfig;
use negachess::engine::perft::perft;
use negachess::{Board, SearchLimits, Searcher};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: u32,
    nodes: u64,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depth: 4,
        nodes: 197_281,
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 3,
        nodes: 97_862,
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 4,
        nodes: 43_238,
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    for case in CASES {
        let mut board = Board::from_fen(case.fen).expect("bench FEN parses");
        assert_eq!(perft(&mut board, case.depth), case.nodes, "{} is miscounted", case.name);

        group.throughput(Throughput::Elements(case.nodes));
        group.bench_with_input(BenchmarkId::new(case.name, case.depth), &case.depth, |b, &depth| {
            b.iter(|| perft(black_box(&mut board), depth))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let config = SearchConfig {
        seed: Some(1),
        ..Default::default()
    };
    let mut board = Board::start_position();
    c.bench_function("search_startpos_depth_4", |b| {
        let mut searcher = Searcher::new(config.clone());
        b.iter(|| searcher.choose_move(black_box(&mut board), &SearchLimits::depth(4)))
    });
}

criterion_group!(benches, bench_perft, bench_search);
criterion_main!(benches);
