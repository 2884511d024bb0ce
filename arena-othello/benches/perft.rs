use arena_othello::test_utils::run_perft;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn move_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(50);

    // Depth 6 is 8200 leaves; deeper runs take too long per sample.
    for depth in 1..=6u64 {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| run_perft(black_box(depth)))
        });
    }

    group.finish();
}

criterion_group!(perft, move_generation);
criterion_main!(perft);
