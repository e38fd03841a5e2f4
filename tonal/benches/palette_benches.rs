use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use tonal::{
    generate, hex_to_oklch, oklch_to_hex, to_stylesheet, to_view_model, Catalog, PaletteBuilder,
    ViewConfig,
};

fn random_seeds(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|_| {
            let [r, g, b]: [u8; 3] = rng.random();
            format!("#{r:02x}{g:02x}{b:02x}")
        })
        .collect()
}

fn conversion_benchmark(c: &mut Criterion) {
    let seeds = random_seeds(256);

    c.bench_function("color_hex_round_trip", |b| {
        b.iter(|| {
            for seed in &seeds {
                let color = hex_to_oklch(black_box(seed)).expect("seed parses");
                black_box(oklch_to_hex(&color));
            }
        });
    });
}

fn palette_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_generate");
    let catalog = Catalog::standard();

    for seed in random_seeds(4) {
        group.bench_with_input(BenchmarkId::from_parameter(&seed), &seed, |b, seed| {
            let builder = PaletteBuilder::new(&catalog);
            b.iter(|| builder.generate(black_box(seed)).expect("palette"));
        });
    }

    group.finish();
}

fn output_benchmark(c: &mut Criterion) {
    let palette = generate("#222536").expect("palette");
    let config = ViewConfig::default();

    c.bench_function("palette_stylesheet", |b| {
        b.iter(|| to_stylesheet(black_box(&palette)));
    });
    c.bench_function("palette_view_model", |b| {
        b.iter(|| to_view_model(black_box(&palette), &config));
    });
}

criterion_group!(
    benches,
    conversion_benchmark,
    palette_benchmark,
    output_benchmark
);
criterion_main!(benches);
