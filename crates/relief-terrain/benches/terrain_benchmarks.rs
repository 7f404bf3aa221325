use criterion::{Criterion, black_box, criterion_group, criterion_main};
use relief_terrain::*;

fn bench_sample_3d(c: &mut Criterion) {
    let noise = GradientNoise::from_seed(42);
    c.bench_function("gradient_sample_3d", |bencher| {
        bencher.iter(|| black_box(noise.sample_3d(black_box(12.34), black_box(-5.67), 0.89)))
    });
}

fn bench_fractal(c: &mut Criterion) {
    let noise = GradientNoise::from_seed(42);
    let params = FractalParams {
        octaves: 8,
        ..Default::default()
    };
    c.bench_function("fractal_8_octaves", |bencher| {
        bencher.iter(|| black_box(noise.fractal(black_box(100.0), black_box(200.0), &params)))
    });
}

fn bench_generate_256(c: &mut Criterion) {
    let params = FractalParams::default();
    c.bench_function("generate_heightfield_256", |bencher| {
        bencher.iter(|| black_box(generate_heightfield(256, 256, &params, black_box(1))))
    });
}

fn bench_generate_rows_split(c: &mut Criterion) {
    let generator =
        HeightFieldGenerator::from_seed(256, 256, FractalParams::default(), 1).unwrap();
    c.bench_function("generate_rows_4_parts", |bencher| {
        bencher.iter(|| {
            let parts = generator
                .row_ranges(4)
                .into_iter()
                .map(|rows| generator.generate_rows(rows))
                .collect();
            black_box(generator.normalize(parts))
        })
    });
}

criterion_group!(
    benches,
    bench_sample_3d,
    bench_fractal,
    bench_generate_256,
    bench_generate_rows_split
);
criterion_main!(benches);
