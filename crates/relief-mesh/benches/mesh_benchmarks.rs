use criterion::{Criterion, black_box, criterion_group, criterion_main};
use relief_mesh::{BiomeBands, BiomeColorizer, MeshParams, TerrainMeshBuilder};
use relief_terrain::{FractalParams, generate_heightfield};

fn bench_colorize(c: &mut Criterion) {
    let colorizer = BiomeColorizer::new(BiomeBands::default());
    c.bench_function("biome_colorize_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..1000 {
                acc += colorizer.colorize(black_box(i as f32 / 1000.0)).x;
            }
            acc
        });
    });
}

fn bench_build_mesh(c: &mut Criterion) {
    let field = generate_heightfield(256, 256, &FractalParams::default(), 42).unwrap();
    let mut group = c.benchmark_group("build_mesh_256");
    for lod in [1u32, 2, 4] {
        let builder = TerrainMeshBuilder::new(MeshParams {
            lod_step: lod,
            ..Default::default()
        });
        group.bench_function(format!("lod_{lod}"), |b| {
            b.iter(|| builder.build(black_box(&field)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_colorize, bench_build_mesh);
criterion_main!(benches);
