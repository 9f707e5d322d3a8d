use ccsmul_kernels::{dense_to_ccs_f64_i64, init_parallel, spspmm_ccs_f64_i64, spspmm_ccs_serial_f64_i64};
use ccsmul_reference::random_dense_f64;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

fn bench_spspmm(c: &mut Criterion) {
    init_parallel(None);
    let mut group = c.benchmark_group("spspmm");
    for &size in &[64usize, 128, 256] {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let a = dense_to_ccs_f64_i64(size, size, &random_dense_f64(size * size, &mut rng));
        let b = dense_to_ccs_f64_i64(size, size, &random_dense_f64(size * size, &mut rng));
        group.bench_with_input(BenchmarkId::new("serial", size), &size, |bench, _| {
            bench.iter(|| spspmm_ccs_serial_f64_i64(black_box(&a), black_box(&b)));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bench, _| {
            bench.iter(|| spspmm_ccs_f64_i64(black_box(&a), black_box(&b)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_spspmm);
criterion_main!(benches);
