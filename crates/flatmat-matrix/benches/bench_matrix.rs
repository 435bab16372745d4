use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flatmat_matrix::FlatMatrix;
use rand::Rng;

fn random_matrix(nrow: usize, ncol: usize) -> FlatMatrix<f64> {
    let mut rng = rand::rng();
    let data: Vec<f64> = (0..nrow * ncol).map(|_| rng.random::<f64>()).collect();
    FlatMatrix::from_dim_vec(&[nrow, ncol], data).unwrap()
}

fn bench_set_dim(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_dim");

    let mut m = random_matrix(64, 64);
    group.bench_function("stable_shape", |b| {
        b.iter(|| {
            m.set_dim(black_box(&[64, 64]));
        })
    });

    let mut m = random_matrix(64, 64);
    group.bench_function("reshape_same_count", |b| {
        b.iter(|| {
            m.set_dim(black_box(&[32, 128]));
            m.set_dim(black_box(&[64, 64]));
        })
    });

    group.finish();
}

fn bench_concat_cols(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat_cols");

    for size in [16, 128, 512] {
        let a = random_matrix(size, size);
        let b = random_matrix(size, size);
        group.bench_function(format!("f64_size_{size}"), |bencher| {
            bencher.iter(|| black_box(FlatMatrix::concat_cols(&[&a, &b]).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_set_dim, bench_concat_cols);
criterion_main!(benches);
