use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flatmat_linalg::{det_in, matinv_into, svd_into, GaussianWorkspace, InverseWorkspace, Svd};
use flatmat_matrix::FlatMatrix;
use rand::Rng;

fn random_matrix(nrow: usize, ncol: usize) -> FlatMatrix<f64> {
    let mut rng = rand::rng();
    let data: Vec<f64> = (0..nrow * ncol).map(|_| rng.random::<f64>() - 0.5).collect();
    FlatMatrix::from_dim_vec(&[nrow, ncol], data).unwrap()
}

fn bench_det(c: &mut Criterion) {
    let mut group = c.benchmark_group("det");

    for size in [4, 16, 64] {
        let a = random_matrix(size, size);
        let mut ws = GaussianWorkspace::new();
        group.bench_function(format!("det_{size}x{size}"), |bencher| {
            bencher.iter(|| black_box(det_in(&a, &mut ws)))
        });
    }

    group.finish();
}

fn bench_matinv(c: &mut Criterion) {
    let mut group = c.benchmark_group("matinv");

    for size in [4, 16, 64] {
        let a = random_matrix(size, size);
        let mut out = FlatMatrix::from_dim(&[size, size]).unwrap();
        let mut ws = InverseWorkspace::new();
        group.bench_function(format!("matinv_{size}x{size}"), |bencher| {
            bencher.iter(|| black_box(matinv_into(&a, &mut out, &mut ws)))
        });
    }

    group.finish();
}

fn bench_svd(c: &mut Criterion) {
    let mut group = c.benchmark_group("svd");

    for (m, n) in [(8, 5), (32, 16), (128, 64)] {
        let a = random_matrix(m, n);
        let mut dec = Svd::new();
        group.bench_function(format!("svd_{m}x{n}"), |bencher| {
            bencher.iter(|| black_box(svd_into(&a, &mut dec)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_det, bench_matinv, bench_svd);
criterion_main!(benches);
