use criterion::{criterion_group, criterion_main, Criterion};

// ---------------------------------------------------------------------------
// Helpers: deterministic test matrices
// ---------------------------------------------------------------------------

fn entry(i: usize, j: usize) -> f64 {
    ((i + 1) * 10 + j + 1) as f64 + if i == j { 500.0 } else { 0.0 }
}

fn sym_entry(i: usize, j: usize) -> f64 {
    entry(i, j) + entry(j, i)
}

fn densela_mat(m: usize, n: usize) -> densela::DenseMatrix<f64> {
    densela::DenseMatrix::from_fn(m, n, entry)
}

fn nalgebra_mat(m: usize, n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(m, n, entry)
}

// ---------------------------------------------------------------------------
// Matrix multiply
// ---------------------------------------------------------------------------

fn matmul_50(c: &mut Criterion) {
    let mut g = c.benchmark_group("matmul_50x50");

    g.bench_function("densela", |b| {
        let a = densela_mat(50, 50);
        let m = densela::DenseMatrix::from_fn(50, 50, |i, j| (i + j + 1) as f64);
        b.iter(|| std::hint::black_box(&a) * std::hint::black_box(&m))
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat(50, 50);
        let m = nalgebra::DMatrix::from_fn(50, 50, |i, j| (i + j + 1) as f64);
        b.iter(|| std::hint::black_box(&a) * std::hint::black_box(&m))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// QR decomposition
// ---------------------------------------------------------------------------

fn qr_40x20(c: &mut Criterion) {
    let mut g = c.benchmark_group("qr_40x20");

    g.bench_function("densela", |b| {
        let a = densela_mat(40, 20);
        b.iter(|| std::hint::black_box(&a).qr())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat(40, 20);
        b.iter(|| std::hint::black_box(&a).clone().qr())
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// SVD
// ---------------------------------------------------------------------------

fn svd_6x6(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd_6x6");

    g.bench_function("densela", |b| {
        let a = densela_mat(6, 6);
        b.iter(|| std::hint::black_box(&a).svd())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat(6, 6);
        b.iter(|| std::hint::black_box(&a).clone().svd(true, true))
    });

    g.finish();
}

fn svd_30x20(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd_30x20");

    g.bench_function("densela", |b| {
        let a = densela_mat(30, 20);
        b.iter(|| std::hint::black_box(&a).svd())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat(30, 20);
        b.iter(|| std::hint::black_box(&a).clone().svd(true, true))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Eigenvalue decomposition
// ---------------------------------------------------------------------------

fn eigen_symmetric_20(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen_symmetric_20x20");

    g.bench_function("densela", |b| {
        let a = densela::DenseMatrix::from_fn(20, 20, sym_entry);
        b.iter(|| std::hint::black_box(&a).eig())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra::DMatrix::from_fn(20, 20, sym_entry);
        b.iter(|| std::hint::black_box(&a).clone().symmetric_eigen())
    });

    g.finish();
}

fn eigen_general_20(c: &mut Criterion) {
    let mut g = c.benchmark_group("eigen_general_20x20");

    g.bench_function("densela", |b| {
        let a = densela_mat(20, 20);
        b.iter(|| std::hint::black_box(&a).eig())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat(20, 20);
        b.iter(|| std::hint::black_box(&a).complex_eigenvalues())
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Solve
// ---------------------------------------------------------------------------

fn solve_50(c: &mut Criterion) {
    let mut g = c.benchmark_group("solve_50x50");

    g.bench_function("densela", |b| {
        let a = densela_mat(50, 50);
        let rhs = densela::DenseMatrix::from_fn(50, 1, |i, _| (i + 1) as f64);
        b.iter(|| std::hint::black_box(&a).solve(std::hint::black_box(&rhs)))
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat(50, 50);
        let rhs = nalgebra::DMatrix::from_fn(50, 1, |i, _| (i + 1) as f64);
        b.iter(|| std::hint::black_box(&a).clone().lu().solve(std::hint::black_box(&rhs)))
    });

    g.finish();
}

criterion_group!(
    benches,
    matmul_50,
    qr_40x20,
    svd_6x6,
    svd_30x20,
    eigen_symmetric_20,
    eigen_general_20,
    solve_50,
);
criterion_main!(benches);
