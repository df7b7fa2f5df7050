use limbreal::{Real, Real128, Real256, Real512};

fn test_constants() {
    // A precision that no other benchmark builds, so the first iteration
    // pays for the table.
    black_box(Real::<24>::pi());
}

fn test_sqrt() {
    black_box(Real512::from(2).sqrt());
}

fn test_div() {
    let a = Real512::from(355);
    let b = Real512::from(113);
    black_box(a / b);
}

fn test_exp_log() {
    let x = Real256::from(7.25);
    black_box(x.log().exp());
}

fn test_powi() {
    black_box(Real512::from(1.0001).powi(11000));
}

fn test_to_string() {
    black_box(Real512::e().to_string());
}

fn test_parse() {
    black_box("3.14159265358979323846264338327950288419716939937510".parse::<Real256>().unwrap());
}

fn test_sin_cos() {
    for i in 0..100 {
        let a = Real128::from_u64(i).sin();
        let b = Real128::from_u64(i).cos();
        black_box(a + b);
    }
}

fn test_gamma() {
    black_box(Real128::from(7.5).gamma());
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_constants", |b| b.iter(test_constants));
    c.bench_function("test_sqrt", |b| b.iter(test_sqrt));
    c.bench_function("test_div", |b| b.iter(test_div));
    c.bench_function("test_exp_log", |b| b.iter(test_exp_log));
    c.bench_function("test_powi", |b| b.iter(test_powi));
    c.bench_function("test_to_string", |b| b.iter(test_to_string));
    c.bench_function("test_parse", |b| b.iter(test_parse));
    c.bench_function("test_sin_cos", |b| b.iter(test_sin_cos));
    c.bench_function("test_gamma", |b| b.iter(test_gamma));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
