//! This benchmarks the basic field operations.
//! It measures the base field `Fq` of BLS12-381 and the `Fq2` and `Fq12`
//! levels of its tower.
//!
//! To run this benchmark:
//!
//!     cargo bench --bench field_arith

use bls12_381_pairing::{ff::Field, Fq, Fq12, Fq2};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand_core::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

const SEED: [u8; 16] = [
    0x59, 0x62, 0xbe, 0x5d, 0x76, 0x3d, 0x31, 0x8d, 0x17, 0xdb, 0x37, 0x32, 0x54, 0x06, 0xbc, 0xe5,
];

fn bench_field_arithmetic<F: Field>(c: &mut Criterion, name: &'static str) {
    let mut rng = XorShiftRng::from_seed(SEED);

    let a = <F as Field>::random(&mut rng);
    let b = <F as Field>::random(&mut rng);
    let exp = rng.next_u64();

    let mut group = c.benchmark_group(format!("{} arithmetic", name));

    group.significance_level(0.1).sample_size(1000);
    group.throughput(Throughput::Elements(1));

    group.bench_function(format!("{}_add", name), |bencher| {
        bencher.iter(|| black_box(&a).add(black_box(&b)))
    });
    group.bench_function(format!("{}_sub", name), |bencher| {
        bencher.iter(|| black_box(&a).sub(black_box(&b)))
    });
    group.bench_function(format!("{}_mul", name), |bencher| {
        bencher.iter(|| black_box(&a).mul(black_box(&b)))
    });
    group.bench_function(format!("{}_square", name), |bencher| {
        bencher.iter(|| black_box(&a).square())
    });
    group.bench_function(format!("{}_pow_vartime", name), |bencher| {
        bencher.iter(|| black_box(&a).pow_vartime(black_box(&[exp])))
    });
    group.bench_function(format!("{}_invert", name), |bencher| {
        bencher.iter(|| black_box(&a).invert())
    });
    group.finish()
}

fn bench_base_field(c: &mut Criterion) {
    bench_field_arithmetic::<Fq>(c, "Fq");

    let mut rng = XorShiftRng::from_seed(SEED);
    let a = Fq::random(&mut rng);
    let sq = a.square();

    let mut group = c.benchmark_group("Fq special");
    group.significance_level(0.1).sample_size(100);
    group.bench_function("Fq_inverse", |bencher| {
        bencher.iter(|| black_box(&a).inverse())
    });
    group.bench_function("Fq_sqrt", |bencher| bencher.iter(|| black_box(&sq).sqrt()));
    group.bench_function("Fq_to_bytes", |bencher| {
        bencher.iter(|| black_box(&a).to_bytes())
    });
    group.finish()
}

fn bench_fq2(c: &mut Criterion) {
    bench_field_arithmetic::<Fq2>(c, "Fq2");

    let mut rng = XorShiftRng::from_seed(SEED);
    let sq = Fq2::random(&mut rng).square();

    let mut group = c.benchmark_group("Fq2 special");
    group.significance_level(0.1).sample_size(100);
    group.bench_function("Fq2_sqrt", |bencher| bencher.iter(|| black_box(&sq).sqrt()));
    group.finish()
}

fn bench_fq12(c: &mut Criterion) {
    bench_field_arithmetic::<Fq12>(c, "Fq12");

    let mut rng = XorShiftRng::from_seed(SEED);
    let a = Fq12::random(&mut rng);
    let exp = rng.next_u64();

    let mut group = c.benchmark_group("Fq12 cyclotomic");
    group.significance_level(0.1).sample_size(100);
    group.bench_function("Fq12_cyclotomic_square", |bencher| {
        bencher.iter(|| {
            let mut a = black_box(a);
            a.cyclotomic_square();
            a
        })
    });
    group.bench_function("Fq12_cyclotomic_exp", |bencher| {
        bencher.iter(|| black_box(&a).cyclotomic_exp(black_box([exp])))
    });
    group.finish()
}

criterion_group!(benches, bench_base_field, bench_fq2, bench_fq12);
criterion_main!(benches);
