use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use neo_sdk::prelude::*;

fn bench_nep2(c: &mut Criterion) {
    let mut group = c.benchmark_group("nep2");
    group.sample_size(10);

    let raw_key = [0x01u8; 32];
    for (name, params) in [
        ("light", ScryptParameters::LIGHT),
        ("default", ScryptParameters::DEFAULT),
    ] {
        let encrypted = encrypt_key(&raw_key, "password", &params).unwrap();
        group.bench_with_input(BenchmarkId::new("encrypt", name), &params, |b, params| {
            b.iter(|| encrypt_key(&raw_key, "password", params).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decrypt", name), &params, |b, params| {
            b.iter(|| decrypt_key(&encrypted, "password", params).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nep2);
criterion_main!(benches);
