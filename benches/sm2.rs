//! sm2p256 benchmarks.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand_core::OsRng;
use sm2p256::{
    DEFAULT_UID, FieldElement, SecretKey, Sm2Curve,
    dsa::SigningKey,
    pke::Mode,
};

fn bench_field(c: &mut Criterion) {
    let a = FieldElement::from_bytes(&[0x5Au8; 32]);
    let b = FieldElement::from_bytes(&[0xC3u8; 32]);

    c.bench_function("field mul", |bench| bench.iter(|| black_box(a) * black_box(b)));
    c.bench_function("field invert", |bench| bench.iter(|| black_box(a).invert()));
}

fn bench_scalar_mult(c: &mut Criterion) {
    let curve = Sm2Curve::new();
    let k = [0x7Fu8; 32];
    // warm the base-point table before timing
    let point = curve.scalar_base_mult(&k);

    c.bench_function("scalar_base_mult", |bench| {
        bench.iter(|| curve.scalar_base_mult(black_box(&k)))
    });
    c.bench_function("scalar_mult", |bench| {
        bench.iter(|| curve.scalar_mult(black_box(&point), black_box(&k)))
    });
}

fn bench_dsa(c: &mut Criterion) {
    let secret = SecretKey::random(&mut OsRng).expect("rng");
    let signing_key = SigningKey::new(DEFAULT_UID, &secret).expect("key");
    let msg = b"benchmark message";
    let signature = signing_key.sign(&mut OsRng, msg).expect("sign");

    c.bench_function("sign", |bench| {
        bench.iter(|| signing_key.sign(&mut OsRng, black_box(msg)).expect("sign"))
    });
    c.bench_function("verify", |bench| {
        bench.iter(|| signing_key.verifying_key().verify(black_box(msg), &signature))
    });
}

fn bench_pke(c: &mut Criterion) {
    let secret = SecretKey::random(&mut OsRng).expect("rng");
    let public = secret.public_key();
    let msg = [0xABu8; 256];
    let ciphertext = public
        .encrypt(&mut OsRng, &msg, Mode::C1C3C2)
        .expect("encrypt");

    c.bench_function("encrypt 256B", |bench| {
        bench.iter(|| public.encrypt(&mut OsRng, black_box(&msg), Mode::C1C3C2))
    });
    c.bench_function("decrypt 256B", |bench| {
        bench.iter(|| secret.decrypt(black_box(&ciphertext), Mode::C1C3C2))
    });
}

criterion_group!(benches, bench_field, bench_scalar_mult, bench_dsa, bench_pke);
criterion_main!(benches);
