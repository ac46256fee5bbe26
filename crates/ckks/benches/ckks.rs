use ckks::{CkksParameters, Plaintext, PublicKey, SecretKey};
use ckks_traits::{FheDecoder, FheDecrypter, FheEncoder, FheEncrypter};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::thread_rng;
use std::time::Duration;

pub fn ckks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ckks");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let mut rng = thread_rng();
    let par = CkksParameters::benchmark().unwrap();
    let sk = SecretKey::random(&par, &mut rng).unwrap();
    let pk = PublicKey::new(&sk, &mut rng).unwrap();
    let values = vec![9.0; par.slots()];

    group.bench_function("encode", |b| {
        b.iter(|| Plaintext::try_encode(&values, par.encoding(), &par).unwrap());
    });

    let pt = Plaintext::try_encode(&values, par.encoding(), &par).unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| Vec::<f64>::try_decode(&pt, None).unwrap());
    });

    group.bench_function("encrypt_pk", |b| {
        b.iter(|| pk.try_encrypt(&pt, &mut rng).unwrap());
    });

    group.bench_function("encrypt_sk", |b| {
        b.iter(|| sk.try_encrypt(&pt, &mut thread_rng()).unwrap());
    });

    let ct = pk.try_encrypt(&pt, &mut thread_rng()).unwrap();
    group.bench_function("decrypt", |b| {
        b.iter(|| sk.try_decrypt(&ct).unwrap());
    });

    group.finish();
}

criterion_group!(benches, ckks_benchmark);
criterion_main!(benches);
