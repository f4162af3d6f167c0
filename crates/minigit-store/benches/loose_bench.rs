use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minigit_hash::Hasher;
use minigit_store::{LooseObjectStore, ObjectStore};

fn bench_loose(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = LooseObjectStore::open(dir.path().join("objects"));
    let content = vec![b'x'; 4096];
    let oid = Hasher::digest(&content).unwrap();

    c.bench_function("loose_put_4k", |b| {
        b.iter(|| store.put(black_box(&oid), black_box(&content)).unwrap())
    });
    c.bench_function("loose_get_4k", |b| b.iter(|| store.get(black_box(&oid)).unwrap()));
}

criterion_group!(benches, bench_loose);
criterion_main!(benches);
