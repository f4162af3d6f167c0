use std::sync::Arc;

use bstr::BString;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minigit_hash::ObjectId;
use minigit_object::FileMap;
use minigit_odb::ObjectDatabase;
use minigit_store::MemoryObjectStore;

fn make_files(n: usize) -> FileMap {
    (0..n)
        .map(|i| {
            let path = format!("dir{}/sub{}/file{i}.txt", i % 16, i % 5);
            (BString::from(path), ObjectId::from_bytes(&[(i % 256) as u8; 20]).unwrap())
        })
        .collect()
}

fn bench_tree_codec(c: &mut Criterion) {
    let odb = ObjectDatabase::new(Arc::new(MemoryObjectStore::new()));
    let files = make_files(2000);

    c.bench_function("encode_tree_2000", |b| {
        b.iter(|| odb.encode_tree(black_box(&files)).unwrap())
    });

    let root = odb.encode_tree(&files).unwrap().unwrap();
    c.bench_function("decode_tree_2000", |b| b.iter(|| odb.decode_tree(black_box(&root)).unwrap()));
}

criterion_group!(benches, bench_tree_codec);
criterion_main!(benches);
