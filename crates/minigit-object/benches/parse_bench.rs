use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minigit_hash::ObjectId;
use minigit_object::{Commit, Tree, TreeEntry};

fn make_tree(n: usize) -> Tree {
    let entries = (0..n)
        .map(|i| {
            let oid = ObjectId::from_bytes(&[(i % 256) as u8; 20]).unwrap();
            if i % 10 == 0 {
                TreeEntry::tree(format!("dir{i:04}"), oid)
            } else {
                TreeEntry::blob(format!("file{i:04}.txt"), oid)
            }
        })
        .collect();
    Tree { entries }
}

fn bench_tree(c: &mut Criterion) {
    let data = make_tree(1000).serialize_content();
    c.bench_function("tree_parse_1000", |b| b.iter(|| Tree::parse(black_box(&data))));

    let tree = make_tree(1000);
    c.bench_function("tree_serialize_1000", |b| b.iter(|| black_box(&tree).serialize_content()));
}

fn bench_commit(c: &mut Criterion) {
    let commit = Commit {
        tree: Some(ObjectId::from_bytes(&[1; 20]).unwrap()),
        parents: vec![ObjectId::from_bytes(&[2; 20]).unwrap()],
        author: "Bench <bench@example.com>".into(),
        committer: "Bench <bench@example.com>".into(),
        timestamp: 0,
        message: "benchmark commit\n\nwith a body".into(),
    };
    let data = commit.serialize_at(1_700_000_000);
    c.bench_function("commit_parse", |b| b.iter(|| Commit::parse(black_box(&data), 0)));
}

criterion_group!(benches, bench_tree, bench_commit);
criterion_main!(benches);
