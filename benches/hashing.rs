use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashtree::{hash, prove_existence, verify_existence, Digest, MerkleTree};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn hashing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");

    // Around the padding boundaries and up to 1MB
    let sizes = vec![32, 55, 56, 64, 1024, 65536, 1048576];

    for size in sizes {
        group.throughput(Throughput::Bytes(size as u64));

        let data = generate_test_data(size);

        group.bench_with_input(BenchmarkId::new("hash", size), &data, |b, data| {
            b.iter(|| hash(black_box(data)).unwrap())
        });
    }

    group.finish();
}

fn merkle_tree_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_tree");

    let leaf_counts = vec![1, 10, 100, 1000, 10000, 100000];

    for count in leaf_counts {
        group.throughput(Throughput::Elements(count as u64));

        let leaves: Vec<Digest> = (0..count)
            .map(|i| hash(format!("leaf_{}", i).as_bytes()).unwrap())
            .collect();

        group.bench_with_input(BenchmarkId::new("build_tree", count), &leaves, |b, leaves| {
            b.iter(|| MerkleTree::build(black_box(leaves.clone())).unwrap())
        });

        let tree = MerkleTree::build(leaves.clone()).unwrap();
        let leaf_index = count / 2;
        let path = prove_existence(&tree, leaf_index).unwrap();

        group.bench_with_input(
            BenchmarkId::new("prove", count),
            &(&tree, leaf_index),
            |b, (tree, leaf_index)| b.iter(|| prove_existence(tree, black_box(*leaf_index)).unwrap()),
        );

        group.bench_with_input(
            BenchmarkId::new("verify", count),
            &(tree.root(), leaves[leaf_index], &path),
            |b, (root, leaf, path)| {
                b.iter(|| verify_existence(black_box(root), black_box(leaf), path).unwrap())
            },
        );
    }

    group.finish();
}

fn generate_test_data(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    StdRng::seed_from_u64(12345).fill(&mut data[..]);
    data
}

criterion_group!(benches, hashing_benchmark, merkle_tree_benchmark);
criterion_main!(benches);
