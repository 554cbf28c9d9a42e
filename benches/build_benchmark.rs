use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use par2adv::builder::IndexBuilder;

fn make_dictionary(n: usize) -> Vec<[u8; 15]> {
    const ALPHABET: &[u8] = b"ABCDEFGHIJ";
    (0..n)
        .map(|i| {
            let mut word = [0u8; 15];
            let mut v = i;
            for slot in word.iter_mut() {
                *slot = ALPHABET[v % ALPHABET.len()];
                v /= ALPHABET.len();
            }
            word
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let sizes = vec![1_000usize, 10_000, 100_000];

    for size in sizes {
        let words = make_dictionary(size);

        let mut group = c.benchmark_group(format!("build_{}", size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function("index_builder", |b| {
            b.iter(|| {
                let mut builder = IndexBuilder::create(size);
                for word in &words {
                    builder.insert(black_box(word));
                }
                black_box(builder.finalize().unwrap())
            })
        });

        group.finish();
    }
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
