use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use par2adv::builder::IndexBuilder;
use par2adv::search::{search, SearchContext};

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

fn bench_search(c: &mut Criterion) {
    let sizes = vec![1_000usize, 10_000, 100_000];

    for size in sizes {
        let words = make_dictionary(size);
        let mut builder = IndexBuilder::create(size);
        for word in &words {
            builder.insert(word);
        }
        let index = builder.finalize().unwrap();

        let mut group = c.benchmark_group(format!("search_{}", size));
        group.throughput(Throughput::Elements(1));

        let hit_query = words[size / 2];
        let mut miss_query = words[size / 2];
        miss_query[0] = b'Z';

        let mut ctx = SearchContext::new();

        group.bench_function("hit", |b| {
            b.iter(|| black_box(search(&index, black_box(&hit_query), 3, &mut ctx)))
        });

        group.bench_function("miss", |b| {
            b.iter(|| black_box(search(&index, black_box(&miss_query), 3, &mut ctx)))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
