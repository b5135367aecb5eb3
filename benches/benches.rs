use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crossbeam_skiplist::SkipSet;
use skipset::SkipList;

fn values(n: usize) -> Vec<i64> {
    let mut seed: u16 = rand::random::<u16>() | 1;

    (0..n)
        .map(|_| {
            seed ^= seed << 6;
            seed ^= seed >> 11;
            seed ^= seed << 5;
            seed as i64
        })
        .collect()
}

fn insert(c: &mut Criterion) {
    let values = values(1_000);

    c.bench_function("skipset_insert", |b| {
        b.iter(|| {
            let mut list = SkipList::with_seed(16, 0).unwrap();
            for value in &values {
                list.insert(black_box(*value));
            }
            list
        })
    });

    c.bench_function("crossbeam_insert", |b| {
        b.iter(|| {
            let set = SkipSet::new();
            for value in &values {
                set.insert(black_box(*value));
            }
            set
        })
    });
}

fn search(c: &mut Criterion) {
    let values = values(10_000);

    let mut list = SkipList::with_seed(16, 0).unwrap();
    list.extend(values.iter().copied());

    let set = SkipSet::new();
    values.iter().for_each(|value| {
        set.insert(*value);
    });

    c.bench_function("skipset_search", |b| {
        b.iter(|| values.iter().filter(|value| list.search(black_box(**value))).count())
    });

    c.bench_function("crossbeam_search", |b| {
        b.iter(|| values.iter().filter(|value| set.contains(black_box(*value))).count())
    });
}

fn insert_delete(c: &mut Criterion) {
    let values = values(1_000);

    c.bench_function("skipset_insert_delete", |b| {
        b.iter(|| {
            let mut list = SkipList::with_seed(16, 0).unwrap();
            list.extend(values.iter().copied());
            for value in &values {
                let _ = list.delete(black_box(*value));
            }
            list
        })
    });
}

criterion_group!(benches, insert, search, insert_delete);
criterion_main!(benches);
