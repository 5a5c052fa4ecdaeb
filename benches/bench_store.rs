//! Benchmarks for `complaint_store::store`.
#![allow(missing_docs)]

use complaint_store::storage::{Directory, FsDirectory, MemoryDirectory};
use complaint_store::{ComplaintId, RecordStore, Status};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::sync::Arc;

fn issues() -> Vec<String> {
    vec![
        "Wi-Fi down in hostel block C since Monday".into(),
        "Projector in room 204 shows no signal".into(),
        "Water cooler on 2nd floor|leaking".into(),
        "Library closes before the posted time".into(),
        "Canteen overcharging for tea".into(),
    ]
}

fn seeded(dir: Arc<dyn Directory>, n: usize) -> RecordStore {
    let store = RecordStore::new(dir, "complaints_data.txt");
    let issues = issues();
    for i in 0..n {
        store
            .try_create(&format!("Student {i}"), &format!("R-{i:04}"), &issues[i % issues.len()])
            .unwrap();
    }
    store
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    group.bench_function("create_100_memory", |b| {
        b.iter_batched(
            || Arc::new(MemoryDirectory::new()) as Arc<dyn Directory>,
            |dir| seeded(dir, 100),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("read_all_1k_memory", |b| {
        let store = seeded(Arc::new(MemoryDirectory::new()), 1000);
        b.iter(|| store.read_all().len());
    });

    group.bench_function("list_1k_memory", |b| {
        let store = seeded(Arc::new(MemoryDirectory::new()), 1000);
        b.iter(|| store.list().len());
    });

    group.bench_function("update_status_1k_fs", |b| {
        let tmp = tempfile::tempdir().unwrap();
        let store = seeded(Arc::new(FsDirectory::new(tmp.path()).unwrap()), 1000);
        let target = ComplaintId::new(500).unwrap();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let status = if flip { Status::Resolved } else { Status::Pending };
            store.update_status(target, status)
        });
    });

    group.bench_function("delete_miss_1k_memory", |b| {
        let store = seeded(Arc::new(MemoryDirectory::new()), 1000);
        let missing = ComplaintId::new(99_999).unwrap();
        b.iter(|| store.delete(missing));
    });

    group.finish();
}

criterion_group!(benches, bench_store);
criterion_main!(benches);
