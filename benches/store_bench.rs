//! Benchmarks for the feedback store and image parsing
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use meal_analyzer::meal::ImagePayload;
use meal_analyzer::storage::{FeedbackRecord, FeedbackStore};
use tempfile::tempdir;

fn image_of_size(bytes: usize) -> String {
    let data: Vec<u8> = (0..bytes).map(|i| (i % 251) as u8).collect();
    ImagePayload::from_bytes("image/jpeg", &data)
        .unwrap()
        .data_url()
        .to_string()
}

fn bench_image_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_parse");

    for size in [10 * 1024, 500 * 1024, 4 * 1024 * 1024] {
        let data_url = image_of_size(size);
        group.throughput(Throughput::Bytes(data_url.len() as u64));

        group.bench_function(format!("parse_{}k", size / 1024), |b| {
            b.iter(|| ImagePayload::parse(black_box(&data_url)).unwrap())
        });
    }

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("history");

    for count in [10, 100, 500] {
        let dir = tempdir().unwrap();
        let store = rt.block_on(FeedbackStore::open(dir.path())).unwrap();
        let image = image_of_size(20 * 1024);

        rt.block_on(async {
            for i in 0..count {
                let record = FeedbackRecord::new("bench", image.clone(), format!("meal {}", i))
                    .timestamp(format!("2024-01-01T00:00:{:02}.{:06}Z", i % 60, i));
                store.save(&record).await.unwrap();
            }
        });

        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("list_{}", count), |b| {
            b.iter(|| rt.block_on(store.history(black_box("bench"))).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_image_parse, bench_history);
criterion_main!(benches);
