use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spl_checkouts::models::{CheckoutRecord, DataDictionary, DictionaryEntry, RawCheckout};
use spl_checkouts::processors::RecordTransformer;
use spl_checkouts::readers::ChunkReader;
use spl_checkouts::writers::ChunkWriter;

// Create test data for benchmarking
fn create_test_dictionary(code_count: usize) -> DataDictionary {
    let mut dictionary = DataDictionary::new();
    for i in 0..code_count {
        dictionary
            .insert(DictionaryEntry::new(
                format!("code{}", i),
                if i % 5 == 0 { "Electronic" } else { "Book" }.to_string(),
                "Fiction".to_string(),
                if i % 7 == 0 { "Miscellaneous" } else { "Fiction" }.to_string(),
                "Adult".to_string(),
            ))
            .expect("unique synthetic codes");
    }
    dictionary
}

fn create_raw_checkouts(rows: usize, code_count: usize) -> Vec<RawCheckout> {
    (0..rows)
        .map(|i| {
            RawCheckout::new(
                format!("code{}", i % code_count),
                format!("Title {}", i),
                (i % 2 == 0).then(|| "Fiction".to_string()),
                "09/14/2020 01:14:15 PM".to_string(),
            )
        })
        .collect()
}

fn create_enriched_records(rows: usize) -> Vec<CheckoutRecord> {
    let base_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..rows)
        .map(|i| {
            CheckoutRecord::new(
                base_date + chrono::Duration::days((i % 365) as i64),
                format!("Title {}", i),
                None,
                "Book".to_string(),
                "Fiction".to_string(),
                "Fiction".to_string(),
                "Adult".to_string(),
            )
        })
        .collect()
}

fn benchmark_transform(c: &mut Criterion) {
    let dictionary = create_test_dictionary(50);
    let raw = create_raw_checkouts(10_000, 50);
    let transformer = RecordTransformer::new();

    c.bench_function("transform_10k", |b| {
        b.iter(|| {
            let outcome = transformer
                .transform(black_box(&raw), black_box(&dictionary))
                .unwrap();
            black_box(outcome.records.len())
        })
    });
}

fn benchmark_chunk_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_round_trip");

    for rows in [1_000usize, 10_000] {
        let records = create_enriched_records(rows);

        group.bench_with_input(BenchmarkId::from_parameter(rows), &records, |b, records| {
            b.iter(|| {
                let temp_dir = tempfile::TempDir::new().unwrap();
                let paths = ChunkWriter::new()
                    .with_chunk_size(rows / 4)
                    .write_chunks(records, temp_dir.path(), "bench")
                    .unwrap();

                let reloaded = ChunkReader::new()
                    .load_chunks(temp_dir.path(), "bench", paths.len())
                    .unwrap();
                black_box(reloaded.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_transform, benchmark_chunk_round_trip);
criterion_main!(benches);
