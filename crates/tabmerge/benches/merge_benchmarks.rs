//! Merge performance benchmarks.
//!
//! Measures label normalization, CSV parsing and batch merging across
//! batch sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tabmerge::schema::STANDARD_COLUMNS;
use tabmerge::{merge_batch, normalize_label, CanonicalSchema, DataTable, ParsedFile, Parser};

/// Generate CSV text with the standard header (drifted casing) plus extras.
fn generate_csv_data(rows: usize, extra_cols: usize) -> String {
    let mut headers: Vec<String> = STANDARD_COLUMNS
        .iter()
        .map(|h| h.to_lowercase().replace(" - ", "-"))
        .collect();
    headers.extend((0..extra_cols).map(|i| format!("extra_{}", i + 1)));

    let mut data = headers.join(",");
    data.push('\n');

    for row in 0..rows {
        let cells: Vec<String> = (0..headers.len())
            .map(|col| match col % 4 {
                0 => format!("ID_{:06}", row),
                1 => format!("{:.2}", row as f64 * 1.5),
                2 => format!("2023-{:02}-{:02}", (row % 12) + 1, (row % 28) + 1),
                _ => format!("Category_{}", row % 10),
            })
            .collect();
        data.push_str(&cells.join(","));
        data.push('\n');
    }

    data
}

/// Parse the same CSV once per file in the batch.
fn generate_batch(files: usize, rows: usize) -> Vec<ParsedFile> {
    let data = generate_csv_data(rows, 4);
    let parser = Parser::new();
    (0..files)
        .map(|i| {
            let name = format!("file_{}.csv", i);
            let (table, _) = parser.parse_bytes(&name, data.as_bytes()).unwrap();
            ParsedFile::parsed(name, table)
        })
        .collect()
}

/// Benchmark normalizing the standard header in its drifted spellings.
fn bench_normalize_labels(c: &mut Criterion) {
    let labels: Vec<String> = STANDARD_COLUMNS
        .iter()
        .map(|h| format!("  {}  ", h.to_uppercase().replace(" - ", "   -")))
        .collect();

    c.bench_function("normalize_standard_header", |b| {
        b.iter(|| {
            for label in &labels {
                black_box(normalize_label(black_box(label)));
            }
        })
    });
}

/// Benchmark parsing CSV files of various sizes.
fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 4);
        let bytes = data.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_bytes("bench.csv", data.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark merging batches of increasing size.
fn bench_merge_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_batch");
    let schema = CanonicalSchema::standard();

    for files in [1, 10, 50].iter() {
        let batch = generate_batch(*files, 1_000);
        let rows: usize = batch
            .iter()
            .map(|f| f.table.as_ref().map(DataTable::row_count).unwrap_or(0))
            .sum();

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("files", files), &batch, |b, batch| {
            b.iter_with_setup(
                || batch.clone(),
                |batch| black_box(merge_batch(batch, schema).unwrap()),
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_labels,
    bench_parse_csv,
    bench_merge_batch,
);
criterion_main!(benches);
