//! Manifest parsing benchmarks.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vantype_bench::{ModelShape, synthetic_manifest};
use vantype_schema::{parse_module, parse_type_ref, validate_module};

fn benchmark_parse_manifest(c: &mut Criterion) {
    let xml = synthetic_manifest(&ModelShape::default());
    let mut group = c.benchmark_group("manifest");
    group.throughput(Throughput::Bytes(xml.len() as u64));

    group.bench_function("parse", |b| {
        b.iter(|| parse_module(black_box(&xml)).unwrap())
    });

    let module = parse_module(&xml).unwrap();
    group.bench_function("validate", |b| {
        b.iter(|| validate_module(black_box(&module)).unwrap())
    });

    group.finish();
}

fn benchmark_parse_type_expression(c: &mut Criterion) {
    c.bench_function("parse_type_ref", |b| {
        b.iter(|| parse_type_ref(black_box("Dictionary<string, List<Lookup<int?>[]>>")).unwrap())
    });
}

criterion_group!(benches, benchmark_parse_manifest, benchmark_parse_type_expression);
criterion_main!(benches);
