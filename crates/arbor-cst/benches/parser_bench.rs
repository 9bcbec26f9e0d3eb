// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Performance benchmarks for the arbor-cst parser, codegen, and metadata
//! engine.
//!
//! Run with:
//! ```bash
//! cargo bench -p arbor-cst
//! ```

use arbor_cst::metadata::{
    AccessorProvider, MetadataWrapper, ParentProvider, Registration, SyntacticPositionProvider,
};
use arbor_cst::{parse_module, RenameTransformer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Generate a module of simple assignments and arithmetic.
fn generate_simple_code(num_lines: usize) -> String {
    let mut code = String::new();
    for i in 0..num_lines {
        code.push_str(&format!("var_{i} = {i} + {i} * 2\n"));
    }
    code
}

/// Generate a module of nested blocks.
fn generate_block_code(num_blocks: usize) -> String {
    let mut code = String::new();
    for i in 0..num_blocks {
        code.push_str(&format!(
            "if flag_{i}:\n    # branch {i}\n    a_{i} = {i}\n    if a_{i}:\n        b_{i} = a_{i} - 1\nelse_{i} = 0\n"
        ));
    }
    code
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 100, 1000].iter() {
        let code = generate_simple_code(*size);
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}_lines")),
            &code,
            |b, code| {
                b.iter(|| {
                    let _ = black_box(parse_module(code, None).unwrap());
                });
            },
        );
    }
    for size in [10, 100].iter() {
        let code = generate_block_code(*size);
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}_blocks")),
            &code,
            |b, code| {
                b.iter(|| {
                    let _ = black_box(parse_module(code, None).unwrap());
                });
            },
        );
    }
    group.finish();
}

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen");
    let code = generate_block_code(100);
    let module = parse_module(&code, None).unwrap();
    group.throughput(Throughput::Bytes(code.len() as u64));
    group.bench_function("roundtrip_100_blocks", |b| {
        b.iter(|| {
            let _ = black_box(module.code());
        });
    });
    group.finish();
}

fn bench_rename(c: &mut Criterion) {
    let mut group = c.benchmark_group("rename");
    let code = generate_simple_code(500);
    let module = parse_module(&code, None).unwrap();
    group.bench_function("rename_500_lines", |b| {
        b.iter(|| {
            let mut rename = RenameTransformer::new("var_250", "renamed");
            let _ = black_box(module.visit(&mut rename).unwrap());
        });
    });
    group.finish();
}

fn bench_metadata(c: &mut Criterion) {
    let mut group = c.benchmark_group("metadata");
    let code = generate_block_code(100);
    let module = parse_module(&code, None).unwrap();
    let wrapper = MetadataWrapper::new(module);
    group.bench_function("resolve_three_providers_100_blocks", |b| {
        b.iter(|| {
            let resolution = wrapper
                .resolve(&[
                    Registration::of::<SyntacticPositionProvider>(),
                    Registration::of::<AccessorProvider>(),
                    Registration::of::<ParentProvider>(),
                ])
                .unwrap();
            black_box(resolution);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_codegen, bench_rename, bench_metadata);
criterion_main!(benches);
