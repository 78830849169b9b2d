//! Benchmarks for internal-call dispatch.
//!
//! Measures token lookup over a table sized like a real linked-icall build
//! (a few thousand entries in the core module), for both hits and misses.

extern crate hostbridge;

use criterion::{criterion_group, criterion_main, Criterion};
use hostbridge::icall::{IcallModule, IcallTable};
use hostbridge::token::Token;
use std::hint::black_box;

const TABLE_SIZE: usize = 4096;

fn icall_stub() {}

fn build_table() -> IcallTable {
    // sparse ascending indices, every third MethodDef row
    let indexes: Vec<u32> = (0..TABLE_SIZE as u32).map(|i| i * 3 + 1).collect();
    let handles: Vec<bool> = (0..TABLE_SIZE).map(|i| i % 2 == 0).collect();
    let funcs: Vec<fn()> = vec![icall_stub as fn(); TABLE_SIZE];

    let module = IcallModule {
        module: "corelib",
        token_indexes: Box::leak(indexes.into_boxed_slice()),
        uses_handles: Box::leak(handles.into_boxed_slice()),
        funcs: Box::leak(funcs.into_boxed_slice()),
    };
    IcallTable::new(Box::leak(Box::new([module])))
}

fn bench_icall_lookup(c: &mut Criterion) {
    let table = build_table();

    let hit = Token(0x0600_0000 | (2048 * 3 + 1));
    let miss = Token(0x0600_0000 | (2048 * 3 + 2));

    let mut group = c.benchmark_group("icall_lookup");
    group.bench_function("hit", |b| {
        b.iter(|| black_box(table.lookup(black_box(hit), "corelib")));
    });
    group.bench_function("miss", |b| {
        b.iter(|| black_box(table.lookup(black_box(miss), "corelib")));
    });
    group.finish();
}

criterion_group!(benches, bench_icall_lookup);
criterion_main!(benches);
