//! Dispatch benchmarks using criterion.
//!
//! Compares cached dispatch against first-time ancestor resolution over
//! hierarchies of increasing depth.
//!
//! Run with: cargo bench --bench dispatch_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use methodic::{DispatchTable, Namespace, PrimitiveKind, TypeKey, TypeObject, TypeRef, Value};

fn hierarchy(depth: usize) -> Vec<TypeRef> {
    let mut types: Vec<TypeRef> = Vec::with_capacity(depth);
    for level in 0..depth {
        let builder = TypeObject::builder(format!("T{level}"));
        let ty = match types.last() {
            Some(base) => builder.extends(base).build(),
            None => builder.build(),
        };
        types.push(ty);
    }
    types
}

/// Benchmark dispatch on a type whose entry is already cached
fn bench_cached_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_dispatch");

    for depth in [1usize, 8, 64] {
        let types = hierarchy(depth);
        let table = DispatchTable::new("probe");
        table.implement(&types[0], |_, _| Ok(Value::Null));
        let leaf = Value::instance(types.last().unwrap());
        table.invoke(&leaf, &[]).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(depth), &leaf, |b, leaf| {
            b.iter(|| black_box(table.invoke(black_box(leaf), &[])))
        });
    }

    group.finish();
}

/// Benchmark the first dispatch on a fresh table, which walks the full chain
fn bench_first_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_resolution");

    for depth in [1usize, 8, 64] {
        let types = hierarchy(depth);
        let leaf = Value::instance(types.last().unwrap());

        group.bench_with_input(BenchmarkId::from_parameter(depth), &leaf, |b, leaf| {
            b.iter(|| {
                let table = DispatchTable::new("probe");
                table.implement(&types[0], |_, _| Ok(Value::Null));
                black_box(table.invoke(leaf, &[]))
            })
        });
    }

    group.finish();
}

/// Benchmark primitive, null and default dispatch through a namespace
fn bench_namespace_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("namespace_dispatch");

    let ns = Namespace::new("bench");
    ns.define("show", PrimitiveKind::Number, |_, _| Ok(Value::Null));
    ns.define("show", TypeKey::Default, |_, _| Ok(Value::Null));
    let show = ns.bindings().get("show");

    let number = Value::from(1);
    let object = Value::object();
    group.bench_function("primitive", |b| {
        b.iter(|| black_box(show.call(black_box(&number), &[])))
    });
    group.bench_function("null_to_default", |b| {
        b.iter(|| black_box(show.call(black_box(&Value::Null), &[])))
    });
    group.bench_function("object_to_default", |b| {
        b.iter(|| black_box(show.call(black_box(&object), &[])))
    });
    group.bench_function("operation_lookup", |b| {
        b.iter(|| black_box(ns.operation(black_box("show"))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_dispatch,
    bench_first_resolution,
    bench_namespace_dispatch
);
criterion_main!(benches);
