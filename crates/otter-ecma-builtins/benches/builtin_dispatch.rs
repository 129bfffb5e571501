//! Builtin property lookup and routine dispatch benchmarks
//!
//! Measures the cold path (first lookup materializes the property) against
//! the warm path (property already an ordinary own property), and the cost
//! of routing a call through the packed routine id.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use otter_ecma_builtins::lookup;
use otter_ecma_builtins::{BuiltinId, Engine, EngineConfig};
use otter_ecma_core::{JsString, MagicStringId, Value};
use std::hint::black_box;

fn bench_table_search(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default());
    let table = engine.builtin_property_names(BuiltinId::Math);

    c.bench_function("table_find_math_tan", |b| {
        b.iter(|| lookup::find(black_box(table), black_box(MagicStringId::Tan)))
    });
}

fn bench_property_lookup(c: &mut Criterion) {
    let name = JsString::new("parseInt");

    c.bench_function("global_lookup_cold", |b| {
        b.iter_batched(
            || Engine::new(EngineConfig::default()),
            |engine| {
                let global = engine.global();
                black_box(engine.get(&global, &name).unwrap());
            },
            BatchSize::SmallInput,
        )
    });

    let engine = Engine::new(EngineConfig::default());
    let global = engine.global();
    engine.get(&global, &name).unwrap();
    c.bench_function("global_lookup_warm", |b| {
        b.iter(|| black_box(engine.get(&global, black_box(&name)).unwrap()))
    });
}

fn bench_routine_dispatch(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default());
    let math = engine.registry().get(BuiltinId::Math);
    let max = engine.get_magic(&math, MagicStringId::Max).unwrap();
    let this = Value::object(math);
    let args = [Value::number(3.0), Value::number(9.0), Value::number(-1.0)];

    c.bench_function("math_max_3_args", |b| {
        b.iter(|| black_box(engine.call(&max, &this, black_box(&args)).unwrap()))
    });

    let global = engine.global();
    let parse_int = engine.get(&global, &JsString::new("parseInt")).unwrap();
    let args = [Value::string("7fffffff"), Value::number(16.0)];
    c.bench_function("parse_int_hex", |b| {
        b.iter(|| {
            black_box(
                engine
                    .call(&parse_int, &Value::undefined(), black_box(&args))
                    .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_table_search,
    bench_property_lookup,
    bench_routine_dispatch
);
criterion_main!(benches);
