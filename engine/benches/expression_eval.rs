//! FILENAME: engine/benches/expression_eval.rs
//! Parse and evaluation throughput for typical model expressions.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::{ExpEngine, MapVarTable};

const SOURCES: &[&str] = &[
    "2*5 + 3*5*(3-1)+2",
    "[Queue 1].Length > 10 && [Server].Busy == 0",
    "max([Order].Quantity * [Order].Price, 100) / 2^3",
    "!([Machine].Failed || [Machine].Blocked) * abs(-[Machine].Rate)",
];

fn table() -> MapVarTable {
    let mut vars = MapVarTable::with_fallback(1.0);
    vars.set(&["Queue 1", "Length"], 12.0);
    vars.set(&["Server", "Busy"], 0.0);
    vars.set(&["Order", "Quantity"], 40.0);
    vars.set(&["Order", "Price"], 2.5);
    vars
}

fn bench_parse(c: &mut Criterion) {
    let engine = ExpEngine::new();

    c.bench_function("parse_expressions", |b| {
        b.iter(|| {
            for source in SOURCES {
                black_box(engine.parse_expression(black_box(source)).ok());
            }
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = ExpEngine::new();
    let vars = table();
    let exprs: Vec<_> = SOURCES
        .iter()
        .filter_map(|s| engine.parse_expression(s).ok())
        .collect();

    c.bench_function("evaluate_parsed", |b| {
        b.iter(|| {
            for expr in &exprs {
                black_box(engine.evaluate(black_box(expr), &vars).ok());
            }
        })
    });
}

fn bench_deep_nesting(c: &mut Criterion) {
    let engine = ExpEngine::new();
    let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));

    c.bench_function("parse_nested_100", |b| {
        b.iter(|| black_box(engine.parse_expression(black_box(&source)).ok()))
    });
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_deep_nesting);
criterion_main!(benches);
