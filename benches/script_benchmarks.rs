//! Performance benchmarks for scenescript.
//!
//! - Parsing: the bundled test scripts
//! - Compilation: parse plus lowering to bytecode
//! - Execution: running a compiled Fibonacci loop on the stack machine

use bumpalo::Bump;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use scenescript::{Diagnostics, Engine};
use scenescript_parser::Parser;
use std::hint::black_box;

const FIBONACCI: &str = include_str!("../test_scripts/fibonacci.ss");
const COLORS: &str = include_str!("../test_scripts/colors.ss");

fn parsing_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for (name, source) in [("fibonacci", FIBONACCI), ("colors", COLORS)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let mut diagnostics = Diagnostics::new();
                let script = Parser::parse(black_box(source), &arena, &mut diagnostics);
                black_box(script.statements().len())
            });
        });
    }

    // ~1000 lines of straight-line arithmetic
    let large: String = (0..1000)
        .map(|i| format!("v{} = ({} + {}) * 2 - {} / 3\n", i, i, i + 1, i))
        .collect();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("straight_line_1000", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let mut diagnostics = Diagnostics::new();
            let script = Parser::parse(black_box(&large), &arena, &mut diagnostics);
            black_box(script.statements().len())
        });
    });

    group.finish();
}

fn compile_benchmarks(c: &mut Criterion) {
    let engine = Engine::new().expect("engine");
    c.bench_function("compiler/fibonacci", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let mut diagnostics = Diagnostics::new();
            let script = Parser::parse(black_box(FIBONACCI), &arena, &mut diagnostics);
            let program = engine.compile(&script).expect("compiles");
            black_box(program.len())
        });
    });
}

fn execution_benchmarks(c: &mut Criterion) {
    let mut engine = Engine::new().expect("engine");
    let arena = Bump::new();
    let script = engine.parse(FIBONACCI, &arena).expect("parses");
    let program = engine.compile(&script).expect("compiles");

    c.bench_function("vm/fibonacci_90", |b| {
        b.iter(|| {
            let result = engine.run(black_box(&program)).expect("runs");
            engine.take_output();
            black_box(result)
        });
    });
}

criterion_group!(benches, parsing_benchmarks, compile_benchmarks, execution_benchmarks);
criterion_main!(benches);
