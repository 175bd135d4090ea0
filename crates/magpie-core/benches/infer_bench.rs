use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use magpie_core::linter::Linter;
use magpie_core::scope::ScopeInfo;
use magpie_core::syntax::{ExprIndex, Parser};
use magpie_core::typing::TypeInferencer;

fn bench_parse(c: &mut Criterion) {
    let source = r#"
        const names = ["ada", "grace", "hedy"];
        function shout(name) {
            return name.toUpperCase() + "!";
        }
        const loud = names.map(shout);
    "#;

    c.bench_function("parse_small", |b| {
        b.iter(|| Parser::parse_source(black_box(source)).unwrap());
    });
}

fn bench_infer_all_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer");

    let mixed = r#"
        const greeting = "hello, " + name;
        const count = items.length - removed;
        const tags = `#${greeting}`;
        const flags = enabled && fallback;
        const stamp = new Date();
        const pattern = new RegExp(raw, "g");
        const doubled = count * 2;
        const big = 10n ** 2n;
    "#;

    let (program, interner) = Parser::parse_source(mixed).unwrap();
    let scopes = ScopeInfo::analyze(&program);
    let index = ExprIndex::build(&program);

    group.bench_with_input(
        BenchmarkId::new("mixed_expressions", index.len()),
        &index,
        |b, index| {
            b.iter(|| {
                let inferencer = TypeInferencer::new(index, &scopes, &interner);
                for expr in index.expressions() {
                    black_box(inferencer.infer(expr));
                }
            });
        },
    );

    // A long chain of const bindings each aliasing the previous one;
    // every lookup walks the chain, the memoizer collapses repeats.
    let mut chained = String::from("const v0 = [1, 2, 3];\n");
    for i in 1..64 {
        chained.push_str(&format!("const v{i} = v{};\n", i - 1));
    }
    chained.push_str("v63;\n");

    let (program, interner) = Parser::parse_source(&chained).unwrap();
    let scopes = ScopeInfo::analyze(&program);
    let index = ExprIndex::build(&program);

    group.bench_with_input(
        BenchmarkId::new("alias_chain", "64 links"),
        &index,
        |b, index| {
            b.iter(|| {
                let inferencer = TypeInferencer::new(index, &scopes, &interner);
                for expr in index.expressions() {
                    black_box(inferencer.infer(expr));
                }
            });
        },
    );

    group.finish();
}

fn bench_lint(c: &mut Criterion) {
    let mut group = c.benchmark_group("lint");

    let small = r#"
        const xs = [1, 2, 3];
        xs.includes(2);
        " padded ".trimStart();
        new Date().toGMTString();
    "#;

    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_with_input(BenchmarkId::new("small", "4 statements"), &small, |b, source| {
        let linter = Linter::new();
        b.iter(|| linter.lint_source(black_box(source), "bench.js"));
    });

    // A larger synthetic file: mostly clean code with occasional hits.
    let mut large = String::new();
    for i in 0..100 {
        large.push_str(&format!(
            r#"
            function process{i}(data) {{
                const entries = [data.first, data.second];
                if (entries.includes(data.needle)) {{
                    return entries.flat();
                }}
                return ("" + data.label).trimEnd();
            }}
        "#
        ));
    }

    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("large", format!("{} bytes", large.len())),
        &large,
        |b, source| {
            let linter = Linter::new();
            b.iter(|| linter.lint_source(black_box(source), "bench.js"));
        },
    );

    group.finish();
}

criterion_group!(benches, bench_parse, bench_infer_all_expressions, bench_lint);
criterion_main!(benches);
