use std::hint::black_box;

use codspeed_criterion_compat::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tern_inputs::TextChangeRange;
use tern_parse::{ParseOptions, incremental_parse, parse};
use tern_span::Session;
use text_size::{TextRange, TextSize};

const STATEMENT: &str = "let value = compute(a, b) + other.field[index] * 2;\n";

/// A file of `count` statements with a method-heavy class in the middle.
fn source(count: usize) -> String {
    let mut text = STATEMENT.repeat(count / 2);
    text.push_str("class Middle {\n");
    for i in 0..count / 10 {
        text.push_str(&format!("    method{i}(x: number) {{ return x * {i}; }}\n"));
    }
    text.push_str("}\n");
    text.push_str(&STATEMENT.repeat(count / 2));
    text
}

fn benchmark_incremental(c: &mut Criterion) {
    let options = ParseOptions { check_invariants: false, ..ParseOptions::default() };
    let mut group = c.benchmark_group("Incremental Benchmark");

    for count in [100, 1000] {
        let old_text = source(count);
        let at = old_text.find("return x * 1;").map_or(0, |at| at + "return x * 1".len());
        let mut new_text = old_text.clone();
        new_text.insert_str(at, " + 1");
        let change =
            TextChangeRange::new(TextRange::empty(TextSize::new(at as u32)), TextSize::of(" + 1"));

        let mut session = Session::new();
        let old = parse(&mut session, old_text.as_str(), &options);

        group.bench_with_input(BenchmarkId::new("full", count), &new_text, |b, text| {
            b.iter(|| black_box(parse(&mut session, text.as_str(), &options)));
        });
        group.bench_with_input(BenchmarkId::new("incremental", count), &new_text, |b, text| {
            b.iter(|| {
                let tree =
                    incremental_parse(&mut session, &old, &[change], text.as_str(), &options);
                black_box(tree)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_incremental);
criterion_main!(benches);
