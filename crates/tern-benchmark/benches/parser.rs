use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use tern_parse::{ParseOptions, parse};
use tern_span::Session;

fn benchmark_parser(c: &mut Criterion) {
    let files = [
        (
            "Simple",
            r#"
            function foo() {
                return 42;
            }
            "#,
        ),
        (
            "Medium",
            r#"
            class Greeter extends Base<string> implements Named {
                private name: string;

                constructor(name: string) {
                    super();
                    this.name = name;
                }

                greet(times: number = 1): string {
                    let result = "";
                    for (let i = 0; i < times; i++) {
                        result += "Hello, " + this.name + "\n";
                    }
                    return result;
                }
            }

            var re = /ab+c/g, ratio = a / b >> 2;
            if (re.test(ratio)) { greet<string>(1); } else throw new Error("none");
            "#,
        ),
    ];

    let options = ParseOptions { check_invariants: false, ..ParseOptions::default() };
    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, text) in files {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_code", name), &text, |b, &text| {
            let mut session = Session::new();
            b.iter(|| {
                let tree = parse(&mut session, text, &options);
                black_box(tree);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
