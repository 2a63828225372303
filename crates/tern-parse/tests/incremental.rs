//! Property tests: parses are lossless and reparsing after arbitrary edits
//! agrees with parsing from scratch.

use proptest::prelude::*;
use proptest::sample::{Index, select};
use tern_inputs::TextChangeRange;
use tern_parse::{ParseOptions, incremental_parse, parse};
use tern_span::Session;
use text_size::{TextRange, TextSize};

const FRAGMENTS: &[&str] = &[
    "let a = 1;",
    "var b = a / 2 / c;",
    "const re = /x+/g;",
    "f(a, b);",
    "x >>= 2;",
    "'use strict';",
    "function g(p: number): string { return p + ''; }",
    "class C extends D { private m() { return this; } p = 1; }",
    "if (a) { b(); } else c();",
    "while (x) x--;",
    "(a, b) => a + b;",
    "g<T>(x);",
    "a < b > c;",
    "// comment",
    "/* block */",
    "return;",
    "interface I { a: number; m(): void }",
    "yield(1);",
    "\"str\\n\";",
    "let s = 'unterminated",
    "{ ) }",
    "var static = 0x;",
];

const INSERTS: &[&str] = &[
    "", " ", "\n", ";", "'use strict';\n", ">", "/", "(", ")", "{", "}", "x", " + 1", "=>", "/*",
    "*/", "'", "<T>",
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn options() -> ParseOptions {
    ParseOptions { check_invariants: true, ..ParseOptions::default() }
}

fn arb_source() -> impl Strategy<Value = String> {
    prop::collection::vec(select(FRAGMENTS), 0..12).prop_map(|fragments| fragments.join("\n"))
}

fn arb_edit() -> impl Strategy<Value = (Index, usize, &'static str)> {
    (any::<Index>(), 0..6usize, select(INSERTS))
}

/// Applies `edits`, given as start, deleted length and insertion against
/// the old text, in ascending order.
fn apply(text: &str, edits: &[(Index, usize, &str)]) -> (String, Vec<TextChangeRange>) {
    let mut spans: Vec<(usize, usize, &str)> = edits
        .iter()
        .map(|(index, len, insert)| {
            let start = index.index(text.len() + 1);
            (start, (start + len).min(text.len()), *insert)
        })
        .collect();
    spans.sort_by_key(|&(start, ..)| start);

    let mut new_text = String::new();
    let mut changes = Vec::new();
    let mut copied = 0;
    for (start, end, insert) in spans {
        // Overlapping edits are dropped.
        if start < copied {
            continue;
        }
        new_text.push_str(&text[copied..start]);
        new_text.push_str(insert);
        copied = end;

        let span = TextRange::new(TextSize::new(start as u32), TextSize::new(end as u32));
        changes.push(TextChangeRange::new(span, TextSize::of(insert)));
    }
    new_text.push_str(&text[copied..]);
    (new_text, changes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn parse_is_lossless(text in arb_source()) {
        let tree = parse(&mut Session::new(), text.as_str(), &options());
        prop_assert_eq!(tree.full_text(), text);
    }

    #[test]
    fn reparse_matches_full_parse(text in arb_source(), edit in arb_edit()) {
        init_tracing();
        let mut session = Session::new();
        let old = parse(&mut session, text.as_str(), &options());

        let (new_text, changes) = apply(&text, &[edit]);
        let new = incremental_parse(&mut session, &old, &changes, new_text.as_str(), &options());
        let full = parse(&mut Session::new(), new_text.as_str(), &options());

        prop_assert_eq!(new.full_text(), new_text);
        prop_assert!(new.structural_equals(&full), "{}\n{}", new.debug_dump(), full.debug_dump());
    }

    #[test]
    fn reparse_after_several_edits(
        text in arb_source(),
        edits in prop::collection::vec(arb_edit(), 1..4),
    ) {
        init_tracing();
        let mut session = Session::new();
        let old = parse(&mut session, text.as_str(), &options());

        let (new_text, changes) = apply(&text, &edits);
        let new = incremental_parse(&mut session, &old, &changes, new_text.as_str(), &options());
        let full = parse(&mut Session::new(), new_text.as_str(), &options());

        prop_assert!(new.structural_equals(&full), "{}\n{}", new.debug_dump(), full.debug_dump());
    }

    #[test]
    fn chained_reparses(text in arb_source(), first in arb_edit(), second in arb_edit()) {
        let mut session = Session::new();
        let tree = parse(&mut session, text.as_str(), &options());

        let (middle, changes) = apply(&text, &[first]);
        let tree = incremental_parse(&mut session, &tree, &changes, middle.as_str(), &options());
        let (last, changes) = apply(&middle, &[second]);
        let tree = incremental_parse(&mut session, &tree, &changes, last.as_str(), &options());

        let full = parse(&mut Session::new(), last.as_str(), &options());
        prop_assert!(tree.structural_equals(&full), "{}\n{}", tree.debug_dump(), full.debug_dump());
    }
}
