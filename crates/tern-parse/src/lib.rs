//! Parser for a TypeScript-like scripting language producing lossless
//! syntax trees, with incremental reparsing after edits.

mod grammar;
mod incremental;
mod parser;

use tern_inputs::{LineStarts, SourceText, TextChangeRange};
use tern_span::Session;
use tern_tokenizer::{ReusableTokens, Tokenizer};
use tern_yellow::{NodeFlags, SyntaxTree};

use crate::incremental::ReusableNodes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse the whole file as strict code.
    pub strict: bool,
    /// Let incremental parses carry over elements of the old tree. When
    /// unset they are full parses.
    pub incremental: bool,
    /// Check identity uniqueness of every incrementally produced tree.
    pub check_invariants: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { strict: false, incremental: true, check_invariants: cfg!(debug_assertions) }
    }
}

/// How much of the old tree an incremental parse carried over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncrementalStats {
    pub reused_nodes: usize,
    pub reused_tokens: usize,
    /// Reused tokens plus every element of every reused node.
    pub reused_elements: usize,
}

pub fn parse<S: SourceText + ?Sized>(
    session: &mut Session,
    text: &S,
    options: &ParseOptions,
) -> SyntaxTree {
    run(session, text, options, None).0
}

/// Parses `new_text`, the result of applying `edits` to the text of `old`.
///
/// The result is the tree [`parse`] would produce for `new_text`. Invalid
/// edits are not an error: they only prevent reuse.
pub fn incremental_parse<S: SourceText + ?Sized>(
    session: &mut Session,
    old: &SyntaxTree,
    edits: &[TextChangeRange],
    new_text: &S,
    options: &ParseOptions,
) -> SyntaxTree {
    incremental::reparse(session, old, edits, new_text, options).0
}

pub fn incremental_parse_with_stats<S: SourceText + ?Sized>(
    session: &mut Session,
    old: &SyntaxTree,
    edits: &[TextChangeRange],
    new_text: &S,
    options: &ParseOptions,
) -> (SyntaxTree, IncrementalStats) {
    incremental::reparse(session, old, edits, new_text, options)
}

fn run<S: SourceText + ?Sized>(
    session: &mut Session,
    text: &S,
    options: &ParseOptions,
    pools: Option<(ReusableTokens, ReusableNodes)>,
) -> (SyntaxTree, IncrementalStats) {
    let source: &dyn SourceText = &text;
    let mut tokenizer = Tokenizer::new(source, &mut session.strings);
    let mut nodes = None;
    if let Some((tokens, reusable)) = pools {
        tokenizer = tokenizer.with_reuse(tokens);
        nodes = Some(reusable);
    }

    let context = if options.strict { NodeFlags::STRICT } else { NodeFlags::empty() };
    let mut parser = parser::Parser::new(tokenizer, context, nodes);
    grammar::items::source_file(&mut parser);
    let parsed = parser.build_tree();

    let tree = SyntaxTree::new(parsed.root, parsed.diagnostics, LineStarts::new(text));
    (tree, parsed.stats)
}
