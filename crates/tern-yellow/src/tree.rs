//! The unit of parser output.

use std::fmt::{self, Write};

use tern_errors::Diagnostic;
use tern_inputs::LineStarts;
use tern_span::IdentityCounter;
use text_size::{TextRange, TextSize};

use crate::walk::WalkEventWithTokens;
use crate::{Node, SyntaxInfo, Token, TriviaList};

/// Root node, diagnostics in the order they were reported, and the line-start
/// table of the text the tree was parsed from.
#[derive(Clone)]
pub struct SyntaxTree {
    root: Node,
    diagnostics: Vec<Diagnostic>,
    line_starts: LineStarts,
}

impl SyntaxTree {
    pub fn new(root: Node, diagnostics: Vec<Diagnostic>, line_starts: LineStarts) -> Self {
        Self { root, diagnostics, line_starts }
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn line_starts(&self) -> &LineStarts {
        &self.line_starts
    }

    /// Zero-based line and column of `offset`.
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        self.line_starts.line_col(offset)
    }

    pub fn len(&self) -> TextSize {
        self.root.full_width()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == TextSize::new(0)
    }

    /// Reconstructs the source text from tokens and trivia.
    pub fn full_text(&self) -> String {
        self.root.full_text()
    }

    pub fn info<'c>(&self, identities: &'c IdentityCounter) -> SyntaxInfo<'c> {
        SyntaxInfo::new(&self.root, identities)
    }

    /// Same diagnostics and the same tree shape, ignoring which objects make
    /// up either tree.
    pub fn structural_equals(&self, other: &SyntaxTree) -> bool {
        self.diagnostics == other.diagnostics && self.root.structurally_equal(&other.root)
    }

    /// Indented listing of nodes, tokens and trivia with their ranges,
    /// followed by the diagnostics.
    pub fn debug_dump(&self) -> String {
        let mut buf = String::new();
        let mut indent = 0usize;
        let mut offset = TextSize::new(0);

        for event in self.root.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    let range = TextRange::at(offset + node.leading_trivia_width(), node.width());
                    _ = writeln!(buf, "{:indent$}{:?}@{:?}", "", node.kind(), range);
                    indent += 2;
                }
                WalkEventWithTokens::LeaveNode(_) => indent -= 2,
                WalkEventWithTokens::Token(token) => {
                    offset = dump_token(&mut buf, indent, offset, token);
                }
            }
        }

        for diagnostic in &self.diagnostics {
            _ = writeln!(
                buf,
                "{}@{:?}: {}",
                diagnostic.code(),
                diagnostic.range(),
                diagnostic.message()
            );
        }
        buf
    }
}

fn dump_token(buf: &mut String, indent: usize, mut offset: TextSize, token: &Token) -> TextSize {
    offset = dump_trivia(buf, indent, offset, token.leading());
    let range = TextRange::at(offset, token.width());
    if token.is_missing() {
        _ = writeln!(buf, "{:indent$}{:?}@{:?} (missing)", "", token.kind(), range);
    } else {
        _ = writeln!(buf, "{:indent$}{:?}@{:?} {:?}", "", token.kind(), range, token.text());
    }
    dump_trivia(buf, indent, range.end(), token.trailing())
}

fn dump_trivia(
    buf: &mut String,
    indent: usize,
    mut offset: TextSize,
    trivia: &TriviaList,
) -> TextSize {
    for piece in trivia {
        let range = TextRange::at(offset, piece.width());
        _ = writeln!(buf, "{:indent$}{:?}@{:?} {:?}", "", piece.kind, range, piece.text.as_str());
        offset = range.end();
    }
    offset
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}
