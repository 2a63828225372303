//! Reparsing an edited text against the tree of its previous version.
//!
//! The reparser is the ordinary parser fed with two pools of old elements:
//! tokens the tokenizer hands out instead of scanning, and statements or
//! class members the grammar splices in instead of parsing. An old element
//! qualifies when nothing it depended on changed:
//!
//! - its text and the recorded lookahead past its end lie outside the change
//!   window,
//! - it carries no diagnostic and no recovery artefacts,
//! - for nodes, the strict and function context at the new position equals
//!   the one it was parsed in.
//!
//! Lookups are by position: an element is only ever taken at the offset a
//! fresh parse would reach anyway, so every reused element appears once.

use tern_inputs::{ChangeWindow, SourceText, TextChangeRange, TextChanges};
use tern_span::Session;
use tern_tokenizer::ReusableTokens;
use tern_yellow::{Node, NodeFlags, SyntaxKind, SyntaxTree, WalkEventWithTokens};
use text_size::{TextRange, TextSize};

use crate::{IncrementalStats, ParseOptions};

/// Statements and class members of an old tree that may be spliced into
/// the new one.
pub(crate) struct ReusableNodes {
    nodes: Vec<(TextSize, Node)>,
    window: ChangeWindow,
}

impl ReusableNodes {
    pub(crate) fn new(root: &Node, window: ChangeWindow) -> Self {
        let mut nodes = Vec::new();
        let mut offset = TextSize::new(0);

        for event in root.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    let kind = node.kind();
                    let full_range = TextRange::at(offset, node.full_width());
                    if (kind.is_statement() || kind.is_class_member())
                        && !node.contains_diagnostics()
                        && !full_range.is_empty()
                        && window.is_untouched(full_range, node.lookahead())
                    {
                        nodes.push((offset, node.clone()));
                    }
                }
                WalkEventWithTokens::Token(token) => offset += token.full_width(),
                WalkEventWithTokens::LeaveNode(_) => {}
            }
        }

        Self { nodes, window }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The outermost node starting where the new text has `offset` whose
    /// kind is accepted and whose context matches.
    pub(crate) fn find(
        &self,
        offset: TextSize,
        context: NodeFlags,
        accept: fn(SyntaxKind) -> bool,
    ) -> Option<&Node> {
        let old = self.window.new_to_old(offset)?;
        let first = self.nodes.partition_point(|(start, _)| *start < old);
        self.nodes[first..]
            .iter()
            .take_while(|(start, _)| *start == old)
            .map(|(_, node)| node)
            .find(|node| accept(node.kind()) && node.context() == context)
    }
}

/// Builds the reuse pools for `old`, or `None` when nothing may be reused.
pub(crate) fn reuse_pools(
    old: &SyntaxTree,
    edits: &[TextChangeRange],
    new_text: &(impl SourceText + ?Sized),
    options: &ParseOptions,
) -> Option<(ReusableTokens, ReusableNodes)> {
    if !options.incremental {
        return None;
    }

    let changes = match TextChanges::new(edits.to_vec(), old.len(), new_text.len()) {
        Ok(changes) => changes,
        Err(error) => {
            tracing::warn!(%error, "invalid edits, falling back to a full parse");
            return None;
        }
    };
    let mut window = changes.window()?;

    // The token touching the start of the edit may merge with what was
    // inserted, whatever its recorded lookahead says.
    let mut offset = TextSize::new(0);
    for token in old.root().tokens() {
        let full_end = offset + token.full_width();
        if full_end >= window.old_start() {
            window.extend_start(offset);
            break;
        }
        offset = full_end;
    }

    let tokens = ReusableTokens::new(old.root(), window);
    let nodes = ReusableNodes::new(old.root(), window);
    tracing::debug!(
        old_start = ?window.old_start(),
        old_end = ?window.old_end(),
        delta = window.delta(),
        tokens = tokens.len(),
        nodes = nodes.len(),
        "reuse candidates"
    );
    Some((tokens, nodes))
}

pub(crate) fn reparse<S: SourceText + ?Sized>(
    session: &mut Session,
    old: &SyntaxTree,
    edits: &[TextChangeRange],
    new_text: &S,
    options: &ParseOptions,
) -> (SyntaxTree, IncrementalStats) {
    let pools = reuse_pools(old, edits, new_text, options);
    let (tree, stats) = crate::run(session, new_text, options, pools);
    tracing::debug!(
        reused_nodes = stats.reused_nodes,
        reused_tokens = stats.reused_tokens,
        reused_elements = stats.reused_elements,
        "incremental parse finished"
    );
    if options.check_invariants {
        tern_yellow::invariants::check(&tree, &session.identities);
    }
    (tree, stats)
}
