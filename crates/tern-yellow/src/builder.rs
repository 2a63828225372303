//! Assembles parser output into an immutable tree.

use text_size::TextSize;

use crate::{Node, NodeFlags, SyntaxElement, SyntaxKind, Token, TokenFlags};

struct Frame {
    kind: SyntaxKind,
    flags: NodeFlags,
    children: Vec<SyntaxElement>,
    /// One past the furthest byte any child's production examined.
    reach: TextSize,
}

/// Builds a tree bottom-up from start/token/finish calls.
///
/// Besides the children, every node records how far past its own end the
/// text was examined while it was produced, and whether a diagnostic was
/// reported while it was open.
pub struct Builder {
    stack: Vec<Frame>,
    position: TextSize,
    root: Option<Node>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.stack.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 64;
const DEFAULT_CHILDREN_LEN: usize = 8;

impl Builder {
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            position: TextSize::new(0),
            root: None,
        }
    }

    /// Full end of the last element added.
    pub fn position(&self) -> TextSize {
        self.position
    }

    /// Starts a node; `context` keeps only the context bits.
    pub fn start_node(&mut self, kind: SyntaxKind, context: NodeFlags) {
        assert!(self.root.is_none(), "the root node is already finished");
        self.stack.push(Frame {
            kind,
            flags: context & NodeFlags::CONTEXT,
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
            reach: self.position,
        });
    }

    #[track_caller]
    pub fn token(&mut self, token: Token) {
        if token.flags().contains(TokenFlags::HAS_ERROR) || token.has_skipped_text() {
            self.mark_error();
        }
        self.position += token.full_width();
        let reach = self.position + token.lookahead();
        self.push_child(token.into(), reach);
    }

    /// Adds a finished node, typically one carried over from an older tree.
    #[track_caller]
    pub fn node(&mut self, node: Node) {
        if node.contains_diagnostics() {
            self.mark_error();
        }
        self.position += node.full_width();
        let reach = self.position + node.lookahead();
        self.push_child(node.into(), reach);
    }

    /// Flags every open node as containing a diagnostic.
    pub fn mark_error(&mut self) {
        for frame in &mut self.stack {
            frame.flags |= NodeFlags::CONTAINS_DIAGNOSTICS;
        }
    }

    /// Finishes the innermost node. `reach` is how far the parser had looked
    /// when it decided the node was complete.
    #[track_caller]
    pub fn finish_node(&mut self, reach: TextSize) {
        let Some(frame) = self.stack.pop() else {
            panic!("`finish_node` called without an open node");
        };
        let reach = frame.reach.max(reach).max(self.position);
        let lookahead = reach - self.position;
        let node = Node::new(frame.kind, frame.children, frame.flags, lookahead);

        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(node.into());
                parent.reach = parent.reach.max(reach);
            }
            None => self.root = Some(node),
        }
    }

    #[track_caller]
    pub fn finish(mut self) -> Node {
        assert!(self.stack.is_empty(), "unfinished nodes left in the builder");
        match self.root.take() {
            Some(root) => root,
            None => panic!("no node was built"),
        }
    }

    #[track_caller]
    fn push_child(&mut self, child: SyntaxElement, reach: TextSize) {
        let Some(frame) = self.stack.last_mut() else {
            panic!("elements must be added inside a node");
        };
        frame.children.push(child);
        frame.reach = frame.reach.max(reach);
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
