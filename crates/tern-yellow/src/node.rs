//! Non-terminal nodes and the node-or-token sum.

use std::fmt;

use bitflags::bitflags;
use tern_span::{Identified, IdentityStamp};
use text_size::TextSize;
use triomphe::Arc;

use crate::walk::{PreorderWithTokens, WalkEventWithTokens};
use crate::{SyntaxKind, Token};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct NodeFlags: u8 {
        /// A diagnostic was reported while this node was open.
        const CONTAINS_DIAGNOSTICS = 1 << 0;
        /// Parsed under a strict-mode directive.
        const STRICT = 1 << 1;
        /// Parsed inside a function body.
        const IN_FUNCTION = 1 << 2;

        /// Parser state a node's shape may depend on.
        const CONTEXT = Self::STRICT.bits() | Self::IN_FUNCTION.bits();
    }
}

/// Either a node or a token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

pub type SyntaxElement = NodeOrToken<Node, Token>;

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn full_width(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.full_width(),
            NodeOrToken::Token(token) => token.full_width(),
        }
    }

    pub fn lookahead(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.lookahead(),
            NodeOrToken::Token(token) => token.lookahead(),
        }
    }

    pub fn leading_trivia_width(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.leading_trivia_width(),
            NodeOrToken::Token(token) => token.leading().width(),
        }
    }

    pub fn width(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.width(),
            NodeOrToken::Token(token) => token.width(),
        }
    }

    pub fn structurally_equal(&self, other: &SyntaxElement) -> bool {
        match (self, other) {
            (NodeOrToken::Node(a), NodeOrToken::Node(b)) => a.structurally_equal(b),
            (NodeOrToken::Token(a), NodeOrToken::Token(b)) => a.structurally_equal(b),
            _ => false,
        }
    }
}

impl Identified for SyntaxElement {
    fn identity_stamp(&self) -> &IdentityStamp {
        match self {
            NodeOrToken::Node(node) => node.identity_stamp(),
            NodeOrToken::Token(token) => token.identity_stamp(),
        }
    }

    fn same_object(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeOrToken::Node(a), NodeOrToken::Node(b)) => a.same_object(b),
            (NodeOrToken::Token(a), NodeOrToken::Token(b)) => a.same_object(b),
            _ => false,
        }
    }
}

impl From<Node> for SyntaxElement {
    fn from(node: Node) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<Token> for SyntaxElement {
    fn from(token: Token) -> Self {
        NodeOrToken::Token(token)
    }
}

struct NodeData {
    kind: SyntaxKind,
    children: Box<[SyntaxElement]>,
    full_width: TextSize,
    flags: NodeFlags,
    lookahead: u32,
    stamp: IdentityStamp,
}

/// An immutable interior node.
///
/// Nodes know their children but not their parent, so one node can sit in
/// both an old tree and the tree reparsed from it.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    pub fn new(
        kind: SyntaxKind,
        children: Vec<SyntaxElement>,
        flags: NodeFlags,
        lookahead: TextSize,
    ) -> Self {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        let full_width = children.iter().map(SyntaxElement::full_width).sum();
        Node(Arc::new(NodeData {
            kind,
            children: children.into_boxed_slice(),
            full_width,
            flags,
            lookahead: lookahead.into(),
            stamp: IdentityStamp::new(),
        }))
    }

    /// A node of the same kind and flags over different children.
    pub fn with_children(&self, children: Vec<SyntaxElement>) -> Node {
        Node::new(self.kind(), children, self.flags(), self.lookahead())
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn children(&self) -> &[SyntaxElement] {
        &self.0.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children().iter().filter_map(SyntaxElement::as_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.children().iter().filter_map(SyntaxElement::as_token)
    }

    #[inline]
    pub fn flags(&self) -> NodeFlags {
        self.0.flags
    }

    /// The context bits of [`Self::flags`].
    pub fn context(&self) -> NodeFlags {
        self.flags() & NodeFlags::CONTEXT
    }

    pub fn contains_diagnostics(&self) -> bool {
        self.flags().contains(NodeFlags::CONTAINS_DIAGNOSTICS)
    }

    #[inline]
    pub fn full_width(&self) -> TextSize {
        self.0.full_width
    }

    pub fn lookahead(&self) -> TextSize {
        TextSize::new(self.0.lookahead)
    }

    pub fn first_token(&self) -> Option<&Token> {
        self.children().iter().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.children().iter().rev().find_map(|child| match child {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn leading_trivia_width(&self) -> TextSize {
        self.first_token().map_or(TextSize::new(0), |token| token.leading().width())
    }

    pub fn trailing_trivia_width(&self) -> TextSize {
        self.last_token().map_or(TextSize::new(0), |token| token.trailing().width())
    }

    /// Width without the first token's leading and the last token's trailing
    /// trivia.
    pub fn width(&self) -> TextSize {
        let trivia = self.leading_trivia_width() + self.trailing_trivia_width();
        self.full_width().checked_sub(trivia).unwrap_or_default()
    }

    pub fn preorder_with_tokens(&self) -> PreorderWithTokens<'_> {
        PreorderWithTokens::new(self)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.preorder_with_tokens().filter_map(|event| match event {
            WalkEventWithTokens::Token(token) => Some(token),
            _ => None,
        })
    }

    /// Number of nodes and tokens in this subtree, itself included.
    pub fn element_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|child| match child {
                NodeOrToken::Node(node) => node.element_count(),
                NodeOrToken::Token(_) => 1,
            })
            .sum::<usize>()
    }

    pub fn write_full_text(&self, buf: &mut String) {
        for token in self.tokens() {
            token.write_full_text(buf);
        }
    }

    pub fn full_text(&self) -> String {
        let mut buf = String::with_capacity(self.full_width().into());
        self.write_full_text(&mut buf);
        buf
    }

    /// Kind, flags and children agree recursively; identity is ignored.
    pub fn structurally_equal(&self, other: &Node) -> bool {
        if self.same_object(other) {
            return true;
        }
        self.kind() == other.kind()
            && self.flags() == other.flags()
            && self.full_width() == other.full_width()
            && self.children().len() == other.children().len()
            && self
                .children()
                .iter()
                .zip(other.children())
                .all(|(a, b)| a.structurally_equal(b))
    }
}

impl Identified for Node {
    #[inline]
    fn identity_stamp(&self) -> &IdentityStamp {
        &self.0.stamp
    }

    #[inline]
    fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("full_width", &self.full_width())
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}

#[cfg(test)]
mod tests {
    use tern_span::StringTable;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{Trivia, TriviaKind, TriviaList};

    fn name(strings: &mut StringTable, text: &str) -> Token {
        Token::new(NAME, strings.intern_str(text), TriviaList::Empty, TriviaList::Empty)
    }

    #[test]
    fn widths_and_text() {
        let mut strings = StringTable::new();
        let space =
            TriviaList::new(vec![Trivia::new(TriviaKind::Whitespace, strings.intern_str(" "))]);
        let lhs = name(&mut strings, "a").with_leading_trivia(space.clone());
        let op = Token::canonical(PLUS)
            .with_leading_trivia(space.clone())
            .with_trailing_trivia(space.clone());
        let rhs = name(&mut strings, "b").with_trailing_trivia(space);

        let expr = Node::new(
            BINARY_EXPR,
            vec![
                Node::new(NAME_REF, vec![lhs.into()], NodeFlags::empty(), TextSize::new(0)).into(),
                op.into(),
                Node::new(NAME_REF, vec![rhs.into()], NodeFlags::empty(), TextSize::new(0)).into(),
            ],
            NodeFlags::empty(),
            TextSize::new(0),
        );

        assert_eq!(expr.full_text(), " a + b ");
        assert_eq!(expr.full_width(), TextSize::new(7));
        assert_eq!(expr.width(), TextSize::new(5));
        assert_eq!(expr.element_count(), 6);
        assert_eq!(expr.first_token().map(Token::text), Some("a"));
        assert_eq!(expr.last_token().map(Token::text), Some("b"));
    }

    #[test]
    fn structural_equality_ignores_identity() {
        let mut strings = StringTable::new();
        let a =
            Node::new(NAME_REF, vec![name(&mut strings, "x").into()], NodeFlags::empty(), 0.into());
        let b =
            Node::new(NAME_REF, vec![name(&mut strings, "x").into()], NodeFlags::empty(), 0.into());
        let strict =
            Node::new(NAME_REF, vec![name(&mut strings, "x").into()], NodeFlags::STRICT, 0.into());

        assert!(!a.same_object(&b));
        assert!(a.structurally_equal(&b));
        assert!(!a.structurally_equal(&strict));
    }
}
