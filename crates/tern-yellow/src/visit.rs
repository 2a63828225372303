//! Generic traversal: visitors, handler tables and walkers.
//!
//! Every role visits tokens and nodes in document order. A kind without a
//! specific handler falls back to visiting its children and yielding the
//! default output.

use crate::walk::{PreorderWithTokens, WalkEventWithTokens};
use crate::{Node, NodeOrToken, SyntaxElement, SyntaxKind, Token};

pub trait Visitor {
    type Output: Default;

    fn node(&mut self, node: &Node) -> Self::Output {
        visit_children(self, node)
    }

    fn token(&mut self, _token: &Token) -> Self::Output {
        Self::Output::default()
    }

    fn element(&mut self, element: &SyntaxElement) -> Self::Output {
        match element {
            NodeOrToken::Node(node) => self.node(node),
            NodeOrToken::Token(token) => self.token(token),
        }
    }
}

/// Visits every child of `node` and returns the default output.
pub fn visit_children<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) -> V::Output {
    for child in node.children() {
        visitor.element(child);
    }
    V::Output::default()
}

pub type NodeHandler<C, R> = fn(&HandlerTable<C, R>, &mut C, &Node) -> R;
pub type TokenHandler<C, R> = fn(&mut C, &Token) -> R;

/// Per-kind dispatch over a closed set of node kinds.
///
/// Handlers receive the table back so they can continue the traversal
/// below the node they handle.
pub struct HandlerTable<C, R> {
    nodes: Box<[Option<NodeHandler<C, R>>]>,
    token: Option<TokenHandler<C, R>>,
}

impl<C, R: Default> HandlerTable<C, R> {
    pub fn new() -> Self {
        Self { nodes: vec![None; SyntaxKind::COUNT].into_boxed_slice(), token: None }
    }

    #[track_caller]
    pub fn on(mut self, kind: SyntaxKind, handler: NodeHandler<C, R>) -> Self {
        assert!(kind.is_node(), "{kind:?} is a token kind; use `on_token`");
        self.nodes[kind as usize] = Some(handler);
        self
    }

    pub fn on_token(mut self, handler: TokenHandler<C, R>) -> Self {
        self.token = Some(handler);
        self
    }

    pub fn visit(&self, cx: &mut C, element: &SyntaxElement) -> R {
        match element {
            NodeOrToken::Node(node) => self.visit_node(cx, node),
            NodeOrToken::Token(token) => self.visit_token(cx, token),
        }
    }

    pub fn visit_node(&self, cx: &mut C, node: &Node) -> R {
        match self.nodes[node.kind() as usize] {
            Some(handler) => handler(self, cx, node),
            None => self.visit_children(cx, node),
        }
    }

    pub fn visit_token(&self, cx: &mut C, token: &Token) -> R {
        match self.token {
            Some(handler) => handler(cx, token),
            None => R::default(),
        }
    }

    pub fn visit_children(&self, cx: &mut C, node: &Node) -> R {
        for child in node.children() {
            self.visit(cx, child);
        }
        R::default()
    }
}

impl<C, R: Default> Default for HandlerTable<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WalkControl {
    #[default]
    Continue,
    SkipChildren,
    Stop,
}

/// Traversal that observes the tree without producing anything.
pub trait Walker {
    fn enter(&mut self, _node: &Node) -> WalkControl {
        WalkControl::Continue
    }

    fn leave(&mut self, _node: &Node) {}

    fn token(&mut self, _token: &Token) -> WalkControl {
        WalkControl::Continue
    }
}

pub fn walk<W: Walker + ?Sized>(walker: &mut W, root: &Node) {
    let mut preorder = PreorderWithTokens::new(root);
    while let Some(event) = preorder.next() {
        let control = match event {
            WalkEventWithTokens::EnterNode(node) => walker.enter(node),
            WalkEventWithTokens::LeaveNode(node) => {
                walker.leave(node);
                WalkControl::Continue
            }
            WalkEventWithTokens::Token(token) => walker.token(token),
        };
        match control {
            WalkControl::Continue => {}
            WalkControl::SkipChildren => {
                if matches!(event, WalkEventWithTokens::EnterNode(_)) {
                    preorder.skip_subtree();
                }
            }
            WalkControl::Stop => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use tern_span::StringTable;
    use text_size::TextSize;

    use super::*;
    use crate::NodeFlags;
    use crate::SyntaxKind::*;

    fn sample() -> Node {
        let mut strings = StringTable::new();
        let mut name = |text: &str| {
            let token = Token::new(
                NAME,
                strings.intern_str(text),
                Default::default(),
                Default::default(),
            );
            Node::new(NAME_REF, vec![token.into()], NodeFlags::empty(), TextSize::new(0))
        };
        let call = Node::new(
            CALL_EXPR,
            vec![
                name("f").into(),
                Node::new(
                    ARGUMENT_LIST,
                    vec![
                        Token::canonical(LEFT_PAREN).into(),
                        name("x").into(),
                        Token::canonical(RIGHT_PAREN).into(),
                    ],
                    NodeFlags::empty(),
                    TextSize::new(0),
                )
                .into(),
            ],
            NodeFlags::empty(),
            TextSize::new(0),
        );
        Node::new(
            EXPRESSION_STATEMENT,
            vec![call.into(), Token::canonical(SEMICOLON).into()],
            NodeFlags::empty(),
            TextSize::new(0),
        )
    }

    struct TokenTexts(Vec<String>);

    impl Visitor for TokenTexts {
        type Output = ();

        fn token(&mut self, token: &Token) {
            self.0.push(token.text().to_owned());
        }
    }

    #[test]
    fn default_visit_reaches_every_token_in_order() {
        let mut visitor = TokenTexts(Vec::new());
        visitor.node(&sample());
        assert_eq!(visitor.0, ["f", "(", "x", ")", ";"]);
    }

    #[test]
    fn handler_table_falls_back_to_children() {
        fn count_names(
            table: &HandlerTable<Vec<SyntaxKind>, usize>,
            cx: &mut Vec<SyntaxKind>,
            node: &Node,
        ) -> usize {
            cx.push(node.kind());
            table.visit_children(cx, node);
            1
        }

        let table: HandlerTable<Vec<SyntaxKind>, usize> =
            HandlerTable::new().on(NAME_REF, count_names).on(ARGUMENT_LIST, count_names);
        let mut seen = Vec::new();
        let result = table.visit_node(&mut seen, &sample());

        assert_eq!(result, 0);
        assert_eq!(seen, [NAME_REF, ARGUMENT_LIST, NAME_REF]);
    }

    #[test]
    fn walker_can_skip_and_stop() {
        struct Kinds(Vec<SyntaxKind>);

        impl Walker for Kinds {
            fn enter(&mut self, node: &Node) -> WalkControl {
                self.0.push(node.kind());
                if node.kind() == ARGUMENT_LIST {
                    WalkControl::SkipChildren
                } else {
                    WalkControl::Continue
                }
            }

            fn token(&mut self, token: &Token) -> WalkControl {
                self.0.push(token.kind());
                if token.kind() == SEMICOLON { WalkControl::Stop } else { WalkControl::Continue }
            }
        }

        let mut walker = Kinds(Vec::new());
        walk(&mut walker, &sample());
        assert_eq!(
            walker.0,
            [EXPRESSION_STATEMENT, CALL_EXPR, NAME_REF, NAME, ARGUMENT_LIST, SEMICOLON]
        );
    }
}
