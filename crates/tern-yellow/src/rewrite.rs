//! Tree rewriting with structural sharing.

use tern_span::Identified;

use crate::{Node, NodeOrToken, SyntaxElement, Token};

/// A traversal that may substitute nodes and tokens.
///
/// Unchanged subtrees are shared with the input. Once [`Rewriter::is_done`]
/// reports `true` the rest of the tree is copied by reference without being
/// visited.
pub trait Rewriter {
    fn is_done(&self) -> bool {
        false
    }

    /// Replacement for a whole subtree, checked before its children.
    fn rewrite_node(&mut self, _node: &Node) -> Option<Node> {
        None
    }

    fn rewrite_token(&mut self, _token: &Token) -> Option<Token> {
        None
    }
}

/// Applies `rewriter` to `root`, returning `root` itself when nothing changed.
pub fn rewrite<R: Rewriter + ?Sized>(rewriter: &mut R, root: &Node) -> Node {
    rewrite_node(rewriter, root).unwrap_or_else(|| root.clone())
}

fn rewrite_node<R: Rewriter + ?Sized>(rewriter: &mut R, node: &Node) -> Option<Node> {
    if let Some(replacement) = rewriter.rewrite_node(node) {
        return Some(replacement);
    }

    let mut rewritten: Option<Vec<SyntaxElement>> = None;
    for (index, child) in node.children().iter().enumerate() {
        if rewriter.is_done() {
            break;
        }
        let replacement = match child {
            NodeOrToken::Node(child) => rewrite_node(rewriter, child).map(NodeOrToken::Node),
            NodeOrToken::Token(child) => rewriter.rewrite_token(child).map(NodeOrToken::Token),
        };
        match (replacement, &mut rewritten) {
            (Some(replacement), Some(children)) => children[index] = replacement,
            (Some(replacement), None) => {
                let mut children = node.children().to_vec();
                children[index] = replacement;
                rewritten = Some(children);
            }
            (None, _) => {}
        }
    }

    rewritten.map(|children| node.with_children(children))
}

/// Replaces one token object wherever it occurs, stopping once it is found.
pub struct TokenReplacer {
    target: Token,
    replacement: Option<Token>,
}

impl TokenReplacer {
    pub fn new(target: Token, replacement: Token) -> Self {
        Self { target, replacement: Some(replacement) }
    }

    pub fn replaced(&self) -> bool {
        self.replacement.is_none()
    }
}

impl Rewriter for TokenReplacer {
    fn is_done(&self) -> bool {
        self.replaced()
    }

    fn rewrite_token(&mut self, token: &Token) -> Option<Token> {
        if token.same_object(&self.target) { self.replacement.take() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use tern_span::{IdentityCounter, StringTable};
    use text_size::TextSize;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{NodeFlags, invariants};

    fn statement(strings: &mut StringTable, names: &[&str]) -> Node {
        let mut children: Vec<SyntaxElement> = Vec::new();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                children.push(Token::canonical(COMMA).into());
            }
            let token =
                Token::new(NAME, strings.intern_str(name), Default::default(), Default::default());
            let name_ref =
                Node::new(NAME_REF, vec![token.into()], NodeFlags::empty(), 0.into());
            children.push(name_ref.into());
        }
        Node::new(EXPRESSION_STATEMENT, children, NodeFlags::empty(), TextSize::new(0))
    }

    #[test]
    fn replaces_one_token_and_shares_the_rest() {
        let mut strings = StringTable::new();
        let root = statement(&mut strings, &["a", "b", "c"]);
        let target = root.tokens().find(|token| token.text() == "b").unwrap().clone();
        let replacement =
            Token::new(NAME, strings.intern_str("bee"), Default::default(), Default::default());

        let mut replacer = TokenReplacer::new(target, replacement);
        let rewritten = rewrite(&mut replacer, &root);

        assert!(replacer.replaced());
        assert_eq!(rewritten.full_text(), "a,bee,c");
        let old = root.children();
        let new = rewritten.children();
        assert!(old[0].same_object(&new[0]));
        assert!(!old[2].same_object(&new[2]));
        assert!(old[4].same_object(&new[4]));
        invariants::check_node(&rewritten, &IdentityCounter::new());
    }

    #[test]
    fn nothing_to_replace_returns_the_input() {
        let mut strings = StringTable::new();
        let root = statement(&mut strings, &["a"]);
        let mut replacer = TokenReplacer::new(Token::canonical(SEMICOLON), Token::canonical(COMMA));

        let rewritten = rewrite(&mut replacer, &root);
        assert!(!replacer.replaced());
        assert!(rewritten.same_object(&root));
    }

    #[test]
    fn stops_visiting_once_done() {
        struct Counting {
            seen: usize,
            inner: TokenReplacer,
        }

        impl Rewriter for Counting {
            fn is_done(&self) -> bool {
                self.inner.is_done()
            }

            fn rewrite_token(&mut self, token: &Token) -> Option<Token> {
                self.seen += 1;
                self.inner.rewrite_token(token)
            }
        }

        let mut strings = StringTable::new();
        let root = statement(&mut strings, &["a", "b", "c"]);
        let target = root.tokens().next().unwrap().clone();
        let mut rewriter =
            Counting { seen: 0, inner: TokenReplacer::new(target, Token::canonical(THIS_KW)) };

        let rewritten = rewrite(&mut rewriter, &root);
        assert_eq!(rewriter.seen, 1);
        assert_eq!(rewritten.full_text(), "this,b,c");
    }
}
