//! Debug-time validation of tree identity.

use tern_span::{HashTable, IdentityCounter, IdentityHasher};

use crate::walk::WalkEventWithTokens;
use crate::{Node, NodeOrToken, SyntaxElement, SyntaxTree};

/// Asserts that no node or token object occurs at two positions in `tree`.
///
/// # Panics
///
/// Panics on the first element seen twice.
#[track_caller]
pub fn check(tree: &SyntaxTree, identities: &IdentityCounter) {
    check_node(tree.root(), identities);
}

#[track_caller]
pub fn check_node(root: &Node, identities: &IdentityCounter) {
    let mut seen: HashTable<SyntaxElement, (), IdentityHasher<'_>> =
        HashTable::with_hasher(256, IdentityHasher::new(identities));
    for event in root.preorder_with_tokens() {
        let element = match event {
            WalkEventWithTokens::EnterNode(node) => NodeOrToken::Node(node.clone()),
            WalkEventWithTokens::Token(token) => NodeOrToken::Token(token.clone()),
            WalkEventWithTokens::LeaveNode(_) => continue,
        };
        seen.add(element, ());
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{NodeFlags, Token};

    #[test]
    fn distinct_tokens_pass() {
        let identities = IdentityCounter::new();
        let root = Node::new(
            EMPTY_STATEMENT,
            vec![Token::canonical(SEMICOLON).into(), Token::canonical(SEMICOLON).into()],
            NodeFlags::empty(),
            TextSize::new(0),
        );
        check_node(&root, &identities);
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn shared_token_is_reported() {
        let identities = IdentityCounter::new();
        let semicolon = Token::canonical(SEMICOLON);
        let root = Node::new(
            EMPTY_STATEMENT,
            vec![semicolon.clone().into(), semicolon.into()],
            NodeFlags::empty(),
            TextSize::new(0),
        );
        check_node(&root, &identities);
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn shared_subtree_is_reported() {
        let identities = IdentityCounter::new();
        let inner = Node::new(
            EMPTY_STATEMENT,
            vec![Token::canonical(SEMICOLON).into()],
            NodeFlags::empty(),
            TextSize::new(0),
        );
        let root = Node::new(
            BLOCK,
            vec![inner.clone().into(), inner.into()],
            NodeFlags::empty(),
            TextSize::new(0),
        );
        check_node(&root, &identities);
    }
}
