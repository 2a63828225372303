//! Positional facts derived from a finished tree.
//!
//! Nodes and tokens store no offsets or parents, so one object can be shared
//! by several trees. The facts for a particular tree live here instead, keyed
//! by object identity, and die with the map.

use tern_span::{HashTable, IdentityCounter, IdentityHasher};
use text_size::{TextRange, TextSize};

use crate::walk::WalkEventWithTokens;
use crate::{Node, NodeOrToken, SyntaxElement, Token};

#[derive(Clone, Debug)]
pub struct ElementInfo {
    pub full_start: TextSize,
    pub parent: Option<Node>,
    pub previous_token: Option<Token>,
    pub next_token: Option<Token>,
}

pub struct SyntaxInfo<'c> {
    root: Node,
    elements: HashTable<SyntaxElement, ElementInfo, IdentityHasher<'c>>,
    relations: bool,
}

impl<'c> SyntaxInfo<'c> {
    /// Records positions, parents and token neighbours in one preorder pass.
    pub fn new(root: &Node, identities: &'c IdentityCounter) -> Self {
        Self::build(root, identities, true)
    }

    /// Records positions only.
    pub fn positions(root: &Node, identities: &'c IdentityCounter) -> Self {
        Self::build(root, identities, false)
    }

    fn build(root: &Node, identities: &'c IdentityCounter, relations: bool) -> Self {
        let mut elements = HashTable::with_hasher(256, IdentityHasher::new(identities));
        let mut parents: Vec<&Node> = Vec::new();
        let mut previous: Option<&Token> = None;
        let mut offset = TextSize::new(0);

        for event in root.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    let info = ElementInfo {
                        full_start: offset,
                        parent: relations.then(|| parents.last().map(|&p| p.clone())).flatten(),
                        previous_token: None,
                        next_token: None,
                    };
                    elements.insert(NodeOrToken::Node(node.clone()), info);
                    if relations {
                        parents.push(node);
                    }
                }
                WalkEventWithTokens::LeaveNode(_) => {
                    if relations {
                        parents.pop();
                    }
                }
                WalkEventWithTokens::Token(token) => {
                    let info = ElementInfo {
                        full_start: offset,
                        parent: relations.then(|| parents.last().map(|&p| p.clone())).flatten(),
                        previous_token: if relations { previous.cloned() } else { None },
                        next_token: None,
                    };
                    if relations {
                        if let Some(previous) = previous {
                            let key = NodeOrToken::Token(previous.clone());
                            if let Some(info) = elements.get_mut(&key) {
                                info.next_token = Some(token.clone());
                            }
                        }
                        previous = Some(token);
                    }
                    elements.insert(NodeOrToken::Token(token.clone()), info);
                    offset += token.full_width();
                }
            }
        }

        Self { root: root.clone(), elements, relations }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of elements recorded.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn info(&self, element: &SyntaxElement) -> Option<&ElementInfo> {
        self.elements.get(element)
    }

    pub fn full_start(&self, element: &SyntaxElement) -> Option<TextSize> {
        self.info(element).map(|info| info.full_start)
    }

    /// Start of the element's own text, after its leading trivia.
    pub fn start(&self, element: &SyntaxElement) -> Option<TextSize> {
        self.full_start(element).map(|start| start + element.leading_trivia_width())
    }

    pub fn end(&self, element: &SyntaxElement) -> Option<TextSize> {
        self.start(element).map(|start| start + element.width())
    }

    pub fn range(&self, element: &SyntaxElement) -> Option<TextRange> {
        let start = self.start(element)?;
        Some(TextRange::at(start, element.width()))
    }

    pub fn full_range(&self, element: &SyntaxElement) -> Option<TextRange> {
        let start = self.full_start(element)?;
        Some(TextRange::at(start, element.full_width()))
    }

    pub fn parent(&self, element: &SyntaxElement) -> Option<&Node> {
        self.info(element)?.parent.as_ref()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, element: &SyntaxElement) -> impl Iterator<Item = &Node> + '_ {
        let first = self.parent(element);
        std::iter::successors(first, |node| self.parent(&NodeOrToken::Node((*node).clone())))
    }

    pub fn previous_token(&self, token: &Token) -> Option<&Token> {
        self.token_info(token)?.previous_token.as_ref()
    }

    pub fn next_token(&self, token: &Token) -> Option<&Token> {
        self.token_info(token)?.next_token.as_ref()
    }

    /// The first token on the line `token` sits on.
    ///
    /// Follows previous-token links until a token has no predecessor, or a
    /// line break separates it from its predecessor.
    pub fn first_token_in_line<'a>(&'a self, token: &'a Token) -> &'a Token {
        let mut current = token;
        loop {
            if current.has_leading_newline() {
                return current;
            }
            match self.previous_token(current) {
                Some(previous) if !previous.has_trailing_newline() => current = previous,
                _ => return current,
            }
        }
    }

    /// The token whose full range contains `offset`; the last token when
    /// `offset` is the end of the text.
    pub fn token_at_offset(&self, offset: TextSize) -> Option<Token> {
        token_at_offset(&self.root, offset)
    }

    /// Whether parents and token neighbours were recorded.
    pub fn has_relations(&self) -> bool {
        self.relations
    }

    fn token_info(&self, token: &Token) -> Option<&ElementInfo> {
        self.elements.get(&NodeOrToken::Token(token.clone()))
    }
}

/// Descends from `root` by widths alone; no map needed.
pub fn token_at_offset(root: &Node, offset: TextSize) -> Option<Token> {
    if offset > root.full_width() {
        return None;
    }
    let mut node = root;
    let mut start = TextSize::new(0);
    'descend: loop {
        let last = node.children().len().checked_sub(1)?;
        for (index, child) in node.children().iter().enumerate() {
            let end = start + child.full_width();
            if offset < end || (index == last && offset == end) {
                match child {
                    NodeOrToken::Token(token) => return Some(token.clone()),
                    NodeOrToken::Node(child) => {
                        node = child;
                        continue 'descend;
                    }
                }
            }
            start = end;
        }
        return None;
    }
}

#[cfg(test)]
mod tests {
    use tern_span::{Identified, StringTable};

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{Builder, NodeFlags, Trivia, TriviaKind, TriviaList};

    /// `a;\n  b;` as two expression statements.
    fn sample(strings: &mut StringTable) -> Node {
        let newline =
            TriviaList::new(vec![Trivia::new(TriviaKind::Newline, strings.intern_str("\n"))]);
        let indent =
            TriviaList::new(vec![Trivia::new(TriviaKind::Whitespace, strings.intern_str("  "))]);

        let mut builder = Builder::new();
        builder.start_node(SOURCE_FILE, NodeFlags::empty());
        for (name, leading, trailing) in
            [("a", TriviaList::Empty, newline), ("b", indent, TriviaList::Empty)]
        {
            builder.start_node(EXPRESSION_STATEMENT, NodeFlags::empty());
            builder.start_node(NAME_REF, NodeFlags::empty());
            builder.token(Token::new(NAME, strings.intern_str(name), leading, TriviaList::Empty));
            builder.finish_node(TextSize::new(0));
            builder.token(Token::canonical(SEMICOLON).with_trailing_trivia(trailing));
            builder.finish_node(TextSize::new(0));
        }
        builder.token(Token::canonical(SEMICOLON));
        builder.finish_node(TextSize::new(0));
        builder.finish()
    }

    #[test]
    fn positions_and_relations() {
        let mut strings = StringTable::new();
        let identities = IdentityCounter::new();
        let root = sample(&mut strings);
        let info = SyntaxInfo::new(&root, &identities);

        let tokens: Vec<Token> = root.tokens().cloned().collect();
        let b = NodeOrToken::Token(tokens[2].clone());
        assert_eq!(info.full_start(&b), Some(TextSize::new(3)));
        assert_eq!(info.start(&b), Some(TextSize::new(5)));
        assert_eq!(info.end(&b), Some(TextSize::new(6)));

        let parent = info.parent(&b).unwrap();
        assert_eq!(parent.kind(), NAME_REF);
        let kinds: Vec<_> = info.ancestors(&b).map(Node::kind).collect();
        assert_eq!(kinds, [NAME_REF, EXPRESSION_STATEMENT, SOURCE_FILE]);

        assert!(info.previous_token(&tokens[2]).unwrap().same_object(&tokens[1]));
        assert!(info.next_token(&tokens[1]).unwrap().same_object(&tokens[2]));
        assert!(info.previous_token(&tokens[0]).is_none());
        assert!(info.next_token(&tokens[4]).is_none());
    }

    #[test]
    fn first_token_in_line_stops_at_line_breaks() {
        let mut strings = StringTable::new();
        let identities = IdentityCounter::new();
        let root = sample(&mut strings);
        let info = SyntaxInfo::new(&root, &identities);

        let tokens: Vec<Token> = root.tokens().cloned().collect();
        assert!(info.first_token_in_line(&tokens[1]).same_object(&tokens[0]));
        assert!(info.first_token_in_line(&tokens[3]).same_object(&tokens[2]));
    }

    #[test]
    fn token_lookup_by_offset() {
        let mut strings = StringTable::new();
        let identities = IdentityCounter::new();
        let root = sample(&mut strings);
        let info = SyntaxInfo::positions(&root, &identities);

        assert_eq!(info.token_at_offset(TextSize::new(0)).map(|t| t.kind()), Some(NAME));
        assert_eq!(info.token_at_offset(TextSize::new(4)).map(|t| t.kind()), Some(NAME));
        assert_eq!(info.token_at_offset(TextSize::new(6)).map(|t| t.kind()), Some(SEMICOLON));
        assert_eq!(info.token_at_offset(TextSize::new(8)).map(|t| t.kind()), Some(SEMICOLON));
        assert!(info.token_at_offset(TextSize::new(9)).is_none());
        assert_eq!(info.len(), root.element_count());
    }
}
