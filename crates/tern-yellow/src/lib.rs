//! Lossless, immutable syntax tree with attached trivia.
//!
//! Nodes and tokens are reference-counted and carry no parent pointers or
//! offsets, so subtrees can be shared between a tree and the tree reparsed
//! from it. Positions and parents are derived on demand by [`SyntaxInfo`].

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod info;
pub mod invariants;
mod node;
mod rewrite;
mod syntax_kind;
mod syntax_set;
mod token;
mod tree;
mod trivia;
mod visit;
mod walk;

/// Bottom-up builder for trees.
pub use builder::Builder;
/// Derived positions, parents and token neighbours.
pub use info::{ElementInfo, SyntaxInfo, token_at_offset};
/// Tree elements.
pub use node::{Node, NodeFlags, NodeOrToken, SyntaxElement};
/// Substituting traversal.
pub use rewrite::{Rewriter, TokenReplacer, rewrite};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use token::{Token, TokenFlags, TokenParts, TokenText, TokenValue};
pub use tree::SyntaxTree;
/// Trivia pieces attached to tokens.
pub use trivia::{Trivia, TriviaKind, TriviaList};
pub use visit::{
    HandlerTable, NodeHandler, TokenHandler, Visitor, WalkControl, Walker, visit_children, walk,
};
pub use walk::{Preorder, PreorderWithTokens, WalkEvent, WalkEventWithTokens};
