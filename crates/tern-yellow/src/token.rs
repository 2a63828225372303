//! Terminal units of the tree.

use std::fmt;

use bitflags::bitflags;
use tern_span::{Identified, IdentityStamp, StringTable, Symbol};
use text_size::TextSize;
use triomphe::Arc;

use crate::{SyntaxKind, TriviaList};

bitflags! {
    /// Facts the scanner recorded while producing a token.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct TokenFlags: u8 {
        /// Produced by a parser-driven rescan; its kind depends on the parser's
        /// state, not just on the text.
        const RESCANNED = 1 << 0;
        /// The scanner reported a diagnostic for this token.
        const HAS_ERROR = 1 << 1;
    }
}

/// Where a token's text lives.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenText {
    /// The kind's fixed text; no allocation.
    Fixed,
    /// Zero-width placeholder inserted by error recovery.
    Missing,
    Realized(Symbol),
}

/// Parsed payload of literal tokens.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TokenValue {
    #[default]
    None,
    Number(f64),
    /// Cooked contents of a string literal.
    String(Symbol),
}

/// Everything needed to construct a [`Token`].
#[derive(Clone, Debug)]
pub struct TokenParts {
    pub kind: SyntaxKind,
    pub text: TokenText,
    pub leading: TriviaList,
    pub trailing: TriviaList,
    pub value: TokenValue,
    pub flags: TokenFlags,
    /// Bytes past the token's full end the scanner examined.
    pub lookahead: u32,
}

impl TokenParts {
    pub fn new(kind: SyntaxKind, text: TokenText) -> Self {
        Self {
            kind,
            text,
            leading: TriviaList::Empty,
            trailing: TriviaList::Empty,
            value: TokenValue::None,
            flags: TokenFlags::empty(),
            lookahead: 0,
        }
    }
}

struct TokenData {
    parts: TokenParts,
    stamp: IdentityStamp,
}

/// An immutable token with its attached trivia.
///
/// Cloning shares the token. Two tokens are the same object only if they
/// came from the same constructor call; see [`Identified`].
#[derive(Clone)]
pub struct Token(Arc<TokenData>);

impl Token {
    pub fn from_parts(parts: TokenParts) -> Self {
        debug_assert!(parts.kind.is_token(), "{:?} is not a token kind", parts.kind);
        debug_assert!(
            !matches!(parts.text, TokenText::Fixed) || parts.kind.fixed_text().is_some(),
            "{:?} has no fixed text",
            parts.kind
        );
        Token(Arc::new(TokenData { parts, stamp: IdentityStamp::new() }))
    }

    /// A trivia-less token whose text is the kind's fixed text.
    #[track_caller]
    pub fn canonical(kind: SyntaxKind) -> Self {
        assert!(kind.fixed_text().is_some(), "{kind:?} has no canonical form");
        Self::from_parts(TokenParts::new(kind, TokenText::Fixed))
    }

    /// A zero-width token standing in for one the parser expected.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self::from_parts(TokenParts::new(kind, TokenText::Missing))
    }

    pub fn new(kind: SyntaxKind, text: Symbol, leading: TriviaList, trailing: TriviaList) -> Self {
        Self::from_parts(TokenParts {
            leading,
            trailing,
            ..TokenParts::new(kind, TokenText::Realized(text))
        })
    }

    #[inline]
    fn parts(&self) -> &TokenParts {
        &self.0.parts
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.parts().kind
    }

    /// The token's own text, without trivia.
    pub fn text(&self) -> &str {
        match &self.parts().text {
            TokenText::Fixed => self.kind().fixed_text().unwrap_or_default(),
            TokenText::Missing => "",
            TokenText::Realized(text) => text,
        }
    }

    pub fn token_text(&self) -> &TokenText {
        &self.parts().text
    }

    pub fn leading(&self) -> &TriviaList {
        &self.parts().leading
    }

    pub fn trailing(&self) -> &TriviaList {
        &self.parts().trailing
    }

    pub fn value(&self) -> &TokenValue {
        &self.parts().value
    }

    pub fn flags(&self) -> TokenFlags {
        self.parts().flags
    }

    pub fn lookahead(&self) -> TextSize {
        TextSize::new(self.parts().lookahead)
    }

    /// The keyword kind for keyword tokens, including ones used as names.
    pub fn keyword_kind(&self) -> Option<SyntaxKind> {
        self.kind().is_keyword().then(|| self.kind())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.parts().text, TokenText::Missing)
    }

    /// `true` for a fixed-text token without trivia.
    pub fn is_canonical(&self) -> bool {
        matches!(self.parts().text, TokenText::Fixed)
            && self.leading().is_empty()
            && self.trailing().is_empty()
    }

    #[inline]
    pub fn width(&self) -> TextSize {
        TextSize::of(self.text())
    }

    pub fn full_width(&self) -> TextSize {
        self.leading().width() + self.width() + self.trailing().width()
    }

    pub fn has_leading_comment(&self) -> bool {
        self.leading().has_comment()
    }

    pub fn has_leading_newline(&self) -> bool {
        self.leading().has_newline()
    }

    pub fn has_trailing_newline(&self) -> bool {
        self.trailing().has_newline()
    }

    pub fn has_skipped_text(&self) -> bool {
        self.leading().has_skipped_text()
    }

    /// Replaces fixed text with an interned copy, leaving everything else as
    /// it is.
    pub fn realize(&self, strings: &mut StringTable) -> Token {
        let mut parts = self.parts().clone();
        if parts.text == TokenText::Fixed {
            parts.text = TokenText::Realized(strings.intern_str(self.text()));
        }
        Token::from_parts(parts)
    }

    pub fn with_leading_trivia(&self, leading: TriviaList) -> Token {
        Token::from_parts(TokenParts { leading, ..self.parts().clone() })
    }

    pub fn with_trailing_trivia(&self, trailing: TriviaList) -> Token {
        Token::from_parts(TokenParts { trailing, ..self.parts().clone() })
    }

    pub fn write_full_text(&self, buf: &mut String) {
        self.leading().write_text(buf);
        buf.push_str(self.text());
        self.trailing().write_text(buf);
    }

    pub fn full_text(&self) -> String {
        let mut buf = String::with_capacity(self.full_width().into());
        self.write_full_text(&mut buf);
        buf
    }

    /// Kind, text and trivia shape agree; identity is ignored.
    pub fn structurally_equal(&self, other: &Token) -> bool {
        self.kind() == other.kind()
            && self.is_missing() == other.is_missing()
            && self.text() == other.text()
            && self.leading() == other.leading()
            && self.trailing() == other.trailing()
    }
}

impl Identified for Token {
    #[inline]
    fn identity_stamp(&self) -> &IdentityStamp {
        &self.0.stamp
    }

    #[inline]
    fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.kind(), self.text())?;
        if self.is_missing() {
            f.write_str(" (missing)")?;
        }
        Ok(())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}
