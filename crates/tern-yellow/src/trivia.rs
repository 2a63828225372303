//! Trivia attached to tokens.

use std::fmt;

use tern_span::Symbol;
use text_size::TextSize;
use triomphe::ThinArc;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaKind {
    Whitespace,
    Newline,
    SingleLineComment,
    MultiLineComment,
    /// Source text the parser could not use, kept so the tree stays lossless.
    SkippedText,
}

impl TriviaKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TriviaKind::SingleLineComment | TriviaKind::MultiLineComment)
    }
}

/// A trivia fragment with its kind and interned text.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: Symbol,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: Symbol) -> Self {
        Self { kind, text }
    }

    #[inline]
    pub fn width(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    /// `true` for newlines and for block comments spanning a line break.
    pub fn has_newline(&self) -> bool {
        match self.kind {
            TriviaKind::Newline => true,
            TriviaKind::MultiLineComment => self.text.contains(['\n', '\r']),
            _ => false,
        }
    }
}

impl fmt::Debug for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text.as_str())
    }
}

/// Ordered trivia before or after a token.
///
/// Most tokens carry no trivia or a single piece, so those two shapes are
/// stored inline. Longer runs share one allocation with their total width in
/// the header.
#[derive(Clone, Default, Eq, PartialEq)]
pub enum TriviaList {
    #[default]
    Empty,
    Single(Trivia),
    Many(ThinArc<TextSize, Trivia>),
}

impl TriviaList {
    pub fn new(mut pieces: Vec<Trivia>) -> Self {
        match pieces.len() {
            0 => TriviaList::Empty,
            1 => TriviaList::Single(pieces.swap_remove(0)),
            _ => {
                let width = pieces.iter().map(Trivia::width).sum();
                TriviaList::Many(ThinArc::from_header_and_iter(width, pieces.into_iter()))
            }
        }
    }

    pub fn as_slice(&self) -> &[Trivia] {
        match self {
            TriviaList::Empty => &[],
            TriviaList::Single(piece) => std::slice::from_ref(piece),
            TriviaList::Many(ptr) => &ptr.slice,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TriviaList::Empty)
    }

    #[track_caller]
    pub fn get(&self, index: usize) -> &Trivia {
        match self.as_slice().get(index) {
            Some(piece) => piece,
            None => panic!("trivia index {index} out of range for a list of {}", self.len()),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trivia> {
        self.as_slice().iter()
    }

    pub fn width(&self) -> TextSize {
        match self {
            TriviaList::Empty => TextSize::new(0),
            TriviaList::Single(piece) => piece.width(),
            TriviaList::Many(ptr) => ptr.header.header,
        }
    }

    pub fn has_newline(&self) -> bool {
        self.iter().any(Trivia::has_newline)
    }

    pub fn has_comment(&self) -> bool {
        self.iter().any(|piece| piece.kind.is_comment())
    }

    pub fn has_skipped_text(&self) -> bool {
        self.iter().any(|piece| piece.kind == TriviaKind::SkippedText)
    }

    /// Returns a list with `pieces` placed in front of `self`.
    pub fn prepend(&self, pieces: &[Trivia]) -> Self {
        if pieces.is_empty() {
            return self.clone();
        }
        Self::new(pieces.iter().chain(self.iter()).cloned().collect())
    }

    pub fn write_text(&self, buf: &mut String) {
        for piece in self.iter() {
            buf.push_str(&piece.text);
        }
    }
}

impl fmt::Debug for TriviaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a TriviaList {
    type Item = &'a Trivia;
    type IntoIter = std::slice::Iter<'a, Trivia>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
