//! Buffered cursor over a [`SourceText`].

use tern_inputs::SourceText;
use tern_span::{StringTable, Symbol};
use text_size::TextSize;

/// Returned when peeking past the end of the text. Callers that care about
/// a literal NUL check [`SlidingTextWindow::is_at_end`].
pub const EOF_BYTE: u8 = 0;

const DEFAULT_CAPACITY: usize = 2048;

/// A growable, shiftable window over the source.
///
/// Holds a buffer whose first byte sits at absolute offset `basis`, a cursor
/// relative to that basis and the start of the current lexeme. When the
/// cursor runs off the filled part the buffer is either shifted left, to
/// drop the consumed prefix, or grown.
pub struct SlidingTextWindow<'s, S: SourceText + ?Sized> {
    source: &'s S,
    text_len: TextSize,
    buffer: Vec<u8>,
    basis: TextSize,
    filled: usize,
    offset: usize,
    lexeme_start: usize,
    /// One past the furthest absolute offset examined since the last
    /// [`Self::reset_reach`]. May point past the end of the text.
    reach: TextSize,
}

impl<'s, S: SourceText + ?Sized> SlidingTextWindow<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self::with_capacity(source, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(source: &'s S, capacity: usize) -> Self {
        let mut window = Self {
            source,
            text_len: source.len(),
            buffer: vec![0; capacity.max(16)],
            basis: TextSize::new(0),
            filled: 0,
            offset: 0,
            lexeme_start: 0,
            reach: TextSize::new(0),
        };
        window.fill();
        window
    }

    pub fn source(&self) -> &'s S {
        self.source
    }

    pub fn text_len(&self) -> TextSize {
        self.text_len
    }

    /// Absolute offset of the cursor.
    #[inline]
    pub fn position(&self) -> TextSize {
        self.basis + rel(self.offset)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position() >= self.text_len
    }

    /// The byte `n` positions after the cursor, or [`EOF_BYTE`].
    #[inline]
    pub fn peek_at(&mut self, n: usize) -> u8 {
        let end = self.position() + rel(n + 1);
        if end > self.reach {
            self.reach = end;
        }
        if self.ensure_ahead(n) { self.buffer[self.offset + n] } else { EOF_BYTE }
    }

    #[inline]
    pub fn peek(&mut self) -> u8 {
        self.peek_at(0)
    }

    /// Moves the cursor forward. Advancing past the end of the text is a
    /// no-op beyond it.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        let available = usize::from(self.text_len - self.position().min(self.text_len));
        let n = n.min(available);
        if n > 0 && self.ensure_ahead(n - 1) {
            self.offset += n;
        }
    }

    /// Returns the current byte and moves past it.
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        let byte = self.peek();
        self.advance(1);
        byte
    }

    /// Marks the cursor as the start of the next lexeme.
    #[inline]
    pub fn start(&mut self) {
        self.lexeme_start = self.offset;
    }

    pub fn lexeme_start(&self) -> TextSize {
        self.basis + rel(self.lexeme_start)
    }

    pub fn lexeme_len(&self) -> usize {
        self.offset - self.lexeme_start
    }

    pub fn lexeme_bytes(&self) -> &[u8] {
        &self.buffer[self.lexeme_start..self.offset]
    }

    /// Interns the current lexeme.
    pub fn intern_lexeme(&self, strings: &mut StringTable) -> Symbol {
        strings.intern(&self.buffer, self.lexeme_start, self.lexeme_len())
    }

    /// Moves the cursor to `position`. Positions still inside the buffer cost
    /// nothing; anything else refills the buffer from there.
    pub fn reset(&mut self, position: TextSize) {
        let position = position.min(self.text_len);
        if position >= self.basis && position <= self.basis + rel(self.filled) {
            self.offset = usize::from(position - self.basis);
        } else {
            self.basis = position;
            self.filled = 0;
            self.offset = 0;
            self.fill();
        }
        self.lexeme_start = self.offset;
    }

    pub fn reach(&self) -> TextSize {
        self.reach
    }

    /// Restarts lookahead tracking at the cursor.
    pub fn reset_reach(&mut self) {
        self.reach = self.position();
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Makes the byte `n` positions after the cursor valid if the text
    /// extends that far.
    #[inline]
    fn ensure_ahead(&mut self, n: usize) -> bool {
        while self.offset + n >= self.filled {
            if self.basis + rel(self.filled) >= self.text_len {
                return false;
            }
            if self.filled == self.buffer.len() {
                self.make_room();
            }
            self.fill();
        }
        true
    }

    /// Shifts out the prefix before the lexeme when what is left is a small
    /// part of the buffer, grows the buffer otherwise.
    fn make_room(&mut self) {
        let keep = self.filled - self.lexeme_start;
        if self.lexeme_start > 0 && keep <= self.buffer.len() / 4 {
            self.buffer.copy_within(self.lexeme_start..self.filled, 0);
            self.basis += rel(self.lexeme_start);
            self.offset -= self.lexeme_start;
            self.filled = keep;
            self.lexeme_start = 0;
        } else {
            let capacity = self.buffer.len() * 2;
            tracing::trace!(capacity, "growing text window");
            self.buffer.resize(capacity, 0);
        }
    }

    fn fill(&mut self) {
        let start = self.basis + rel(self.filled);
        self.filled += self.source.copy_to(start, &mut self.buffer[self.filled..]);
    }
}

#[inline]
fn rel(offset: usize) -> TextSize {
    TextSize::new(offset as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peeks_and_advances() {
        let text = "let x";
        let mut window = SlidingTextWindow::new(text);
        assert_eq!(window.peek(), b'l');
        assert_eq!(window.peek_at(4), b'x');
        assert_eq!(window.peek_at(5), EOF_BYTE);
        assert_eq!(window.reach(), TextSize::new(6));

        window.advance(3);
        assert_eq!(window.position(), TextSize::new(3));
        window.advance(10);
        assert!(window.is_at_end());
        assert_eq!(window.position(), TextSize::new(5));
    }

    #[test]
    fn lexemes_survive_shifting() {
        let text = "a".repeat(40) + " bcd";
        let mut window = SlidingTextWindow::with_capacity(text.as_str(), 16);
        let mut strings = StringTable::new();

        for _ in 0..41 {
            window.start();
            window.advance(1);
        }
        window.start();
        while window.peek() != EOF_BYTE {
            window.advance(1);
        }
        assert_eq!(window.lexeme_start(), TextSize::new(41));
        assert_eq!(window.intern_lexeme(&mut strings).as_str(), "bcd");
        assert_eq!(window.capacity(), 16);
    }

    #[test]
    fn long_lexemes_grow_the_buffer() {
        let text = "x".repeat(100);
        let mut window = SlidingTextWindow::with_capacity(text.as_str(), 16);
        let mut strings = StringTable::new();

        window.start();
        while window.peek() != EOF_BYTE {
            window.advance(1);
        }
        assert!(window.capacity() >= 100);
        assert_eq!(window.intern_lexeme(&mut strings).len(), 100);
    }

    #[test]
    fn reset_inside_and_outside_buffer() {
        let text: String = (0..200u8).map(|i| char::from(b'a' + i % 26)).collect();
        let mut window = SlidingTextWindow::with_capacity(text.as_str(), 16);

        window.advance(5);
        window.reset(TextSize::new(2));
        assert_eq!(window.peek(), b'c');

        window.reset(TextSize::new(150));
        assert_eq!(window.position(), TextSize::new(150));
        assert_eq!(window.peek(), text.as_bytes()[150]);

        window.reset(TextSize::new(1));
        assert_eq!(window.peek(), b'b');

        window.reset(TextSize::new(500));
        assert!(window.is_at_end());
    }
}
