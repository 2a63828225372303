use std::borrow::Cow;

use text_size::{TextRange, TextSize};

/// Read-only source text.
///
/// Offsets are UTF-8 byte offsets. Implementations must stay unchanged for
/// the duration of one parse.
pub trait SourceText {
    fn len(&self) -> TextSize;

    /// The byte at `offset`. Out-of-range offsets are a caller bug.
    fn byte_at(&self, offset: TextSize) -> u8;

    /// Copies bytes starting at `start` into `dest` and returns how many were
    /// copied, which is less than `dest.len()` only at the end of the text.
    fn copy_to(&self, start: TextSize, dest: &mut [u8]) -> usize;

    fn slice(&self, range: TextRange) -> Cow<'_, str>;

    fn is_empty(&self) -> bool {
        self.len() == TextSize::new(0)
    }
}

impl SourceText for str {
    #[inline]
    fn len(&self) -> TextSize {
        TextSize::of(self)
    }

    #[inline]
    fn byte_at(&self, offset: TextSize) -> u8 {
        self.as_bytes()[usize::from(offset)]
    }

    fn copy_to(&self, start: TextSize, dest: &mut [u8]) -> usize {
        let bytes = self.as_bytes().get(usize::from(start)..).unwrap_or_default();
        let count = bytes.len().min(dest.len());
        dest[..count].copy_from_slice(&bytes[..count]);
        count
    }

    fn slice(&self, range: TextRange) -> Cow<'_, str> {
        Cow::Borrowed(&self[range])
    }
}

impl SourceText for String {
    #[inline]
    fn len(&self) -> TextSize {
        SourceText::len(self.as_str())
    }

    #[inline]
    fn byte_at(&self, offset: TextSize) -> u8 {
        self.as_str().byte_at(offset)
    }

    fn copy_to(&self, start: TextSize, dest: &mut [u8]) -> usize {
        self.as_str().copy_to(start, dest)
    }

    fn slice(&self, range: TextRange) -> Cow<'_, str> {
        self.as_str().slice(range)
    }
}

impl<T: SourceText + ?Sized> SourceText for &T {
    #[inline]
    fn len(&self) -> TextSize {
        T::len(self)
    }

    #[inline]
    fn byte_at(&self, offset: TextSize) -> u8 {
        T::byte_at(self, offset)
    }

    fn copy_to(&self, start: TextSize, dest: &mut [u8]) -> usize {
        T::copy_to(self, start, dest)
    }

    fn slice(&self, range: TextRange) -> Cow<'_, str> {
        T::slice(self, range)
    }
}
