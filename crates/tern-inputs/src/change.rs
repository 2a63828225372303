//! Text edits and the window of text they disturb.

use text_size::{TextRange, TextSize};

/// One edit: `span` of the old text was replaced by `new_len` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextChangeRange {
    pub span: TextRange,
    pub new_len: TextSize,
}

impl TextChangeRange {
    pub fn new(span: TextRange, new_len: TextSize) -> Self {
        Self { span, new_len }
    }

    pub fn insert(offset: TextSize, len: TextSize) -> Self {
        Self::new(TextRange::empty(offset), len)
    }

    pub fn delete(span: TextRange) -> Self {
        Self::new(span, TextSize::new(0))
    }

    /// Signed change in text length.
    pub fn delta(&self) -> i64 {
        i64::from(u32::from(self.new_len)) - i64::from(u32::from(self.span.len()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edit {index} starts before the edit preceding it")]
    Unordered { index: usize },
    #[error("edit {index} overlaps the edit preceding it")]
    Overlapping { index: usize },
    #[error("edit {index} ends at {end:?}, past the end of the old text ({old_len:?})")]
    OutOfBounds { index: usize, end: TextSize, old_len: TextSize },
    #[error("edits turn {old_len:?} bytes into {expected:?}, but the new text has {actual:?}")]
    LengthMismatch { old_len: TextSize, expected: i64, actual: TextSize },
}

/// An ordered list of disjoint edits, validated against both texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChanges {
    changes: Vec<TextChangeRange>,
}

impl TextChanges {
    pub fn new(
        changes: Vec<TextChangeRange>,
        old_len: TextSize,
        new_len: TextSize,
    ) -> Result<Self, EditError> {
        for (index, change) in changes.iter().enumerate() {
            if change.span.end() > old_len {
                return Err(EditError::OutOfBounds { index, end: change.span.end(), old_len });
            }
            if let Some(previous) = index.checked_sub(1).map(|it| changes[it]) {
                if change.span.start() < previous.span.start() {
                    return Err(EditError::Unordered { index });
                }
                if change.span.start() < previous.span.end() {
                    return Err(EditError::Overlapping { index });
                }
            }
        }

        let expected =
            i64::from(u32::from(old_len)) + changes.iter().map(TextChangeRange::delta).sum::<i64>();
        if expected != i64::from(u32::from(new_len)) {
            return Err(EditError::LengthMismatch { old_len, expected, actual: new_len });
        }

        Ok(Self { changes })
    }

    pub fn as_slice(&self) -> &[TextChangeRange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Collapses every edit into one window spanning the first to the last.
    pub fn window(&self) -> Option<ChangeWindow> {
        let first = self.changes.first()?;
        let last = self.changes.last()?;
        let delta: i64 = self.changes.iter().map(TextChangeRange::delta).sum();
        Some(ChangeWindow::new(first.span.start(), last.span.end(), delta))
    }
}

/// The region of the old text that edits touched, plus how far the text
/// after it moved.
///
/// Everything strictly before `old_start` is unchanged in place; everything
/// from `old_end` on is unchanged but shifted by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeWindow {
    old_start: TextSize,
    old_end: TextSize,
    delta: i64,
}

impl ChangeWindow {
    pub fn new(old_start: TextSize, old_end: TextSize, delta: i64) -> Self {
        assert!(old_start <= old_end);
        Self { old_start, old_end, delta }
    }

    pub fn old_start(&self) -> TextSize {
        self.old_start
    }

    pub fn old_end(&self) -> TextSize {
        self.old_end
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    /// End of the window in new-text coordinates.
    pub fn new_end(&self) -> TextSize {
        shift(self.old_end, self.delta)
    }

    /// Moves the start of the window back to `start` to cover context that
    /// precedes the first edit.
    pub fn extend_start(&mut self, start: TextSize) {
        self.old_start = self.old_start.min(start);
    }

    /// Maps a new-text offset to the old text, unless it falls inside the
    /// window.
    pub fn new_to_old(&self, offset: TextSize) -> Option<TextSize> {
        if offset < self.old_start {
            Some(offset)
        } else if offset >= self.new_end() {
            Some(shift(offset, -self.delta))
        } else {
            None
        }
    }

    /// Whether old text `range` plus `lookahead` bytes examined past its end
    /// reads exactly the same bytes in the new text (after mapping).
    pub fn is_untouched(&self, range: TextRange, lookahead: TextSize) -> bool {
        range.end() + lookahead < self.old_start || range.start() >= self.old_end
    }
}

fn shift(offset: TextSize, delta: i64) -> TextSize {
    let shifted = i64::from(u32::from(offset)) + delta;
    TextSize::new(u32::try_from(shifted.max(0)).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn rejects_overlap_and_disorder() {
        let a = TextChangeRange::new(range(2, 5), 1.into());
        let b = TextChangeRange::new(range(4, 6), 0.into());
        assert_eq!(
            TextChanges::new(vec![a, b], 10.into(), 5.into()),
            Err(EditError::Overlapping { index: 1 })
        );
        assert_eq!(
            TextChanges::new(vec![b, a], 10.into(), 5.into()),
            Err(EditError::Unordered { index: 1 })
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        let insert = TextChangeRange::insert(3.into(), 4.into());
        assert!(matches!(
            TextChanges::new(vec![insert], 10.into(), 13.into()),
            Err(EditError::LengthMismatch { expected: 14, .. })
        ));
    }

    #[test]
    fn window_maps_offsets() {
        // "abcdefghij" -> "abXXXXefghij" then delete "i".
        let changes = TextChanges::new(
            vec![
                TextChangeRange::new(range(2, 4), 4.into()),
                TextChangeRange::delete(range(8, 9)),
            ],
            10.into(),
            11.into(),
        )
        .unwrap();
        let window = changes.window().unwrap();

        assert_eq!(window.old_start(), 2.into());
        assert_eq!(window.old_end(), 9.into());
        assert_eq!(window.new_end(), 10.into());
        assert_eq!(window.new_to_old(1.into()), Some(1.into()));
        assert_eq!(window.new_to_old(5.into()), None);
        assert_eq!(window.new_to_old(10.into()), Some(9.into()));

        assert!(window.is_untouched(range(0, 1), 0.into()));
        assert!(!window.is_untouched(range(0, 1), 1.into()));
        assert!(window.is_untouched(range(9, 10), 3.into()));
        assert!(!window.is_untouched(range(3, 4), 0.into()));
    }
}
