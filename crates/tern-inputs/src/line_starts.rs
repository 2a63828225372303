use text_size::TextSize;

use crate::SourceText;

/// Offsets at which each line begins. Always starts with `0`, so an empty
/// text has exactly one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineStarts {
    starts: Vec<TextSize>,
}

impl LineStarts {
    /// Recognizes `\n`, `\r\n`, `\r`, U+2028 and U+2029 as line breaks.
    pub fn new<S: SourceText + ?Sized>(text: &S) -> Self {
        let len = u32::from(text.len());
        let mut starts = vec![TextSize::new(0)];
        let mut offset = 0;

        while offset < len {
            let byte = text.byte_at(offset.into());
            offset += 1;
            match byte {
                b'\n' => starts.push(offset.into()),
                b'\r' => {
                    if offset < len && text.byte_at(offset.into()) == b'\n' {
                        offset += 1;
                    }
                    starts.push(offset.into());
                }
                0xE2 if offset + 1 < len
                    && text.byte_at(offset.into()) == 0x80
                    && matches!(text.byte_at((offset + 1).into()), 0xA8 | 0xA9) =>
                {
                    offset += 2;
                    starts.push(offset.into());
                }
                _ => {}
            }
        }

        Self { starts }
    }

    pub fn starts(&self) -> &[TextSize] {
        &self.starts
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: TextSize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Zero-based `(line, column)` with the column in bytes.
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        let line = self.line_of(offset);
        (line as u32, u32::from(offset - self.starts[line]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(text: &str) -> Vec<u32> {
        LineStarts::new(text).starts().iter().map(|&it| it.into()).collect()
    }

    #[test]
    fn empty_text_has_one_line() {
        assert_eq!(starts(""), vec![0]);
    }

    #[test]
    fn all_line_breaks() {
        assert_eq!(starts("a\nb\r\nc\rd"), vec![0, 2, 5, 7]);
        assert_eq!(starts("a\u{2028}b"), vec![0, 4]);
        assert_eq!(starts("\n"), vec![0, 1]);
    }

    #[test]
    fn line_col_lookup() {
        let lines = LineStarts::new("ab\ncd\n");
        assert_eq!(lines.line_col(0.into()), (0, 0));
        assert_eq!(lines.line_col(2.into()), (0, 2));
        assert_eq!(lines.line_col(3.into()), (1, 0));
        assert_eq!(lines.line_col(6.into()), (2, 0));
    }
}
