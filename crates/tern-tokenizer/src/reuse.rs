use tern_inputs::ChangeWindow;
use tern_yellow::{Node, Token, TokenFlags};
use text_size::{TextRange, TextSize};

/// Tokens of an old tree that can stand in for rescanning after an edit.
///
/// A token qualifies when neither its text nor anything the scanner looked
/// at past its end was touched, and its kind did not depend on the parser
/// (rescans) or on recovery (diagnostics, skipped text, missing tokens).
pub struct ReusableTokens {
    tokens: Vec<(TextSize, Token)>,
    window: ChangeWindow,
}

impl ReusableTokens {
    pub fn new(root: &Node, window: ChangeWindow) -> Self {
        let mut tokens = Vec::new();
        let mut offset = TextSize::new(0);
        for token in root.tokens() {
            let full_range = TextRange::at(offset, token.full_width());
            offset = full_range.end();
            if token.is_missing()
                || token.has_skipped_text()
                || token.flags().intersects(TokenFlags::RESCANNED | TokenFlags::HAS_ERROR)
                || !window.is_untouched(full_range, token.lookahead())
            {
                continue;
            }
            tokens.push((full_range.start(), token.clone()));
        }
        Self { tokens, window }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn window(&self) -> &ChangeWindow {
        &self.window
    }

    /// The old token that starts where the new text has `offset`.
    pub fn find(&self, offset: TextSize) -> Option<&Token> {
        let old = self.window.new_to_old(offset)?;
        let index = self.tokens.partition_point(|(start, _)| *start < old);
        match self.tokens.get(index) {
            Some((start, token)) if *start == old => Some(token),
            _ => None,
        }
    }
}
