//! Context-sensitive scanner producing tokens with attached trivia.
//!
//! The scanner is stateless between tokens: what it produces at an offset
//! depends only on the text from there on. The two places where the
//! grammar decides how text is split, `>` runs and `/`, are left to the
//! parser through [`Tokenizer::rescan_greater`] and
//! [`Tokenizer::rescan_slash`].

mod classes;
mod reuse;
mod window;

use classes::{
    is_digit, is_hex_digit, is_identifier_part, is_identifier_start, is_newline, is_whitespace,
};
pub use reuse::ReusableTokens;
use tern_errors::{Diagnostic, DiagnosticCode};
use tern_inputs::SourceText;
use tern_span::StringTable;
pub use tern_yellow::SyntaxKind;
use tern_yellow::SyntaxKind::*;
use tern_yellow::{
    Token, TokenFlags, TokenParts, TokenText, TokenValue, Trivia, TriviaKind, TriviaList,
};
use text_size::{TextRange, TextSize};
pub use window::{EOF_BYTE, SlidingTextWindow};

/// A token together with where it starts in the text being scanned.
#[derive(Debug, Clone)]
pub struct Scanned {
    pub token: Token,
    pub full_start: TextSize,
    /// Reported by the scanner; the parser emits it when it consumes the
    /// token.
    pub diagnostic: Option<Diagnostic>,
    /// Taken from an older tree instead of being scanned.
    pub reused: bool,
}

impl Scanned {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.token.kind()
    }

    pub fn start(&self) -> TextSize {
        self.full_start + self.token.leading().width()
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start(), self.token.width())
    }

    pub fn full_end(&self) -> TextSize {
        self.full_start + self.token.full_width()
    }
}

/// Scanner position to return to after speculative parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    position: TextSize,
}

pub struct Tokenizer<'a, S: SourceText + ?Sized = str> {
    window: SlidingTextWindow<'a, S>,
    strings: &'a mut StringTable,
    trivia: Vec<Trivia>,
    diagnostic: Option<Diagnostic>,
    reuse: Option<ReusableTokens>,
    reach: TextSize,
}

impl<'a, S: SourceText + ?Sized> Tokenizer<'a, S> {
    pub fn new(source: &'a S, strings: &'a mut StringTable) -> Self {
        Self {
            window: SlidingTextWindow::new(source),
            strings,
            trivia: Vec::with_capacity(4),
            diagnostic: None,
            reuse: None,
            reach: TextSize::new(0),
        }
    }

    /// Lets [`Self::next_token`] hand out tokens of an older tree.
    pub fn with_reuse(mut self, reuse: ReusableTokens) -> Self {
        self.reuse = Some(reuse);
        self
    }

    pub fn source(&self) -> &'a S {
        self.window.source()
    }

    pub fn strings(&mut self) -> &mut StringTable {
        &mut *self.strings
    }

    /// Full start of the next token.
    pub fn position(&self) -> TextSize {
        self.window.position()
    }

    /// One past the furthest byte examined for any token produced so far.
    pub fn reach(&self) -> TextSize {
        self.reach
    }

    /// Accounts for text examined while producing something the tokenizer
    /// did not scan itself, such as a reused node.
    pub fn extend_reach(&mut self, reach: TextSize) {
        self.reach = self.reach.max(reach);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot { position: self.window.position() }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.window.reset(snapshot.position);
    }

    /// Continues scanning at `position`, e.g. after a reused node.
    pub fn skip_to(&mut self, position: TextSize) {
        self.window.reset(position);
    }

    pub fn next_token(&mut self) -> Scanned {
        let full_start = self.window.position();
        if let Some(token) = self.reuse.as_ref().and_then(|reuse| reuse.find(full_start)) {
            let token = token.clone();
            let full_end = full_start + token.full_width();
            self.window.reset(full_end);
            self.reach = self.reach.max(full_end + token.lookahead());
            return Scanned { token, full_start, diagnostic: None, reused: true };
        }

        self.window.reset_reach();
        self.scan_trivia(false);
        let leading = self.take_trivia();
        self.window.start();
        let (kind, value) = self.scan_kind();
        let text = self.token_text(kind);
        self.finish(full_start, leading, kind, text, value, TokenFlags::empty())
    }

    /// Rescans a `>` in operator position as the longest of `>`, `>=`, `>>`,
    /// `>>=`, `>>>` and `>>>=`.
    pub fn rescan_greater(&mut self, scanned: &Scanned) -> Scanned {
        debug_assert_eq!(scanned.kind(), GREATER_THAN);
        self.window.reset(scanned.start());
        self.window.reset_reach();
        self.window.start();
        self.window.advance(1);

        let kind = match (self.window.peek(), self.window.peek_at(1), self.window.peek_at(2)) {
            (b'>', b'>', b'=') => GREATER_GREATER_GREATER_EQ,
            (b'>', b'>', _) => GREATER_GREATER_GREATER,
            (b'>', b'=', _) => GREATER_GREATER_EQ,
            (b'>', _, _) => GREATER_GREATER,
            (b'=', _, _) => GREATER_THAN_EQ,
            _ => {
                self.reach = self.reach.max(self.window.reach());
                self.window.reset(scanned.full_end());
                return scanned.clone();
            }
        };
        let len = kind.fixed_text().map_or(1, str::len);
        self.window.advance(len - 1);

        let leading = scanned.token.leading().clone();
        self.finish(
            scanned.full_start,
            leading,
            kind,
            TokenText::Fixed,
            TokenValue::None,
            TokenFlags::RESCANNED,
        )
    }

    /// Rescans a `/` or `/=` in operand position as a regular expression.
    pub fn rescan_slash(&mut self, scanned: &Scanned) -> Scanned {
        debug_assert!(matches!(scanned.kind(), SLASH | SLASH_EQ));
        self.window.reset(scanned.start());
        self.window.reset_reach();
        self.window.start();
        self.window.advance(1);

        let mut in_class = false;
        loop {
            match self.window.peek() {
                byte if is_newline(byte) => {
                    self.unterminated_regex();
                    break;
                }
                EOF_BYTE if self.window.is_at_end() => {
                    self.unterminated_regex();
                    break;
                }
                b'\\' => {
                    self.window.advance(1);
                    let escaped = self.window.peek();
                    if !is_newline(escaped) && !self.window.is_at_end() {
                        self.window.advance(1);
                    }
                }
                b'[' => {
                    in_class = true;
                    self.window.advance(1);
                }
                b']' => {
                    in_class = false;
                    self.window.advance(1);
                }
                b'/' if !in_class => {
                    self.window.advance(1);
                    while is_identifier_part(self.window.peek()) {
                        self.window.advance(1);
                    }
                    break;
                }
                _ => self.window.advance(1),
            }
        }

        let text = TokenText::Realized(self.window.intern_lexeme(self.strings));
        let leading = scanned.token.leading().clone();
        self.finish(
            scanned.full_start,
            leading,
            REGEX,
            text,
            TokenValue::None,
            TokenFlags::RESCANNED,
        )
    }

    fn finish(
        &mut self,
        full_start: TextSize,
        leading: TriviaList,
        kind: SyntaxKind,
        text: TokenText,
        value: TokenValue,
        mut flags: TokenFlags,
    ) -> Scanned {
        self.scan_trivia(true);
        let trailing = self.take_trivia();

        let full_end = self.window.position();
        let reach = self.window.reach().max(full_end);
        self.reach = self.reach.max(reach);

        let diagnostic = self.diagnostic.take();
        if diagnostic.is_some() {
            flags |= TokenFlags::HAS_ERROR;
        }
        let token = Token::from_parts(TokenParts {
            kind,
            text,
            leading,
            trailing,
            value,
            flags,
            lookahead: (reach - full_end).into(),
        });
        Scanned { token, full_start, diagnostic, reused: false }
    }

    fn token_text(&mut self, kind: SyntaxKind) -> TokenText {
        if kind.fixed_text().is_some() {
            TokenText::Fixed
        } else {
            TokenText::Realized(self.window.intern_lexeme(self.strings))
        }
    }

    fn take_trivia(&mut self) -> TriviaList {
        TriviaList::new(std::mem::take(&mut self.trivia))
    }

    fn report(&mut self, range: TextRange, code: DiagnosticCode) {
        if self.diagnostic.is_none() {
            self.diagnostic = Some(Diagnostic::new(range, code));
        }
    }

    /// Trailing trivia stops after the first line break; leading trivia
    /// takes everything up to the token.
    fn scan_trivia(&mut self, trailing: bool) {
        loop {
            self.window.start();
            let kind = match self.window.peek() {
                byte if is_whitespace(byte) => {
                    while is_whitespace(self.window.peek()) {
                        self.window.advance(1);
                    }
                    TriviaKind::Whitespace
                }
                0xEF if self.window.peek_at(1) == 0xBB && self.window.peek_at(2) == 0xBF => {
                    self.window.advance(3);
                    TriviaKind::Whitespace
                }
                b'\r' => {
                    self.window.advance(1);
                    if self.window.peek() == b'\n' {
                        self.window.advance(1);
                    }
                    TriviaKind::Newline
                }
                b'\n' => {
                    self.window.advance(1);
                    TriviaKind::Newline
                }
                b'/' if self.window.peek_at(1) == b'/' => {
                    while !is_newline(self.window.peek()) && !self.window.is_at_end() {
                        self.window.advance(1);
                    }
                    TriviaKind::SingleLineComment
                }
                b'/' if self.window.peek_at(1) == b'*' => {
                    self.block_comment();
                    TriviaKind::MultiLineComment
                }
                _ => break,
            };

            let piece = Trivia::new(kind, self.window.intern_lexeme(self.strings));
            let ends_line = piece.has_newline();
            self.trivia.push(piece);
            if trailing && ends_line {
                break;
            }
        }
    }

    fn block_comment(&mut self) {
        self.window.advance(2);
        loop {
            if self.window.is_at_end() {
                let end = self.window.position();
                self.report(TextRange::empty(end), DiagnosticCode::UnterminatedComment);
                return;
            }
            if self.window.peek() == b'*' && self.window.peek_at(1) == b'/' {
                self.window.advance(2);
                return;
            }
            self.window.advance(1);
        }
    }

    fn scan_kind(&mut self) -> (SyntaxKind, TokenValue) {
        if self.window.is_at_end() {
            return (EOF, TokenValue::None);
        }

        let first = self.window.next_byte();
        let second = self.window.peek();
        let kind = match first {
            b'{' => LEFT_BRACE,
            b'}' => RIGHT_BRACE,
            b'(' => LEFT_PAREN,
            b')' => RIGHT_PAREN,
            b'[' => LEFT_BRACKET,
            b']' => RIGHT_BRACKET,
            b';' => SEMICOLON,
            b',' => COMMA,
            b':' => COLON,
            b'?' => QUESTION,
            b'~' => TILDE,
            // Never combined here; see `rescan_greater`.
            b'>' => GREATER_THAN,
            b'.' if is_digit(second) => return self.number(first),
            b'.' if second == b'.' && self.window.peek_at(1) == b'.' => self.eat(2, DOT_DOT_DOT),
            b'.' => DOT,
            b'<' => match (second, self.window.peek_at(1)) {
                (b'<', b'=') => self.eat(2, LESS_LESS_EQ),
                (b'<', _) => self.eat(1, LESS_LESS),
                (b'=', _) => self.eat(1, LESS_THAN_EQ),
                _ => LESS_THAN,
            },
            b'=' => match (second, self.window.peek_at(1)) {
                (b'=', b'=') => self.eat(2, EQ_EQ_EQ),
                (b'=', _) => self.eat(1, EQ_EQ),
                (b'>', _) => self.eat(1, FAT_ARROW),
                _ => EQ,
            },
            b'!' => match (second, self.window.peek_at(1)) {
                (b'=', b'=') => self.eat(2, BANG_EQ_EQ),
                (b'=', _) => self.eat(1, BANG_EQ),
                _ => BANG,
            },
            b'+' => match second {
                b'+' => self.eat(1, PLUS_PLUS),
                b'=' => self.eat(1, PLUS_EQ),
                _ => PLUS,
            },
            b'-' => match second {
                b'-' => self.eat(1, MINUS_MINUS),
                b'=' => self.eat(1, MINUS_EQ),
                _ => MINUS,
            },
            b'*' => self.compound(second, STAR, STAR_EQ),
            b'/' => self.compound(second, SLASH, SLASH_EQ),
            b'%' => self.compound(second, PERCENT, PERCENT_EQ),
            b'^' => self.compound(second, CARET, CARET_EQ),
            b'&' => match second {
                b'&' => self.eat(1, AMP_AMP),
                b'=' => self.eat(1, AMP_EQ),
                _ => AMP,
            },
            b'|' => match second {
                b'|' => self.eat(1, PIPE_PIPE),
                b'=' => self.eat(1, PIPE_EQ),
                _ => PIPE,
            },
            b'\'' | b'"' => return self.string(first),
            byte if is_digit(byte) => return self.number(first),
            byte if is_identifier_start(byte) => {
                while is_identifier_part(self.window.peek()) {
                    self.window.advance(1);
                }
                std::str::from_utf8(self.window.lexeme_bytes())
                    .ok()
                    .and_then(SyntaxKind::from_keyword)
                    .unwrap_or(NAME)
            }
            _ => {
                let range = TextRange::at(self.window.lexeme_start(), TextSize::new(1));
                self.report(range, DiagnosticCode::InvalidCharacter);
                UNKNOWN
            }
        };
        (kind, TokenValue::None)
    }

    #[inline]
    fn eat(&mut self, n: usize, kind: SyntaxKind) -> SyntaxKind {
        self.window.advance(n);
        kind
    }

    #[inline]
    fn compound(&mut self, second: u8, plain: SyntaxKind, assign: SyntaxKind) -> SyntaxKind {
        if second == b'=' { self.eat(1, assign) } else { plain }
    }

    fn string(&mut self, quote: u8) -> (SyntaxKind, TokenValue) {
        let mut cooked = Vec::new();
        loop {
            match self.window.peek() {
                byte if byte == quote => {
                    self.window.advance(1);
                    break;
                }
                byte if is_newline(byte) => {
                    self.unterminated_string();
                    break;
                }
                EOF_BYTE if self.window.is_at_end() => {
                    self.unterminated_string();
                    break;
                }
                b'\\' => {
                    self.window.advance(1);
                    self.escape(&mut cooked);
                }
                byte => {
                    cooked.push(byte);
                    self.window.advance(1);
                }
            }
        }
        let cooked = String::from_utf8_lossy(&cooked);
        (STRING, TokenValue::String(self.strings.intern_str(&cooked)))
    }

    fn unterminated_string(&mut self) {
        let range = TextRange::new(self.window.lexeme_start(), self.window.position());
        self.report(range, DiagnosticCode::UnterminatedStringLiteral);
    }

    fn unterminated_regex(&mut self) {
        let range = TextRange::new(self.window.lexeme_start(), self.window.position());
        self.report(range, DiagnosticCode::UnterminatedRegularExpression);
    }

    fn escape(&mut self, cooked: &mut Vec<u8>) {
        if self.window.is_at_end() {
            return;
        }
        let byte = self.window.next_byte();
        let ch = match byte {
            b'n' => '\n',
            b't' => '\t',
            b'r' => '\r',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'v' => '\u{b}',
            b'0' if !is_digit(self.window.peek()) => '\0',
            b'x' => match self.hex_value(2) {
                Some(value) => char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER),
                None => 'x',
            },
            b'u' => match self.hex_value(4) {
                Some(value) => char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER),
                None => 'u',
            },
            // Line continuation.
            b'\r' => {
                if self.window.peek() == b'\n' {
                    self.window.advance(1);
                }
                return;
            }
            b'\n' => return,
            other => {
                cooked.push(other);
                return;
            }
        };
        let mut utf8 = [0; 4];
        cooked.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Consumes exactly `digits` hex digits, or nothing.
    fn hex_value(&mut self, digits: usize) -> Option<u32> {
        let mut value = 0;
        for n in 0..digits {
            let byte = self.window.peek_at(n);
            if !is_hex_digit(byte) {
                return None;
            }
            value = value * 16 + hex_digit(byte);
        }
        self.window.advance(digits);
        Some(value)
    }

    fn number(&mut self, first: u8) -> (SyntaxKind, TokenValue) {
        if first == b'0' {
            let radix = match self.window.peek() {
                b'x' | b'X' => Some(16),
                b'o' | b'O' => Some(8),
                b'b' | b'B' => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.window.advance(1);
                let mut value = 0f64;
                let mut any = false;
                while is_hex_digit(self.window.peek()) && hex_digit(self.window.peek()) < radix {
                    value = value * f64::from(radix) + f64::from(hex_digit(self.window.peek()));
                    any = true;
                    self.window.advance(1);
                }
                if !any {
                    let at = TextRange::empty(self.window.position());
                    self.report(at, DiagnosticCode::DigitExpected);
                }
                return (NUMBER, TokenValue::Number(value));
            }
        }

        if first != b'.' {
            self.digits();
            if self.window.peek() == b'.' {
                self.window.advance(1);
            }
        }
        self.digits();

        if matches!(self.window.peek(), b'e' | b'E') {
            self.window.advance(1);
            if matches!(self.window.peek(), b'+' | b'-') {
                self.window.advance(1);
            }
            if !is_digit(self.window.peek()) {
                let at = TextRange::empty(self.window.position());
                self.report(at, DiagnosticCode::DigitExpected);
            }
            self.digits();
        }

        let value = std::str::from_utf8(self.window.lexeme_bytes())
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .unwrap_or(f64::NAN);
        (NUMBER, TokenValue::Number(value))
    }

    fn digits(&mut self) {
        while is_digit(self.window.peek()) {
            self.window.advance(1);
        }
    }
}

fn hex_digit(byte: u8) -> u32 {
    match byte {
        b'0'..=b'9' => u32::from(byte - b'0'),
        b'a'..=b'f' => u32::from(byte - b'a' + 10),
        b'A'..=b'F' => u32::from(byte - b'A' + 10),
        _ => u32::MAX,
    }
}

#[cfg(test)]
mod tests;
