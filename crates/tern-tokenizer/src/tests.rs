use tern_errors::DiagnosticCode;
use tern_inputs::ChangeWindow;
use tern_span::{Identified as _, StringTable};
use tern_yellow::{Node, NodeFlags, SyntaxElement, Token, TokenFlags, TokenValue, TriviaKind};
use text_size::TextSize;

use super::*;

fn kinds(text: &str) -> Vec<SyntaxKind> {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);
    let mut kinds = Vec::new();
    loop {
        let scanned = tokenizer.next_token();
        kinds.push(scanned.kind());
        if scanned.kind() == EOF {
            return kinds;
        }
    }
}

fn number(scanned: &Scanned) -> f64 {
    match scanned.token.value() {
        TokenValue::Number(value) => *value,
        other => panic!("expected a number, got {other:?}"),
    }
}

fn cooked(scanned: &Scanned) -> String {
    match scanned.token.value() {
        TokenValue::String(value) => value.as_str().to_owned(),
        other => panic!("expected a string, got {other:?}"),
    }
}

fn code(scanned: &Scanned) -> Option<DiagnosticCode> {
    scanned.diagnostic.as_ref().map(Diagnostic::code)
}

#[test]
fn test_punctuation() {
    assert_eq!(
        kinds("{ a >>= b; } ... => === !== <<= ?:"),
        [
            LEFT_BRACE,
            NAME,
            GREATER_THAN,
            GREATER_THAN,
            EQ,
            NAME,
            SEMICOLON,
            RIGHT_BRACE,
            DOT_DOT_DOT,
            FAT_ARROW,
            EQ_EQ_EQ,
            BANG_EQ_EQ,
            LESS_LESS_EQ,
            QUESTION,
            COLON,
            EOF,
        ]
    );
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("class implements constructor foo"),
        [CLASS_KW, IMPLEMENTS_KW, CONSTRUCTOR_KW, NAME, EOF]
    );
}

#[test]
fn test_trivia() {
    let text = "  // c\nfoo /* x */ bar\n";
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);

    let foo = tokenizer.next_token();
    assert_eq!(foo.kind(), NAME);
    assert_eq!(foo.token.text(), "foo");
    assert_eq!(foo.start(), TextSize::new(7));
    let leading: Vec<_> = foo.token.leading().iter().map(|trivia| trivia.kind).collect();
    assert_eq!(
        leading,
        [TriviaKind::Whitespace, TriviaKind::SingleLineComment, TriviaKind::Newline]
    );
    let trailing: Vec<_> = foo.token.trailing().iter().map(|trivia| trivia.kind).collect();
    assert_eq!(
        trailing,
        [TriviaKind::Whitespace, TriviaKind::MultiLineComment, TriviaKind::Whitespace]
    );

    let bar = tokenizer.next_token();
    assert_eq!(bar.token.text(), "bar");
    assert!(bar.token.leading().is_empty());
    assert!(bar.token.has_trailing_newline());

    let eof = tokenizer.next_token();
    assert_eq!(eof.kind(), EOF);
    assert_eq!(eof.full_start, TextSize::of(text));
}

#[test]
fn test_full_text_round_trip() {
    let text = "\u{feff}let x = 'a' + /* c */ 1;\r\n// done";
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);
    let mut buf = String::new();
    loop {
        let scanned = tokenizer.next_token();
        scanned.token.write_full_text(&mut buf);
        if scanned.kind() == EOF {
            break;
        }
    }
    assert_eq!(buf, text);
}

#[test]
fn test_strings() {
    let text = r#"'a\nb' "xA\x42" 'it\'s'"#;
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);

    let token = tokenizer.next_token();
    assert_eq!(token.kind(), STRING);
    assert_eq!(token.token.text(), r"'a\nb'");
    assert_eq!(cooked(&token), "a\nb");

    let token = tokenizer.next_token();
    assert_eq!(cooked(&token), "xAB");

    let token = tokenizer.next_token();
    assert_eq!(cooked(&token), "it's");
    assert_eq!(code(&token), None);
}

#[test]
fn test_unterminated_string() {
    let text = "'abc\nx";
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);

    let token = tokenizer.next_token();
    assert_eq!(token.kind(), STRING);
    assert_eq!(token.token.text(), "'abc");
    assert_eq!(code(&token), Some(DiagnosticCode::UnterminatedStringLiteral));
    assert!(token.token.flags().contains(TokenFlags::HAS_ERROR));

    let token = tokenizer.next_token();
    assert_eq!(token.kind(), NAME);
    assert_eq!(code(&token), None);
}

#[test]
fn test_numbers() {
    let text = "0x1F 1.5e3 .5 0b101 0o17 42";
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);

    for expected in [31.0, 1500.0, 0.5, 5.0, 15.0, 42.0] {
        let token = tokenizer.next_token();
        assert_eq!(token.kind(), NUMBER);
        assert_eq!(number(&token), expected);
        assert_eq!(code(&token), None);
    }
    assert_eq!(tokenizer.next_token().kind(), EOF);
}

#[test]
fn test_missing_digits() {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new("1e 0x", &mut strings);

    let token = tokenizer.next_token();
    assert_eq!(token.token.text(), "1e");
    assert_eq!(code(&token), Some(DiagnosticCode::DigitExpected));

    let token = tokenizer.next_token();
    assert_eq!(token.token.text(), "0x");
    assert_eq!(code(&token), Some(DiagnosticCode::DigitExpected));
}

#[test]
fn test_invalid_character() {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new("a # b", &mut strings);

    assert_eq!(tokenizer.next_token().kind(), NAME);
    let token = tokenizer.next_token();
    assert_eq!(token.kind(), UNKNOWN);
    assert_eq!(token.token.text(), "#");
    assert_eq!(code(&token), Some(DiagnosticCode::InvalidCharacter));
    assert_eq!(tokenizer.next_token().kind(), NAME);
}

#[test]
fn test_unterminated_comment() {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new("a /* b", &mut strings);

    let token = tokenizer.next_token();
    assert_eq!(token.kind(), NAME);
    assert_eq!(code(&token), Some(DiagnosticCode::UnterminatedComment));
    assert_eq!(tokenizer.next_token().kind(), EOF);
}

#[test]
fn test_rescan_greater() {
    let text = "a >>= b";
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);

    tokenizer.next_token();
    let greater = tokenizer.next_token();
    assert_eq!(greater.kind(), GREATER_THAN);

    let rescanned = tokenizer.rescan_greater(&greater);
    assert_eq!(rescanned.kind(), GREATER_GREATER_EQ);
    assert_eq!(rescanned.token.text(), ">>=");
    assert_eq!(rescanned.full_start, greater.full_start);
    assert!(rescanned.token.flags().contains(TokenFlags::RESCANNED));

    let token = tokenizer.next_token();
    assert_eq!(token.token.text(), "b");
}

#[test]
fn test_rescan_lone_greater() {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new("> b", &mut strings);

    let greater = tokenizer.next_token();
    let rescanned = tokenizer.rescan_greater(&greater);
    assert!(rescanned.token.same_object(&greater.token));
    assert_eq!(tokenizer.next_token().token.text(), "b");
}

#[test]
fn test_rescan_slash() {
    let text = "/a[/]b+/gi;";
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new(text, &mut strings);

    let slash = tokenizer.next_token();
    assert_eq!(slash.kind(), SLASH);

    let regex = tokenizer.rescan_slash(&slash);
    assert_eq!(regex.kind(), REGEX);
    assert_eq!(regex.token.text(), "/a[/]b+/gi");
    assert_eq!(code(&regex), None);
    assert_eq!(tokenizer.next_token().kind(), SEMICOLON);
}

#[test]
fn test_unterminated_regex() {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new("/=abc\nx", &mut strings);

    let slash = tokenizer.next_token();
    assert_eq!(slash.kind(), SLASH_EQ);

    let regex = tokenizer.rescan_slash(&slash);
    assert_eq!(regex.token.text(), "/=abc");
    assert_eq!(code(&regex), Some(DiagnosticCode::UnterminatedRegularExpression));
    assert_eq!(tokenizer.next_token().token.text(), "x");
}

#[test]
fn test_snapshot_restore() {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new("a b c", &mut strings);

    tokenizer.next_token();
    let snapshot = tokenizer.snapshot();
    assert_eq!(tokenizer.next_token().token.text(), "b");
    assert_eq!(tokenizer.next_token().token.text(), "c");

    tokenizer.restore(snapshot);
    assert_eq!(tokenizer.next_token().token.text(), "b");
}

#[test]
fn test_lookahead() {
    let mut strings = StringTable::new();
    let mut tokenizer = Tokenizer::new("a b", &mut strings);

    let a = tokenizer.next_token();
    assert_eq!(a.full_end(), TextSize::new(2));
    assert_eq!(a.token.lookahead(), TextSize::new(1));
    assert_eq!(tokenizer.reach(), TextSize::new(3));

    // Peeking for more identifier characters runs one past the end.
    let b = tokenizer.next_token();
    assert_eq!(b.token.lookahead(), TextSize::new(1));
}

fn scan_all(text: &str, strings: &mut StringTable) -> Vec<Scanned> {
    let mut tokenizer = Tokenizer::new(text, strings);
    let mut tokens = Vec::new();
    loop {
        let scanned = tokenizer.next_token();
        let done = scanned.kind() == EOF;
        tokens.push(scanned);
        if done {
            return tokens;
        }
    }
}

#[test]
fn test_reuse_after_edit() {
    let old_text = "let x = 1;\nlet y = 2;\n";
    let new_text = "let x = 42;\nlet y = 2;\n";
    let mut strings = StringTable::new();

    let old: Vec<Token> = scan_all(old_text, &mut strings).into_iter().map(|s| s.token).collect();
    let children = old.iter().cloned().map(SyntaxElement::from).collect();
    let root = Node::new(SOURCE_FILE, children, NodeFlags::empty(), TextSize::new(0));

    let window = ChangeWindow::new(TextSize::new(8), TextSize::new(9), 1);
    let reuse = ReusableTokens::new(&root, window);
    assert_eq!(reuse.len(), old.len() - 2);

    let mut tokenizer = Tokenizer::new(new_text, &mut strings).with_reuse(reuse);
    let mut reused = Vec::new();
    let mut text = String::new();
    loop {
        let scanned = tokenizer.next_token();
        reused.push(scanned.reused);
        scanned.token.write_full_text(&mut text);
        if scanned.kind() == EOF {
            break;
        }
    }

    assert_eq!(text, new_text);
    assert_eq!(
        reused,
        [true, true, false, false, true, true, true, true, true, true, true]
    );
}

#[test]
fn test_no_reuse_of_flagged_tokens() {
    let mut strings = StringTable::new();
    let old: Vec<Token> = scan_all("'abc\nx", &mut strings).into_iter().map(|s| s.token).collect();
    let children = old.into_iter().map(SyntaxElement::from).collect();
    let root = Node::new(SOURCE_FILE, children, NodeFlags::empty(), TextSize::new(0));

    // An edit far past the end leaves everything untouched.
    let window = ChangeWindow::new(TextSize::new(100), TextSize::new(100), 0);
    let reuse = ReusableTokens::new(&root, window);
    // The unterminated string carries an error.
    assert_eq!(reuse.len(), 2);
}
