//! Byte classes for the scanner.

const WHITESPACE: u8 = 1 << 0;
const NEWLINE: u8 = 1 << 1;
const DIGIT: u8 = 1 << 2;
const HEX_DIGIT: u8 = 1 << 3;
const IDENT_START: u8 = 1 << 4;
const IDENT_PART: u8 = 1 << 5;

static CLASSES: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut byte = 0usize;
    while byte < 256 {
        let b = byte as u8;
        let mut class = 0;
        if matches!(b, b' ' | b'\t' | 0x0B | 0x0C) {
            class |= WHITESPACE;
        }
        if matches!(b, b'\n' | b'\r') {
            class |= NEWLINE;
        }
        if b.is_ascii_digit() {
            class |= DIGIT | HEX_DIGIT | IDENT_PART;
        }
        if matches!(b, b'a'..=b'f' | b'A'..=b'F') {
            class |= HEX_DIGIT;
        }
        // Non-ASCII bytes only occur inside multi-byte characters, which are
        // all treated as identifier characters so a lexeme never splits one.
        if b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80 {
            class |= IDENT_START | IDENT_PART;
        }
        table[byte] = class;
        byte += 1;
    }
    table
};

#[inline]
fn has(byte: u8, class: u8) -> bool {
    CLASSES[byte as usize] & class != 0
}

#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    has(byte, WHITESPACE)
}

#[inline]
pub(crate) fn is_newline(byte: u8) -> bool {
    has(byte, NEWLINE)
}

#[inline]
pub(crate) fn is_digit(byte: u8) -> bool {
    has(byte, DIGIT)
}

#[inline]
pub(crate) fn is_hex_digit(byte: u8) -> bool {
    has(byte, HEX_DIGIT)
}

#[inline]
pub(crate) fn is_identifier_start(byte: u8) -> bool {
    has(byte, IDENT_START)
}

#[inline]
pub(crate) fn is_identifier_part(byte: u8) -> bool {
    has(byte, IDENT_PART)
}
